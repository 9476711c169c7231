//! Server configuration read from the environment.

use std::net::SocketAddr;

use crate::error::AppError;

/// Settings the server needs at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `PostgreSQL` connection string.
    pub database_url: String,
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// OTLP collector endpoint; tracing export is off when absent.
    pub otlp_endpoint: Option<String>,
}

impl ServerConfig {
    /// Reads `DATABASE_URL`, `HOST`, `PORT` and `OTEL_EXPORTER_OTLP_ENDPOINT`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or `PORT` is
    /// not a valid port number.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an injectable lookup.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| {
            AppError::Config("DATABASE_URL environment variable must be set".into())
        })?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("PORT")
            .map_or(Ok(3000), |port| port.parse())
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty());

        Ok(Self {
            database_url,
            host,
            port,
            otlp_endpoint,
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST` and `PORT` do not form a valid
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply_when_only_database_url_is_set() {
        // Arrange
        let lookup = lookup_from(&[("DATABASE_URL", "postgres://localhost/lovenote")]);

        // Act
        let config = ServerConfig::from_lookup(lookup).unwrap();

        // Assert
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.otlp_endpoint, None);
        assert_eq!(config.bind_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_missing_database_url_is_a_config_error() {
        let result = ServerConfig::from_lookup(lookup_from(&[]));

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_port_is_a_config_error() {
        let lookup = lookup_from(&[("DATABASE_URL", "postgres://x"), ("PORT", "eighty")]);

        let result = ServerConfig::from_lookup(lookup);

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_empty_otlp_endpoint_disables_export() {
        let lookup = lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", ""),
        ]);

        let config = ServerConfig::from_lookup(lookup).unwrap();

        assert_eq!(config.otlp_endpoint, None);
    }

    #[test]
    fn test_invalid_host_is_rejected_at_bind() {
        let lookup = lookup_from(&[("DATABASE_URL", "postgres://x"), ("HOST", "not a host")]);
        let config = ServerConfig::from_lookup(lookup).unwrap();

        assert!(matches!(config.bind_addr(), Err(AppError::Config(_))));
    }
}
