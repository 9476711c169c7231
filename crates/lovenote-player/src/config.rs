//! Player configuration read from the environment.

use std::path::PathBuf;

use crate::error::PlayerError;

/// Where the response API lives unless `LOVENOTE_API_URL` says otherwise.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

/// Settings the player needs at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Base URL of the response API.
    pub api_url: String,
    /// Script file to play instead of the built-in one.
    pub script_path: Option<PathBuf>,
    /// Seed for reproducible decoy motion.
    pub seed: Option<u64>,
    /// File that receives JSON logs; logging is off when absent.
    pub log_file: Option<PathBuf>,
}

impl PlayerConfig {
    /// Reads `LOVENOTE_API_URL`, `LOVENOTE_SCRIPT`, `LOVENOTE_SEED` and
    /// `LOVENOTE_LOG_FILE`.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Config` if `LOVENOTE_SEED` is not a `u64`.
    pub fn from_env() -> Result<Self, PlayerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`PlayerConfig::from_env`] with an injectable lookup.
    ///
    /// # Errors
    ///
    /// See [`PlayerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PlayerError> {
        let set = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_url = set("LOVENOTE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let seed = set("LOVENOTE_SEED")
            .map(|seed| seed.trim().parse::<u64>())
            .transpose()
            .map_err(|e| PlayerError::Config(format!("LOVENOTE_SEED must be a valid u64: {e}")))?;

        Ok(Self {
            api_url,
            script_path: set("LOVENOTE_SCRIPT").map(PathBuf::from),
            seed,
            log_file: set("LOVENOTE_LOG_FILE").map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = PlayerConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.script_path, None);
        assert_eq!(config.seed, None);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_values_are_read_from_lookup() {
        // Arrange
        let lookup = |key: &str| match key {
            "LOVENOTE_API_URL" => Some("https://love.example".to_string()),
            "LOVENOTE_SCRIPT" => Some("/etc/lovenote/script.yaml".to_string()),
            "LOVENOTE_SEED" => Some(" 1402 ".to_string()),
            "LOVENOTE_LOG_FILE" => Some("/tmp/lovenote.log".to_string()),
            _ => None,
        };

        // Act
        let config = PlayerConfig::from_lookup(lookup).unwrap();

        // Assert
        assert_eq!(config.api_url, "https://love.example");
        assert_eq!(
            config.script_path,
            Some(PathBuf::from("/etc/lovenote/script.yaml"))
        );
        assert_eq!(config.seed, Some(1402));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/lovenote.log")));
    }

    #[test]
    fn test_invalid_seed_is_a_config_error() {
        let lookup = |key: &str| (key == "LOVENOTE_SEED").then(|| "roses".to_string());

        let result = PlayerConfig::from_lookup(lookup);

        assert!(matches!(result, Err(PlayerError::Config(_))));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let lookup = |key: &str| (key == "LOVENOTE_API_URL").then(String::new);

        let config = PlayerConfig::from_lookup(lookup).unwrap();

        assert_eq!(config.api_url, DEFAULT_API_URL);
    }
}
