//! Lovenote API server entry point.

use std::sync::Arc;

use lovenote_api::config::ServerConfig;
use lovenote_api::error::AppError;
use lovenote_api::state::AppState;
use lovenote_api::telemetry::Telemetry;
use lovenote_core::clock::SystemClock;
use lovenote_store::pg_response_repository::PgResponseRepository;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = ServerConfig::from_env()?;
    let telemetry = Telemetry::init(config.otlp_endpoint.as_deref())?;

    info!(
        exporting_traces = telemetry.is_exporting(),
        "Starting Lovenote API server"
    );

    // Create database connection pool and bring the schema up to date.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    let state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(PgResponseRepository::new(pool)),
    );
    let app = lovenote_api::app(state);

    let addr = config.bind_addr()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    telemetry.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
}
