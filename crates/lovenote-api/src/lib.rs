//! Lovenote response API.
//!
//! A single create-only resource, `POST /api/responses`, plus a health
//! check. The binary in `main.rs` wires configuration, telemetry and the
//! Postgres pool around the router built here.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

use state::AppState;

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with the deployed player origin.
    Router::new()
        .merge(routes::health::router())
        .nest("/api/responses", routes::responses::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
