//! HTTP route handlers for the registration webhook.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health        - Liveness check
//! GET  /health/ready  - Readiness check (customer store reachable)
//! POST /register      - Registration webhook
//! ```

pub mod health;
pub mod register;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the registration router with all routes and state attached.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/register", post(register::register))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
