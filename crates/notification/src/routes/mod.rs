//! HTTP route handlers for the notification service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health      - Liveness check
//! POST /send-email  - Deliver an OTP email for {email, otp}
//! ```

pub mod send_email;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the notification router with all routes and state attached.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/send-email", post(send_email::send_email))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
