//! HTTP surface for the server.
//!
//! Provides endpoints for:
//! - Workflow creation (`POST /analysis`)
//! - Workflow status (`GET /workflows/:id/status`)
//! - Workflow results (`GET /workflows/:id/results`)
//! - Health check (`GET /health`)

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod handlers;
pub mod responses;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/analysis", post(handlers::create_analysis))
        .route("/workflows/:id/status", get(handlers::workflow_status))
        .route("/workflows/:id/results", get(handlers::workflow_results))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
