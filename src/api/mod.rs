//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/alarms", delete(stop_all_handler))
        .route("/alarms/:id", delete(stop_handler))
        .route("/alarms/:id/sound", post(start_sound_handler))
        .route("/alarms/:id/vibration", post(start_vibration_handler))
        .route("/feedback/sound", post(feedback_sound_handler))
        .route("/feedback/vibration", post(feedback_vibration_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
