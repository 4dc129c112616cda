//! ard-dashboard library interface
//!
//! Exposes the workflow, services and HTTP router for the binary and for
//! integration tests.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod presentation;
pub mod services;
pub mod workflow;

pub use crate::error::{ApiError, ApiResult};

use ard_common::events::EventBus;
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::workflow::WorkflowController;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Session state machine
    pub controller: WorkflowController,
    /// Event bus for SSE broadcasting
    pub event_bus: EventBus,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last error for diagnostic purposes
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(controller: WorkflowController, event_bus: EventBus) -> Self {
        Self {
            controller,
            event_bus,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Remember an error for `/health`
    pub async fn record_error(&self, message: impl Into<String>) {
        *self.last_error.write().await = Some(message.into());
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        // UI routes (HTML page + static assets)
        .merge(api::ui_routes())
        // API routes
        .merge(api::session_routes())
        .merge(api::catalog_routes())
        .merge(api::health_routes())
        .route("/events", get(api::event_stream))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
