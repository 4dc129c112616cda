//! UI Routes - HTML page for the dashboard (vanilla JS, no frameworks)
//!
//! - **Root Page** (`root`): the dashboard itself
//! - **Static Assets** (`static_assets`): embedded CSS/JS

use axum::{routing::get, Router};
use crate::AppState;

mod root;
mod static_assets;

use root::root_page;
use static_assets::{serve_dashboard_css, serve_dashboard_js};

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_page))
        .route("/static/dashboard.js", get(serve_dashboard_js))
        .route("/static/dashboard.css", get(serve_dashboard_css))
}
