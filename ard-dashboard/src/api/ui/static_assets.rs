//! Static asset handlers for the dashboard page
//!
//! Embeds and serves CSS/JS files at compile time

use axum::{http::StatusCode, response::{IntoResponse, Response}};

const DASHBOARD_JS: &str = include_str!("../../../static/dashboard.js");
const DASHBOARD_CSS: &str = include_str!("../../../static/dashboard.css");

/// GET /static/dashboard.js
pub async fn serve_dashboard_js() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "application/javascript"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        DASHBOARD_JS,
    )
        .into_response()
}

/// GET /static/dashboard.css
pub async fn serve_dashboard_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        DASHBOARD_CSS,
    )
        .into_response()
}
