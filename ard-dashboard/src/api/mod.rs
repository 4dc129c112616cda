//! HTTP API handlers for ard-dashboard
//!
//! REST endpoints drive the session workflow; `/events` streams
//! `DashboardEvent`s to the browser page.

pub mod catalog;
pub mod health;
pub mod session;
pub mod sse;
pub mod ui;

pub use catalog::catalog_routes;
pub use health::health_routes;
pub use session::session_routes;
pub use sse::event_stream;
pub use ui::ui_routes;
