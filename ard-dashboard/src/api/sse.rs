//! Server-Sent Events for the dashboard page
//!
//! Streams every `DashboardEvent` (state changes, progress, notifications)
//! with a heartbeat comment every 15 seconds.

use crate::AppState;
use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;

/// GET /events - SSE event stream
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    ard_common::sse::create_event_sse_stream(&state.event_bus, "ard-dashboard")
}
