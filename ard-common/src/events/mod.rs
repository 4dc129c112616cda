//! Event types for the dashboard event system
//!
//! Provides shared event definitions and the EventBus used to fan workflow
//! activity out to SSE clients and other observers.

mod session_types;

pub use session_types::{SessionState, Severity};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Dashboard event types
///
/// Events are broadcast via EventBus and serialized for SSE transmission.
/// The `type` tag doubles as the SSE event name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DashboardEvent {
    /// Session moved between workflow states
    ///
    /// Triggers:
    /// - SSE: Update status panel and enable/disable the run button
    SessionStateChanged {
        session_id: Uuid,
        old_state: SessionState,
        new_state: SessionState,
        timestamp: DateTime<Utc>,
    },

    /// Progress value changed while uploading or processing
    ProgressUpdate {
        session_id: Uuid,
        /// State owning the progress value
        state: SessionState,
        /// Percentage (0.0 - 100.0)
        progress: f64,
        timestamp: DateTime<Utc>,
    },

    /// A file passed intake and finished its simulated upload
    FileAccepted {
        session_id: Uuid,
        file_name: String,
        size_bytes: u64,
        media_type: String,
        timestamp: DateTime<Utc>,
    },

    /// Model selection changed (None = cleared)
    ModelSelected {
        session_id: Uuid,
        model_id: Option<String>,
        timestamp: DateTime<Utc>,
    },

    /// Analysis run handed to the executor
    AnalysisStarted {
        session_id: Uuid,
        run_id: Uuid,
        model_id: String,
        timestamp: DateTime<Utc>,
    },

    /// Analysis run produced results
    AnalysisCompleted {
        session_id: Uuid,
        run_id: Uuid,
        result_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// Analysis run failed
    AnalysisFailed {
        session_id: Uuid,
        run_id: Uuid,
        error: String,
        timestamp: DateTime<Utc>,
    },

    /// Transient user-facing message (toast)
    ///
    /// Fire-and-forget: no acknowledgement is expected.
    Notification {
        title: String,
        description: String,
        severity: Severity,
        timestamp: DateTime<Utc>,
    },
}

impl DashboardEvent {
    /// Get event type as string for filtering
    pub fn event_type(&self) -> &str {
        match self {
            DashboardEvent::SessionStateChanged { .. } => "SessionStateChanged",
            DashboardEvent::ProgressUpdate { .. } => "ProgressUpdate",
            DashboardEvent::FileAccepted { .. } => "FileAccepted",
            DashboardEvent::ModelSelected { .. } => "ModelSelected",
            DashboardEvent::AnalysisStarted { .. } => "AnalysisStarted",
            DashboardEvent::AnalysisCompleted { .. } => "AnalysisCompleted",
            DashboardEvent::AnalysisFailed { .. } => "AnalysisFailed",
            DashboardEvent::Notification { .. } => "Notification",
        }
    }

    /// Build a notification event stamped with the current time
    pub fn notification(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        DashboardEvent::Notification {
            title: title.into(),
            description: description.into(),
            severity,
            timestamp: Utc::now(),
        }
    }
}

// ========================================
// EventBus Implementation
// ========================================

/// Central event distribution bus
///
/// The EventBus uses tokio::broadcast internally, providing:
/// - Non-blocking publish (slow subscribers don't block producers)
/// - Multiple concurrent subscribers
/// - Lagged message detection for slow subscribers
///
/// # Examples
///
/// ```
/// use ard_common::events::{DashboardEvent, EventBus, Severity};
///
/// let event_bus = EventBus::new(100);
/// let mut rx = event_bus.subscribe();
///
/// event_bus.emit_lossy(DashboardEvent::notification(
///     "Analysis complete",
///     "View your results below",
///     Severity::Info,
/// ));
///
/// let received = rx.try_recv().unwrap();
/// assert_eq!(received.event_type(), "Notification");
/// ```
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DashboardEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// `capacity` is the number of events buffered before the oldest are
    /// dropped for lagging subscribers. Tests typically use 10-100.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists,
    /// `Err` if nobody is listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: DashboardEvent,
    ) -> Result<usize, broadcast::error::SendError<DashboardEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: DashboardEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
