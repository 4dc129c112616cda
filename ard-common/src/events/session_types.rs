//! Session-related type definitions
//!
//! Supporting types for the dashboard workflow state and user notifications.

use serde::{Deserialize, Serialize};

/// Dashboard session state
///
/// Exactly one value is active at a time. `Uploading` and `Processing` are the
/// only states that own a progress ticker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Waiting for a file, a model or a run request
    #[default]
    Idle,
    /// Simulated upload in progress
    Uploading,
    /// Analysis executor outstanding
    Processing,
    /// Last run finished with results
    Complete,
    /// Last run failed
    Error,
}

impl SessionState {
    /// True while a ticker owns the progress value and run requests are refused
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::Uploading | SessionState::Processing)
    }

    /// True when the progress value carries meaning for this state
    pub fn shows_progress(&self) -> bool {
        matches!(
            self,
            SessionState::Uploading | SessionState::Processing | SessionState::Complete
        )
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Uploading => write!(f, "Uploading"),
            SessionState::Processing => write!(f, "Processing"),
            SessionState::Complete => write!(f, "Complete"),
            SessionState::Error => write!(f, "Error"),
        }
    }
}

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational toast
    #[default]
    Info,
    /// Something the user has to fix or retry
    Destructive,
}
