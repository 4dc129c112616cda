//! Session state model
//!
//! The controller owns one `SessionRecord`; observers only ever see
//! `SessionSnapshot` clones published through the watch store.

use ard_common::events::SessionState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{AnalysisResult, UploadedFile};

/// Percentage clamped to [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressValue(f64);

impl ProgressValue {
    pub const ZERO: ProgressValue = ProgressValue(0.0);
    pub const COMPLETE: ProgressValue = ProgressValue(100.0);

    /// Clamp into range; NaN becomes 0
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 100.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Add `step` without passing `ceiling`; never moves backwards
    pub fn advance(self, step: f64, ceiling: f64) -> Self {
        let step = if step.is_nan() { 0.0 } else { step.max(0.0) };
        let next = (self.0 + step).min(ceiling).max(self.0);
        Self::new(next)
    }

    pub fn is_complete(self) -> bool {
        self.0 >= 100.0
    }
}

impl std::fmt::Display for ProgressValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

/// State transition record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTransition {
    pub session_id: Uuid,
    pub old_state: SessionState,
    pub new_state: SessionState,
    pub transitioned_at: DateTime<Utc>,
}

/// Read-only view of a dashboard session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Controller instance identifier
    pub session_id: Uuid,

    /// Current workflow state
    pub state: SessionState,

    /// Progress of the current upload or run
    pub progress: ProgressValue,

    /// Last accepted file (present once an upload completes)
    pub file: Option<UploadedFile>,

    /// File whose upload is in flight
    pub uploading_file: Option<UploadedFile>,

    /// Selected model id
    pub selected_model: Option<String>,

    /// Identifier of the current or last analysis run
    pub run_id: Option<Uuid>,

    /// Results of the last successful run
    pub results: Vec<AnalysisResult>,

    /// Message of the last failed run
    pub last_error: Option<String>,

    pub updated_at: DateTime<Utc>,
}

impl SessionSnapshot {
    /// Fresh idle session
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            state: SessionState::Idle,
            progress: ProgressValue::ZERO,
            file: None,
            uploading_file: None,
            selected_model: None,
            run_id: None,
            results: Vec::new(),
            last_error: None,
            updated_at: Utc::now(),
        }
    }

    /// Run trigger enabled: file and model present and nothing in flight
    pub fn can_run(&self) -> bool {
        self.file.is_some() && self.selected_model.is_some() && !self.state.is_busy()
    }

    /// Transition to new state
    pub fn transition_to(&mut self, new_state: SessionState) -> StateTransition {
        let transition = StateTransition {
            session_id: self.session_id,
            old_state: self.state,
            new_state,
            transitioned_at: Utc::now(),
        };
        self.state = new_state;
        self.updated_at = transition.transitioned_at;
        transition
    }
}
