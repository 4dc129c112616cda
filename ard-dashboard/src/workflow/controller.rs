//! Dashboard session state machine
//!
//! # State Progression
//! IDLE → UPLOADING → IDLE (file stored) → PROCESSING → COMPLETE | ERROR
//!
//! COMPLETE and ERROR accept a new upload or a new run exactly like IDLE.
//!
//! # Concurrency
//! One controller owns one session. All mutation happens under a single
//! `tokio::sync::Mutex`; observers read clones published on a `watch`
//! channel. At most one ticker exists at a time, stored in the session
//! record and cancelled under the lock on every exit from its state.

use ard_common::events::{DashboardEvent, EventBus, SessionState, Severity};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::ticker::{TickFlow, Ticker};
use crate::config::{DashboardConfig, TimingConfig};
use crate::models::{AnalysisResult, ProgressValue, SessionSnapshot, UploadedFile};
use crate::services::executor::{self, AnalysisExecutor, ExecutorError};
use crate::services::{FileIntake, IntakeError, ModelCatalog};

/// Workflow request refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// File failed intake validation
    #[error(transparent)]
    Intake(#[from] IntakeError),

    /// Run requested without a file or without a model
    #[error("Missing information: file present = {file_present}, model selected = {model_selected}")]
    MissingSelection {
        file_present: bool,
        model_selected: bool,
    },

    /// Request not allowed while an upload or run is in flight
    #[error("Session is busy ({state})")]
    Busy { state: SessionState },
}

/// Mutable session data guarded by the controller lock
struct SessionRecord {
    snapshot: SessionSnapshot,
    ticker: Option<Ticker>,
    rng: StdRng,
}

impl SessionRecord {
    /// Cancel and release the active ticker; true if one was running
    fn stop_ticker(&mut self) -> bool {
        match self.ticker.take() {
            Some(ticker) => {
                ticker.cancel();
                debug!(ticker = ticker.name(), "Ticker cancelled");
                true
            }
            None => false,
        }
    }
}

struct Shared {
    session_id: Uuid,
    intake: FileIntake,
    catalog: ModelCatalog,
    executor: Arc<dyn AnalysisExecutor>,
    timing: TimingConfig,
    event_bus: EventBus,
    record: Mutex<SessionRecord>,
    store: watch::Sender<SessionSnapshot>,
}

/// Workflow controller handle; clones share the same session
#[derive(Clone)]
pub struct WorkflowController {
    shared: Arc<Shared>,
}

impl WorkflowController {
    pub fn new(
        intake: FileIntake,
        catalog: ModelCatalog,
        executor: Arc<dyn AnalysisExecutor>,
        timing: TimingConfig,
        event_bus: EventBus,
    ) -> Self {
        let session_id = Uuid::new_v4();
        let snapshot = SessionSnapshot::new(session_id);
        let (store, _) = watch::channel(snapshot.clone());
        let rng = match timing.progress_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            session_id = %session_id,
            executor = executor.name(),
            models = catalog.list().len(),
            "Workflow controller created"
        );

        Self {
            shared: Arc::new(Shared {
                session_id,
                intake,
                catalog,
                executor,
                timing,
                event_bus,
                record: Mutex::new(SessionRecord {
                    snapshot,
                    ticker: None,
                    rng,
                }),
                store,
            }),
        }
    }

    /// Build intake, catalog and executor from configuration
    pub fn from_config(config: &DashboardConfig, event_bus: EventBus) -> Result<Self, ExecutorError> {
        Ok(Self::new(
            FileIntake::from_config(&config.intake),
            ModelCatalog::from_config(config.models.as_deref()),
            executor::from_config(&config.executor)?,
            config.timing.clone(),
            event_bus,
        ))
    }

    pub fn session_id(&self) -> Uuid {
        self.shared.session_id
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.shared.catalog
    }

    pub fn intake(&self) -> &FileIntake {
        &self.shared.intake
    }

    /// Current session view
    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.store.borrow().clone()
    }

    /// Observe every published session view
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.shared.store.subscribe()
    }

    /// Run trigger enabled
    pub fn can_run(&self) -> bool {
        self.shared.store.borrow().can_run()
    }

    /// A progress ticker is currently live
    pub async fn is_ticking(&self) -> bool {
        let record = self.shared.record.lock().await;
        record.ticker.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// Validate a file and start its simulated upload
    ///
    /// Rejected files notify the user and leave the session untouched.
    pub async fn submit_file(&self, file: UploadedFile) -> Result<(), WorkflowError> {
        self.shared.submit_file(file).await
    }

    /// Select the model used by the next run
    pub async fn select_model(&self, model_id: &str) -> Result<(), WorkflowError> {
        self.shared.set_model(Some(model_id)).await
    }

    /// Clear the model selection
    pub async fn clear_model(&self) -> Result<(), WorkflowError> {
        self.shared.set_model(None).await
    }

    /// Start an analysis run; returns the run id
    ///
    /// The executor runs in the background; the run settles into `Complete`
    /// or `Error` without further calls.
    pub async fn run_analysis(&self) -> Result<Uuid, WorkflowError> {
        self.shared.run_analysis().await
    }

    /// Stop any live ticker (service shutdown)
    pub async fn shutdown(&self) {
        let mut record = self.shared.record.lock().await;
        if record.stop_ticker() {
            info!(session_id = %self.shared.session_id, "Ticker stopped on shutdown");
        }
    }
}

impl Shared {
    async fn submit_file(self: &Arc<Self>, file: UploadedFile) -> Result<(), WorkflowError> {
        let file = match self.intake.validate(file) {
            Ok(file) => file,
            Err(e) => {
                warn!(session_id = %self.session_id, error = %e, "File rejected by intake");
                self.notify(e.title(), e.description(), Severity::Destructive);
                return Err(e.into());
            }
        };

        let mut record = self.record.lock().await;
        if record.snapshot.state.is_busy() {
            debug!(state = %record.snapshot.state, "File submission ignored while busy");
            return Err(WorkflowError::Busy {
                state: record.snapshot.state,
            });
        }

        info!(
            session_id = %self.session_id,
            file = %file.name,
            size_bytes = file.size_bytes,
            media_type = %file.media_type,
            "Upload started"
        );

        record.stop_ticker();
        record.snapshot.uploading_file = Some(file);
        record.snapshot.progress = ProgressValue::ZERO;
        self.transition(&mut record, SessionState::Uploading);
        self.emit_progress(&record);
        record.ticker = Some(self.spawn_upload_ticker());
        self.publish(&record);
        Ok(())
    }

    async fn set_model(&self, model_id: Option<&str>) -> Result<(), WorkflowError> {
        let model_id = model_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        let mut record = self.record.lock().await;
        if record.snapshot.state == SessionState::Processing {
            return Err(WorkflowError::Busy {
                state: record.snapshot.state,
            });
        }

        if let Some(id) = &model_id {
            if !self.catalog.contains(id) {
                warn!(session_id = %self.session_id, model_id = %id, "Selected model is not in the catalog");
            }
        }
        if record.snapshot.selected_model == model_id {
            return Ok(());
        }

        debug!(session_id = %self.session_id, model_id = ?model_id, "Model selection changed");
        record.snapshot.selected_model = model_id.clone();
        record.snapshot.updated_at = Utc::now();
        self.event_bus.emit_lossy(DashboardEvent::ModelSelected {
            session_id: self.session_id,
            model_id,
            timestamp: Utc::now(),
        });
        self.publish(&record);
        Ok(())
    }

    async fn run_analysis(self: &Arc<Self>) -> Result<Uuid, WorkflowError> {
        let mut record = self.record.lock().await;
        if record.snapshot.state.is_busy() {
            debug!(state = %record.snapshot.state, "Run request ignored while busy");
            return Err(WorkflowError::Busy {
                state: record.snapshot.state,
            });
        }

        let (file, model_id) = match (
            record.snapshot.file.clone(),
            record.snapshot.selected_model.clone(),
        ) {
            (Some(file), Some(model_id)) => (file, model_id),
            (file, model_id) => {
                drop(record);
                self.notify(
                    "Missing information",
                    "Please select both a file and an AI model",
                    Severity::Destructive,
                );
                return Err(WorkflowError::MissingSelection {
                    file_present: file.is_some(),
                    model_selected: model_id.is_some(),
                });
            }
        };

        let run_id = Uuid::new_v4();
        record.stop_ticker();
        record.snapshot.run_id = Some(run_id);
        record.snapshot.progress = ProgressValue::ZERO;
        record.snapshot.results.clear();
        record.snapshot.last_error = None;
        self.transition(&mut record, SessionState::Processing);
        self.emit_progress(&record);
        record.ticker = Some(self.spawn_processing_ticker());
        self.publish(&record);
        drop(record);

        info!(
            session_id = %self.session_id,
            run_id = %run_id,
            model_id = %model_id,
            file = %file.name,
            executor = self.executor.name(),
            "Analysis run started"
        );
        self.event_bus.emit_lossy(DashboardEvent::AnalysisStarted {
            session_id: self.session_id,
            run_id,
            model_id: model_id.clone(),
            timestamp: Utc::now(),
        });

        let shared = Arc::clone(self);
        tokio::spawn(async move {
            let executor = Arc::clone(&shared.executor);
            // Inner task so a panicking executor still settles the run
            let outcome = match tokio::spawn(async move { executor.run(&file, &model_id).await }).await {
                Ok(outcome) => outcome,
                Err(join_error) => Err(ExecutorError::Failed(format!(
                    "executor task aborted: {}",
                    join_error
                ))),
            };
            shared.settle(run_id, outcome).await;
        });

        Ok(run_id)
    }

    /// Executor finished: stop the processing ticker and record the outcome
    async fn settle(&self, run_id: Uuid, outcome: Result<Vec<AnalysisResult>, ExecutorError>) {
        let mut record = self.record.lock().await;
        if record.snapshot.run_id != Some(run_id)
            || record.snapshot.state != SessionState::Processing
        {
            warn!(run_id = %run_id, "Ignoring settlement of a stale run");
            return;
        }

        record.stop_ticker();

        let outcome = outcome.and_then(|results| {
            executor::validate_results(&results)?;
            Ok(results)
        });

        match outcome {
            Ok(results) => {
                info!(
                    session_id = %self.session_id,
                    run_id = %run_id,
                    result_count = results.len(),
                    "Analysis run completed"
                );
                let result_count = results.len();
                record.snapshot.progress = ProgressValue::COMPLETE;
                record.snapshot.results = results;
                self.transition(&mut record, SessionState::Complete);
                self.emit_progress(&record);
                self.publish(&record);
                drop(record);

                self.event_bus.emit_lossy(DashboardEvent::AnalysisCompleted {
                    session_id: self.session_id,
                    run_id,
                    result_count,
                    timestamp: Utc::now(),
                });
                self.notify("Analysis complete", "View your results below", Severity::Info);
            }
            Err(e) => {
                warn!(
                    session_id = %self.session_id,
                    run_id = %run_id,
                    error = %e,
                    "Analysis run failed"
                );
                record.snapshot.results.clear();
                record.snapshot.last_error = Some(e.to_string());
                self.transition(&mut record, SessionState::Error);
                self.publish(&record);
                drop(record);

                self.event_bus.emit_lossy(DashboardEvent::AnalysisFailed {
                    session_id: self.session_id,
                    run_id,
                    error: e.to_string(),
                    timestamp: Utc::now(),
                });
                self.notify(
                    "Processing failed",
                    "There was an error processing your file",
                    Severity::Destructive,
                );
            }
        }
    }

    fn spawn_upload_ticker(self: &Arc<Self>) -> Ticker {
        let weak = Arc::downgrade(self);
        Ticker::spawn("upload", self.timing.upload_period(), move |token| {
            let weak = weak.clone();
            async move {
                match weak.upgrade() {
                    Some(shared) => shared.upload_tick(token).await,
                    None => TickFlow::Stop,
                }
            }
        })
    }

    fn spawn_processing_ticker(self: &Arc<Self>) -> Ticker {
        let weak = Arc::downgrade(self);
        Ticker::spawn("processing", self.timing.processing_period(), move |token| {
            let weak = weak.clone();
            async move {
                match weak.upgrade() {
                    Some(shared) => shared.processing_tick(token).await,
                    None => TickFlow::Stop,
                }
            }
        })
    }

    async fn upload_tick(&self, token: CancellationToken) -> TickFlow {
        let mut record = self.record.lock().await;
        if token.is_cancelled() || record.snapshot.state != SessionState::Uploading {
            return TickFlow::Stop;
        }

        record.snapshot.progress = record
            .snapshot
            .progress
            .advance(self.timing.upload_step, 100.0);
        self.emit_progress(&record);

        if !record.snapshot.progress.is_complete() {
            self.publish(&record);
            return TickFlow::Continue;
        }

        record.stop_ticker();
        let file = record.snapshot.uploading_file.take();
        record.snapshot.file = file.clone();
        self.transition(&mut record, SessionState::Idle);
        self.publish(&record);
        drop(record);

        if let Some(file) = file {
            info!(session_id = %self.session_id, file = %file.name, "Upload complete");
            self.event_bus.emit_lossy(DashboardEvent::FileAccepted {
                session_id: self.session_id,
                file_name: file.name.clone(),
                size_bytes: file.size_bytes,
                media_type: file.media_type.clone(),
                timestamp: Utc::now(),
            });
            self.notify(
                "File uploaded successfully",
                format!("{} is ready for processing", file.name),
                Severity::Info,
            );
        }

        TickFlow::Stop
    }

    async fn processing_tick(&self, token: CancellationToken) -> TickFlow {
        let mut record = self.record.lock().await;
        if token.is_cancelled() || record.snapshot.state != SessionState::Processing {
            return TickFlow::Stop;
        }

        let max_step = self.timing.processing_max_step;
        let step = if max_step.is_finite() && max_step > 0.0 {
            record.rng.gen_range(0.0..max_step)
        } else {
            0.0
        };
        let next = record
            .snapshot
            .progress
            .advance(step, self.timing.processing_ceiling);

        if next != record.snapshot.progress {
            record.snapshot.progress = next;
            self.emit_progress(&record);
            self.publish(&record);
        }

        TickFlow::Continue
    }

    fn transition(&self, record: &mut SessionRecord, new_state: SessionState) {
        let transition = record.snapshot.transition_to(new_state);
        info!(
            session_id = %transition.session_id,
            old_state = %transition.old_state,
            new_state = %transition.new_state,
            "Session state transition"
        );
        self.event_bus.emit_lossy(DashboardEvent::SessionStateChanged {
            session_id: transition.session_id,
            old_state: transition.old_state,
            new_state: transition.new_state,
            timestamp: transition.transitioned_at,
        });
    }

    fn emit_progress(&self, record: &SessionRecord) {
        self.event_bus.emit_lossy(DashboardEvent::ProgressUpdate {
            session_id: self.session_id,
            state: record.snapshot.state,
            progress: record.snapshot.progress.value(),
            timestamp: Utc::now(),
        });
    }

    fn publish(&self, record: &SessionRecord) {
        self.store.send_replace(record.snapshot.clone());
    }

    fn notify(&self, title: &str, description: impl Into<String>, severity: Severity) {
        let description = description.into();
        debug!(title, description = %description, ?severity, "Notification");
        self.event_bus
            .emit_lossy(DashboardEvent::notification(title, description, severity));
    }
}
