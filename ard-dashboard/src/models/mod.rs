//! Data models for ard-dashboard
//!
//! - Uploaded file descriptor
//! - Analysis result set
//! - Session snapshot and progress value

pub mod analysis_result;
pub mod session;
pub mod uploaded_file;

pub use analysis_result::{AnalysisResult, ChartPoint, ResultKind, ResultPayload, TextEntry};
pub use session::{ProgressValue, SessionSnapshot, StateTransition};
pub use uploaded_file::UploadedFile;
