//! Service modules for the dashboard workflow
//!
//! - File intake validation
//! - Model catalog
//! - Analysis executors (mock + remote)

pub mod catalog;
pub mod executor;
pub mod intake;

pub use catalog::{group_by_category, CategoryGroup, ModelCatalog, ModelDescriptor};
pub use executor::{AnalysisExecutor, ExecutorError, MockExecutor, RemoteExecutor};
pub use intake::{AcceptList, AcceptedType, FileIntake, IntakeError};
