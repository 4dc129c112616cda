//! Dashboard workflow engine
//!
//! Drives one session through upload, model selection and analysis:
//! - `controller`: the session state machine and its operations
//! - `ticker`: cancellable periodic task driving simulated progress

pub mod controller;
pub mod ticker;

pub use controller::{WorkflowController, WorkflowError};
pub use ticker::{TickFlow, Ticker};
