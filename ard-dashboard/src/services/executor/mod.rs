//! Analysis executor capability
//!
//! The workflow depends only on [`AnalysisExecutor`]: given an accepted file
//! and a model id, eventually produce an ordered result set or a typed
//! failure. `MockExecutor` returns canned data; `RemoteExecutor` calls an
//! inference service over HTTP.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{ExecutorConfig, ExecutorKind};
use crate::models::{AnalysisResult, UploadedFile};

pub mod mock;
pub mod remote;

pub use mock::MockExecutor;
pub use remote::RemoteExecutor;

/// Executor failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecutorError {
    /// No answer within the configured timeout
    #[error("Analysis timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    /// Connection or protocol failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Service answered with a non-success status
    #[error("Analysis service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Service answered with data the dashboard cannot render
    #[error("Invalid analysis response: {0}")]
    InvalidResponse(String),

    /// Any other failure reported by an executor
    #[error("Analysis failed: {0}")]
    Failed(String),
}

/// Analysis executor trait - every backend implements this
#[async_trait]
pub trait AnalysisExecutor: Send + Sync {
    /// Backend identifier for logs (e.g. "mock", "remote")
    fn name(&self) -> &'static str;

    /// Analyze `file` with model `model_id`
    ///
    /// # Returns
    /// * `Ok(results)` - ordered result set, ids unique within the set
    /// * `Err(_)` - the run failed; the workflow moves to `Error`
    async fn run(
        &self,
        file: &UploadedFile,
        model_id: &str,
    ) -> Result<Vec<AnalysisResult>, ExecutorError>;
}

/// Build the executor selected in configuration
pub fn from_config(config: &ExecutorConfig) -> Result<Arc<dyn AnalysisExecutor>, ExecutorError> {
    match config.kind {
        ExecutorKind::Mock => Ok(Arc::new(MockExecutor::new(std::time::Duration::from_millis(
            config.mock_delay_ms,
        )))),
        ExecutorKind::Remote => {
            let endpoint = config.endpoint.as_deref().ok_or_else(|| {
                ExecutorError::Failed("remote executor requires an endpoint".to_string())
            })?;
            let executor = RemoteExecutor::new(
                endpoint,
                std::time::Duration::from_millis(config.timeout_ms),
            )?;
            Ok(Arc::new(executor))
        }
    }
}

/// Check that a result set can be rendered: unique ids, payload matching kind
pub fn validate_results(results: &[AnalysisResult]) -> Result<(), ExecutorError> {
    let mut seen = std::collections::HashSet::new();
    for result in results {
        if !seen.insert(result.id.as_str()) {
            return Err(ExecutorError::InvalidResponse(format!(
                "duplicate result id: {}",
                result.id
            )));
        }
        if !result.is_consistent() {
            return Err(ExecutorError::InvalidResponse(format!(
                "payload of result {} does not match kind {:?}",
                result.id, result.kind
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResultKind;

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let results = vec![
            AnalysisResult::text("a", "A", "a", &[]),
            AnalysisResult::text("a", "A again", "a", &[]),
        ];
        assert!(matches!(
            validate_results(&results),
            Err(ExecutorError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_kind_mismatch() {
        let mut result = AnalysisResult::text("t", "T", "t", &[("k", "v")]);
        result.kind = ResultKind::LineChart;
        assert!(validate_results(&[result]).is_err());
    }

    #[test]
    fn test_from_config_mock() {
        let executor = from_config(&ExecutorConfig::default()).unwrap();
        assert_eq!(executor.name(), "mock");
    }

    #[test]
    fn test_from_config_remote_without_endpoint() {
        let config = ExecutorConfig {
            kind: ExecutorKind::Remote,
            ..Default::default()
        };
        assert!(from_config(&config).is_err());
    }
}
