//! Remote analysis executor
//!
//! Posts the file descriptor and model id to an inference service and
//! expects `{"results": [AnalysisResult, ...]}` back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{validate_results, AnalysisExecutor, ExecutorError};
use crate::models::{AnalysisResult, UploadedFile};

const USER_AGENT: &str = concat!("ard-dashboard/", env!("CARGO_PKG_VERSION"));

/// Request body sent to the inference service
#[derive(Debug, Serialize)]
pub struct RemoteAnalysisRequest<'a> {
    pub model_id: &'a str,
    pub file: &'a UploadedFile,
}

/// Response body expected from the inference service
#[derive(Debug, Deserialize, Serialize)]
pub struct RemoteAnalysisResponse {
    pub results: Vec<AnalysisResult>,
}

/// HTTP inference client
pub struct RemoteExecutor {
    http_client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl RemoteExecutor {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ExecutorError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ExecutorError::Transport(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.to_string(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_send_error(&self, e: reqwest::Error) -> ExecutorError {
        if e.is_timeout() {
            ExecutorError::Timeout {
                after_ms: self.timeout.as_millis() as u64,
            }
        } else {
            ExecutorError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl AnalysisExecutor for RemoteExecutor {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn run(
        &self,
        file: &UploadedFile,
        model_id: &str,
    ) -> Result<Vec<AnalysisResult>, ExecutorError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            model_id,
            file = %file.name,
            "Requesting remote analysis"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&RemoteAnalysisRequest { model_id, file })
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExecutorError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: RemoteAnalysisResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.map_send_error(e)
            } else {
                ExecutorError::InvalidResponse(e.to_string())
            }
        })?;

        validate_results(&body.results)?;

        tracing::info!(
            model_id,
            result_count = body.results.len(),
            "Remote analysis returned results"
        );

        Ok(body.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let executor = RemoteExecutor::new("http://127.0.0.1:1/analyze", Duration::from_secs(1));
        assert!(executor.is_ok());
    }

    #[test]
    fn test_request_body_shape() {
        let file = UploadedFile::new("photo.jpg", 2048, "image/jpeg");
        let body = serde_json::to_value(RemoteAnalysisRequest {
            model_id: "object-detection",
            file: &file,
        })
        .unwrap();

        assert_eq!(body["model_id"], "object-detection");
        assert_eq!(body["file"]["media_type"], "image/jpeg");
        assert_eq!(body["file"]["size_bytes"], 2048);
    }
}
