//! Mock analysis executor
//!
//! Waits a fixed delay, then returns a canned result set chosen by model id.
//! Never fails.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::{AnalysisExecutor, ExecutorError};
use crate::models::{AnalysisResult, UploadedFile};

/// Canned-data executor
#[derive(Debug, Clone)]
pub struct MockExecutor {
    delay: Duration,
}

impl MockExecutor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for MockExecutor {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

#[async_trait]
impl AnalysisExecutor for MockExecutor {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn run(
        &self,
        file: &UploadedFile,
        model_id: &str,
    ) -> Result<Vec<AnalysisResult>, ExecutorError> {
        debug!(file = %file.name, model_id, delay_ms = self.delay.as_millis() as u64, "Mock analysis started");
        tokio::time::sleep(self.delay).await;
        Ok(canned_results(model_id))
    }
}

/// Result set for a model id; unrecognized ids get the generic fallback
pub fn canned_results(model_id: &str) -> Vec<AnalysisResult> {
    match model_id {
        "text-analysis" | "sentiment-analysis" => vec![
            AnalysisResult::pie_chart(
                "sentiment",
                "Sentiment Analysis",
                "The overall sentiment is positive with 72% confidence.",
                &[("Positive", 72.0), ("Neutral", 18.0), ("Negative", 10.0)],
            ),
            AnalysisResult::bar_chart(
                "keywords",
                "Key Topics",
                "The most frequent topics found in the document.",
                &[
                    ("Technology", 65.0),
                    ("Innovation", 48.0),
                    ("Research", 37.0),
                    ("Data", 30.0),
                    ("Cloud", 25.0),
                ],
            ),
            AnalysisResult::text(
                "text-details",
                "Detailed Text Analysis",
                "Complete analysis of the document content including entities, language style, and readability metrics.",
                &[
                    ("Word Count", "1250"),
                    ("Readability", "College level"),
                    ("Top Entities", "Cloud AI, Machine Learning, Data Analysis"),
                    ("Language Style", "Technical, Informational"),
                    ("Reading Time", "5 minutes"),
                ],
            ),
        ],
        "image-classification" | "object-detection" => vec![
            AnalysisResult::bar_chart(
                "objects",
                "Detected Objects",
                "Objects identified in the image with confidence scores.",
                &[
                    ("Person", 98.0),
                    ("Building", 85.0),
                    ("Car", 76.0),
                    ("Tree", 65.0),
                    ("Sky", 95.0),
                ],
            ),
            AnalysisResult::pie_chart(
                "scene",
                "Scene Classification",
                "The image was classified as an outdoor urban scene with 94% confidence.",
                &[("Urban", 94.0), ("Indoor", 3.0), ("Nature", 3.0)],
            ),
        ],
        "data-clustering" => vec![
            AnalysisResult::pie_chart(
                "clusters",
                "Data Clusters",
                "Identified groups within the dataset.",
                &[("Cluster 1", 45.0), ("Cluster 2", 30.0), ("Cluster 3", 25.0)],
            ),
            AnalysisResult::line_chart(
                "trend",
                "Data Trend Analysis",
                "Trend line showing patterns in the data over time.",
                &[
                    ("Jan", 34.0),
                    ("Feb", 45.0),
                    ("Mar", 40.0),
                    ("Apr", 65.0),
                    ("May", 85.0),
                    ("Jun", 72.0),
                ],
            ),
        ],
        _ => vec![AnalysisResult::text(
            "default",
            "Analysis Results",
            "Basic analysis completed successfully.",
            &[("Status", "Completed"), ("Confidence", "High")],
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResultKind;
    use crate::services::executor::validate_results;

    fn ids(results: &[AnalysisResult]) -> Vec<&str> {
        results.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_text_models_share_result_set() {
        assert_eq!(ids(&canned_results("text-analysis")), vec!["sentiment", "keywords", "text-details"]);
        assert_eq!(canned_results("text-analysis"), canned_results("sentiment-analysis"));
    }

    #[test]
    fn test_vision_models() {
        assert_eq!(ids(&canned_results("object-detection")), vec!["objects", "scene"]);
        assert_eq!(ids(&canned_results("image-classification")), vec!["objects", "scene"]);
    }

    #[test]
    fn test_clustering_has_line_chart() {
        let results = canned_results("data-clustering");
        assert_eq!(results[1].kind, ResultKind::LineChart);
    }

    #[test]
    fn test_unknown_and_prefix_ids_fall_back() {
        assert_eq!(ids(&canned_results("unknown-id")), vec!["default"]);
        assert_eq!(ids(&canned_results("text-analysis-v2")), vec!["default"]);
        assert_eq!(ids(&canned_results("")), vec!["default"]);
    }

    #[test]
    fn test_every_canned_set_is_renderable() {
        for model in ["text-analysis", "object-detection", "data-clustering", "other"] {
            assert!(validate_results(&canned_results(model)).is_ok(), "{}", model);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_waits_for_delay() {
        let executor = MockExecutor::default();
        let file = UploadedFile::new("a.txt", 1, "text/plain");
        let start = tokio::time::Instant::now();

        let results = executor.run(&file, "data-clustering").await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }
}
