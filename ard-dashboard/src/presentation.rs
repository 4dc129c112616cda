//! Results and status presentation
//!
//! Pure functions over borrowed session data. Nothing here mutates a result
//! set; the HTTP layer serializes what these produce and the browser page
//! draws it.

use ard_common::events::SessionState;
use serde::Serialize;

use crate::models::{AnalysisResult, ChartPoint, ProgressValue, ResultKind, ResultPayload};

/// How the page draws one result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderStrategy {
    Bar,
    Pie,
    Line,
    RawText,
}

pub fn render_strategy(kind: ResultKind) -> RenderStrategy {
    match kind {
        ResultKind::BarChart => RenderStrategy::Bar,
        ResultKind::PieChart => RenderStrategy::Pie,
        ResultKind::LineChart => RenderStrategy::Line,
        ResultKind::Text => RenderStrategy::RawText,
    }
}

/// One result prepared for drawing
#[derive(Debug, Clone, Serialize)]
pub struct RenderedResult<'a> {
    #[serde(flatten)]
    pub result: &'a AnalysisResult,
    pub render: RenderStrategy,
    /// Slice labels ("Positive: 72%"), pie charts only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Pretty JSON of the payload, raw-text results only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl<'a> RenderedResult<'a> {
    pub fn new(result: &'a AnalysisResult) -> Self {
        let render = render_strategy(result.kind);
        let labels = match (render, &result.payload) {
            (RenderStrategy::Pie, ResultPayload::Series(points)) => Some(pie_labels(points)),
            _ => None,
        };
        let text = match render {
            RenderStrategy::RawText => Some(text_dump(result)),
            _ => None,
        };

        Self {
            result,
            render,
            labels,
            text,
        }
    }
}

/// Borrowed view over a result set, split the way the page shows it
#[derive(Debug, Clone, Copy)]
pub struct ResultsView<'a> {
    results: &'a [AnalysisResult],
}

impl<'a> ResultsView<'a> {
    pub fn new(results: &'a [AnalysisResult]) -> Self {
        Self { results }
    }

    /// Chart-bearing results, in set order
    pub fn visual(&self) -> Vec<RenderedResult<'a>> {
        self.results
            .iter()
            .filter(|r| r.is_chart())
            .map(RenderedResult::new)
            .collect()
    }

    /// Every result, in set order
    pub fn detailed(&self) -> Vec<RenderedResult<'a>> {
        self.results.iter().map(RenderedResult::new).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Payload as indented JSON
pub fn text_dump(result: &AnalysisResult) -> String {
    // Payload holds only strings and finite-or-null numbers
    serde_json::to_string_pretty(&result.payload).unwrap_or_else(|_| "[]".to_string())
}

/// "name: share%" for each slice, share of the series total
///
/// A zero or non-finite total labels every slice 0%.
pub fn pie_labels(points: &[ChartPoint]) -> Vec<String> {
    let total: f64 = points.iter().map(|p| p.value).sum();
    points
        .iter()
        .map(|p| {
            let share = if total.is_finite() && total > 0.0 {
                p.value / total * 100.0
            } else {
                0.0
            };
            format!("{}: {:.0}%", p.name, share)
        })
        .collect()
}

/// Status panel heading
pub fn status_message(state: SessionState) -> &'static str {
    match state {
        SessionState::Idle => "Waiting to start",
        SessionState::Uploading => "Uploading file...",
        SessionState::Processing => "Processing with AI model...",
        SessionState::Complete => "Processing complete!",
        SessionState::Error => "An error occurred",
    }
}

/// Progress shown on the status panel; None hides the bar
pub fn displayed_progress(state: SessionState, progress: ProgressValue) -> Option<f64> {
    match state {
        SessionState::Complete => Some(100.0),
        SessionState::Uploading | SessionState::Processing => Some(progress.value()),
        SessionState::Idle | SessionState::Error => None,
    }
}
