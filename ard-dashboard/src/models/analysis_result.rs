//! Analysis result model
//!
//! Wire form matches what the browser page renders:
//! `{"id", "title", "summary", "type": "pie-chart", "data": [{"name", "value"}]}`

use serde::{Deserialize, Serialize};

/// Display category of a result; selects the rendering strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultKind {
    Text,
    BarChart,
    PieChart,
    LineChart,
}

impl ResultKind {
    pub fn is_chart(&self) -> bool {
        !matches!(self, ResultKind::Text)
    }
}

/// Labelled numeric value of a chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

/// Labelled text value of a text result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEntry {
    pub name: String,
    pub value: String,
}

/// Result payload; shape depends on the result kind
///
/// Absent `data` deserializes as an empty series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultPayload {
    /// (label, number) pairs for chart kinds
    Series(Vec<ChartPoint>),
    /// (label, text) pairs for the text kind
    Fields(Vec<TextEntry>),
}

impl Default for ResultPayload {
    fn default() -> Self {
        ResultPayload::Series(Vec::new())
    }
}

impl ResultPayload {
    pub fn len(&self) -> usize {
        match self {
            ResultPayload::Series(points) => points.len(),
            ResultPayload::Fields(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One entry of a result set produced by an analysis executor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Unique within a result set
    pub id: String,
    pub title: String,
    /// Human-readable summary
    pub summary: String,
    #[serde(rename = "type")]
    pub kind: ResultKind,
    #[serde(rename = "data", default)]
    pub payload: ResultPayload,
}

impl AnalysisResult {
    pub fn bar_chart(id: &str, title: &str, summary: &str, points: &[(&str, f64)]) -> Self {
        Self::series(ResultKind::BarChart, id, title, summary, points)
    }

    pub fn pie_chart(id: &str, title: &str, summary: &str, points: &[(&str, f64)]) -> Self {
        Self::series(ResultKind::PieChart, id, title, summary, points)
    }

    pub fn line_chart(id: &str, title: &str, summary: &str, points: &[(&str, f64)]) -> Self {
        Self::series(ResultKind::LineChart, id, title, summary, points)
    }

    pub fn text(id: &str, title: &str, summary: &str, entries: &[(&str, &str)]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            kind: ResultKind::Text,
            payload: ResultPayload::Fields(
                entries
                    .iter()
                    .map(|(name, value)| TextEntry {
                        name: name.to_string(),
                        value: value.to_string(),
                    })
                    .collect(),
            ),
        }
    }

    fn series(kind: ResultKind, id: &str, title: &str, summary: &str, points: &[(&str, f64)]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            kind,
            payload: ResultPayload::Series(
                points
                    .iter()
                    .map(|(name, value)| ChartPoint {
                        name: name.to_string(),
                        value: *value,
                    })
                    .collect(),
            ),
        }
    }

    pub fn is_chart(&self) -> bool {
        self.kind.is_chart()
    }

    /// Payload shape agrees with the kind
    ///
    /// An empty list carries no shape and is accepted for any kind.
    pub fn is_consistent(&self) -> bool {
        match (&self.payload, self.kind) {
            (payload, _) if payload.is_empty() => true,
            (ResultPayload::Series(_), kind) => kind.is_chart(),
            (ResultPayload::Fields(_), kind) => !kind.is_chart(),
        }
    }
}
