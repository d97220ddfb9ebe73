//! JSON report generator.

use super::{
    Dimension, EventRecorder, ReportError, ReportEvent, ReportFormat, ReportMetadata, ReportRenderer, ReportStats,
    Reporter,
};
use crate::api::Element;
use crate::model::{ApiId, ApiMap, Position};
use crate::notes::Notes;
use serde::Serialize;
use std::collections::BTreeSet;

/// JSON report generator
///
/// Records the event stream and renders the missing and different events,
/// in comparison order, each with the notes that apply to its entity.
pub struct JsonReporter<'n> {
    recorder: EventRecorder,
    notes: Option<&'n Notes>,
    equal: Option<bool>,
    /// Pretty print output
    pretty: bool,
}

impl<'n> JsonReporter<'n> {
    /// Create a new JSON reporter
    #[must_use]
    pub fn new() -> Self {
        Self {
            recorder: EventRecorder::new(),
            notes: None,
            equal: None,
            pretty: true,
        }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub const fn with_notes(mut self, notes: Option<&'n Notes>) -> Self {
        self.notes = notes;
        self
    }

    /// The recorded event stream.
    #[must_use]
    pub fn events(&self) -> &[ReportEvent] {
        self.recorder.events()
    }

    fn notes_for(&self, position: &Position) -> Vec<JsonNote> {
        let Some(notes) = self.notes else {
            return Vec::new();
        };
        match notes.lookup(position.element_key()) {
            Ok(found) => found
                .into_iter()
                .map(|(entry, inherited)| JsonNote {
                    signature: entry.name,
                    uri: entry.uri,
                    description: entry.description,
                    inherited,
                })
                .collect(),
            Err(e) => {
                tracing::warn!("Skipping notes for {position}: {e}");
                Vec::new()
            }
        }
    }
}

impl Default for JsonReporter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter<'_> {
    fn comparing(&mut self, position: &Position, elements: &ApiMap<&Element>) {
        self.recorder.comparing(position, elements);
    }

    fn completed(&mut self, position: &Position, equal: bool) {
        self.recorder.completed(position, equal);
    }

    fn completed_all(&mut self, equal: bool) {
        self.equal = Some(equal);
        self.recorder.completed_all(equal);
    }

    fn report_missing(&mut self, position: &Position, missing: &BTreeSet<ApiId>) {
        self.recorder.report_missing(position, missing);
    }

    fn report_different(&mut self, position: &Position, dimension: Dimension, values: &ApiMap<String>) {
        self.recorder.report_different(position, dimension, values);
    }
}

impl ReportRenderer for JsonReporter<'_> {
    fn render(&self, metadata: &ReportMetadata) -> Result<String, ReportError> {
        let stats = self.recorder.stats();
        let differences = self
            .recorder
            .events()
            .iter()
            .filter(|e| e.is_difference())
            .map(|event| JsonDifference {
                event,
                notes: event.position().map(|p| self.notes_for(p)).unwrap_or_default(),
            })
            .collect();

        let report = JsonReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: "api-diff".to_string(),
                    version: metadata.tool_version.clone(),
                },
                generated_at: metadata.generated_at.clone(),
                apis: metadata
                    .apis
                    .iter()
                    .map(|a| ApiInfo {
                        name: &a.name,
                        source: a.source.as_deref(),
                        fingerprint: &a.fingerprint,
                    })
                    .collect(),
            },
            equal: self.equal.unwrap_or_else(|| stats.is_equal()),
            stats,
            differences,
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        json.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn stats(&self) -> ReportStats {
        self.recorder.stats()
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON structures for serialization

#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: JsonReportMetadata<'a>,
    equal: bool,
    stats: ReportStats,
    differences: Vec<JsonDifference<'a>>,
}

#[derive(Serialize)]
struct JsonReportMetadata<'a> {
    tool: ToolInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_at: Option<String>,
    apis: Vec<ApiInfo<'a>>,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Serialize)]
struct ApiInfo<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    fingerprint: &'a str,
}

#[derive(Serialize)]
struct JsonDifference<'a> {
    #[serde(flatten)]
    event: &'a ReportEvent,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    notes: Vec<JsonNote>,
}

#[derive(Serialize)]
struct JsonNote {
    signature: String,
    uri: String,
    description: String,
    inherited: bool,
}
