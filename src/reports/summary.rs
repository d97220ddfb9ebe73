//! Summary report generator for shell output.
//!
//! Differences are grouped under the signature of the entity they belong to:
//!
//! ```text
//! method mA/p.C#m(int)
//!   note: https://bugs.example.org/1 renamed in 2.0
//!   parameter 1 of method mA/p.C#m(int): different names
//!     v1: count
//!     v2: size
//! ```

use super::{Dimension, ReportError, ReportFormat, ReportMetadata, ReportRenderer, ReportStats, Reporter};
use crate::api::Element;
use crate::model::{display_signature, ApiId, ApiMap, Position};
use crate::notes::Notes;
use std::collections::{BTreeMap, BTreeSet};

const MAX_VALUE_LEN: usize = 100;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter<'n> {
    /// Use colored output
    colored: bool,
    notes: Option<&'n Notes>,
    /// Signatures of the entities currently open
    signatures: BTreeMap<Position, String>,
    /// Entity whose header was written last
    header: Option<Position>,
    lines: Vec<String>,
    stats: ReportStats,
}

impl<'n> SummaryReporter<'n> {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            colored: true,
            notes: None,
            signatures: BTreeMap::new(),
            header: None,
            lines: Vec::new(),
            stats: ReportStats {
                compared: 0,
                missing: 0,
                different: 0,
            },
        }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    /// Show notes matching each reported entity
    #[must_use]
    pub const fn with_notes(mut self, notes: Option<&'n Notes>) -> Self {
        self.notes = notes;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    /// Write the entity header and its notes before the first report for it.
    fn enter(&mut self, position: &Position) {
        let element = position.element_position();
        if self.header.as_ref() == Some(element) {
            return;
        }
        let signature = self
            .signatures
            .get(element)
            .cloned()
            .unwrap_or_else(|| element.to_string());

        self.lines.push(String::new());
        self.lines.push(self.color(&signature, "bold"));
        self.push_notes(element);
        self.header = Some(element.clone());
    }

    fn push_notes(&mut self, element: &Position) {
        let Some(notes) = self.notes else {
            return;
        };
        match notes.lookup(element.element_key()) {
            Ok(found) => {
                for (entry, inherited) in found {
                    let suffix = if inherited {
                        format!(" (from {})", entry.name)
                    } else {
                        String::new()
                    };
                    let text = if entry.description.is_empty() {
                        format!("  note: {}{suffix}", entry.uri)
                    } else {
                        format!("  note: {} {}{suffix}", entry.uri, entry.description)
                    };
                    self.lines.push(self.color(&text, "cyan"));
                }
            }
            Err(e) => tracing::warn!("Skipping notes for {element}: {e}"),
        }
    }
}

impl Default for SummaryReporter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for SummaryReporter<'_> {
    fn comparing(&mut self, position: &Position, elements: &ApiMap<&Element>) {
        self.stats.compared += 1;
        self.signatures
            .insert(position.clone(), display_signature(position.element_key(), elements));
    }

    fn completed(&mut self, position: &Position, _equal: bool) {
        self.signatures.remove(position);
    }

    fn report_missing(&mut self, position: &Position, missing: &BTreeSet<ApiId>) {
        self.stats.missing += 1;
        self.enter(position);
        let names: Vec<&str> = missing.iter().map(ApiId::name).collect();
        let what = if position.is_element() {
            "missing from".to_string()
        } else {
            format!("{position}: missing from")
        };
        self.lines
            .push(format!("  {} {}", self.color(&what, "red"), names.join(", ")));
    }

    fn report_different(&mut self, position: &Position, dimension: Dimension, values: &ApiMap<String>) {
        self.stats.different += 1;
        self.enter(position);
        let what = if position.is_element() {
            format!("different {dimension}")
        } else {
            format!("{position}: different {dimension}")
        };
        self.lines.push(format!("  {}", self.color(&what, "yellow")));
        for (id, value) in values {
            let value = truncate(&value.replace('\n', "\\n"), MAX_VALUE_LEN);
            self.lines.push(format!("    {}: {value}", self.color(id.name(), "dim")));
        }
    }
}

impl ReportRenderer for SummaryReporter<'_> {
    fn render(&self, metadata: &ReportMetadata) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        // Header
        lines.push(self.color("API Comparison Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        for api in &metadata.apis {
            let source = api.source.as_deref().unwrap_or("-");
            lines.push(format!(
                "{}  {} {}",
                self.color(&format!("{:<12}", api.name), "cyan"),
                source,
                self.color(&api.fingerprint, "dim")
            ));
        }

        lines.extend(self.lines.iter().cloned());

        // Totals
        lines.push(String::new());
        if self.stats.is_equal() {
            lines.push(format!(
                "{} {} entities compared",
                self.color("No differences.", "green"),
                self.stats.compared
            ));
        } else {
            lines.push(format!(
                "{} entities compared: {} missing, {} different",
                self.stats.compared,
                self.color(&self.stats.missing.to_string(), "red"),
                self.color(&self.stats.different.to_string(), "yellow")
            ));
        }

        Ok(lines.join("\n"))
    }

    fn stats(&self) -> ReportStats {
        self.stats
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

/// Truncate a string to fit within `max_len` (UTF-8 safe)
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let end = floor_char_boundary(s, max_len.saturating_sub(3));
        format!("{}...", &s[..end])
    }
}

/// Find the largest byte index <= `index` that is a valid UTF-8 char boundary.
const fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Api, Modifier, PrimitiveKind, Snapshot, SnapshotApi, TypeMirror};
    use crate::compare::Comparator;

    fn api(name: &str, field: Element) -> SnapshotApi {
        SnapshotApi::new(
            name,
            Snapshot {
                name: None,
                modules: vec![Element::module(
                    "mA",
                    vec![Element::package("p", vec![Element::class("C", vec![field])])],
                )],
                packages: vec![],
            },
        )
    }

    fn int_field() -> Element {
        Element::field("f", TypeMirror::primitive(PrimitiveKind::Int))
    }

    #[test]
    fn test_groups_under_signature_with_notes() {
        let a = api("v1", int_field());
        let b = api("v2", int_field().with_modifiers([Modifier::Public, Modifier::Static]));
        let mut notes = Notes::new();
        notes
            .add_str("n.txt", "urn:bug:7 made static\n    mA/p.C.*\n")
            .expect("notes");

        let mut reporter = SummaryReporter::new().no_color().with_notes(Some(&notes));
        Comparator::new([&a as &dyn Api, &b])
            .compare(&mut reporter)
            .expect("comparison");
        let text = reporter.render(&ReportMetadata::new()).expect("render");

        let expected = "\
field mA/p.C#f
  note: urn:bug:7 made static (from mA/p.C)
  different modifiers
    v1: public
    v2: public static";
        assert!(text.contains(expected), "{text}");
        assert!(text.contains("4 entities compared: 0 missing, 1 different"), "{text}");
    }

    #[test]
    fn test_no_differences() {
        let a = api("v1", int_field());
        let b = api("v2", int_field());
        let mut reporter = SummaryReporter::new().no_color();
        Comparator::new([&a as &dyn Api, &b])
            .compare(&mut reporter)
            .expect("comparison");

        let text = reporter.render(&ReportMetadata::new()).expect("render");
        assert!(text.contains("No differences."));
        assert_eq!(reporter.stats().compared, 4);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
    }
}
