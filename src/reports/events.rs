//! In-memory event stream.

use super::{Dimension, Reporter, ReportStats};
use crate::api::Element;
use crate::model::{display_signature, ApiId, ApiMap, Position};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;

/// One reporter call, with values rendered to strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ReportEvent {
    Comparing {
        position: Position,
        signature: String,
    },
    Missing {
        position: Position,
        /// Names of the snapshots lacking the entity
        missing: Vec<String>,
    },
    Different {
        position: Position,
        dimension: Dimension,
        /// Rendered value per snapshot name, in declaration order
        values: IndexMap<String, String>,
    },
    Completed {
        position: Position,
        equal: bool,
    },
    CompletedAll {
        equal: bool,
    },
}

impl ReportEvent {
    #[must_use]
    pub const fn position(&self) -> Option<&Position> {
        match self {
            Self::Comparing { position, .. }
            | Self::Missing { position, .. }
            | Self::Different { position, .. }
            | Self::Completed { position, .. } => Some(position),
            Self::CompletedAll { .. } => None,
        }
    }

    /// Missing and different events.
    #[must_use]
    pub const fn is_difference(&self) -> bool {
        matches!(self, Self::Missing { .. } | Self::Different { .. })
    }
}

/// Records every event in call order.
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Vec<ReportEvent>,
}

impl EventRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[ReportEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<ReportEvent> {
        self.events
    }

    #[must_use]
    pub fn difference_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_difference()).count()
    }

    #[must_use]
    pub fn stats(&self) -> ReportStats {
        let mut stats = ReportStats::default();
        for event in &self.events {
            match event {
                ReportEvent::Comparing { .. } => stats.compared += 1,
                ReportEvent::Missing { .. } => stats.missing += 1,
                ReportEvent::Different { .. } => stats.different += 1,
                ReportEvent::Completed { .. } | ReportEvent::CompletedAll { .. } => {}
            }
        }
        stats
    }
}

impl Reporter for EventRecorder {
    fn comparing(&mut self, position: &Position, elements: &ApiMap<&Element>) {
        self.events.push(ReportEvent::Comparing {
            position: position.clone(),
            signature: display_signature(position.element_key(), elements),
        });
    }

    fn completed(&mut self, position: &Position, equal: bool) {
        self.events.push(ReportEvent::Completed {
            position: position.clone(),
            equal,
        });
    }

    fn completed_all(&mut self, equal: bool) {
        self.events.push(ReportEvent::CompletedAll { equal });
    }

    fn report_missing(&mut self, position: &Position, missing: &BTreeSet<ApiId>) {
        self.events.push(ReportEvent::Missing {
            position: position.clone(),
            missing: missing.iter().map(|id| id.name().to_string()).collect(),
        });
    }

    fn report_different(&mut self, position: &Position, dimension: Dimension, values: &ApiMap<String>) {
        self.events.push(ReportEvent::Different {
            position: position.clone(),
            dimension,
            values: values
                .iter()
                .map(|(id, v)| (id.name().to_string(), v.clone()))
                .collect(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementKey;

    #[test]
    fn test_serialized_shape() {
        let mut recorder = EventRecorder::new();
        let pos = Position::element(ElementKey::package(Some("m"), "p").nested("C"));
        recorder.report_missing(&pos, &BTreeSet::from([ApiId::new(1, "v2")]));

        let json = serde_json::to_value(recorder.events()).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!([{"event": "missing", "position": "type m/p.C", "missing": ["v2"]}])
        );
        assert_eq!(recorder.stats().missing, 1);
    }
}
