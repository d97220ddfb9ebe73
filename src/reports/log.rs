use super::{Dimension, Reporter};
use crate::api::Element;
use crate::model::{ApiId, ApiMap, Position};
use std::collections::BTreeSet;

/// Mirrors reporter events to `tracing` at debug level.
#[derive(Debug, Default)]
pub struct LogReporter {
    depth: usize,
}

impl LogReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for LogReporter {
    fn comparing(&mut self, position: &Position, elements: &ApiMap<&Element>) {
        tracing::debug!(depth = self.depth, apis = elements.len(), "comparing {position}");
        self.depth += 1;
    }

    fn completed(&mut self, position: &Position, equal: bool) {
        self.depth = self.depth.saturating_sub(1);
        tracing::debug!(depth = self.depth, equal, "completed {position}");
    }

    fn completed_all(&mut self, equal: bool) {
        tracing::debug!(equal, "comparison complete");
    }

    fn report_missing(&mut self, position: &Position, missing: &BTreeSet<ApiId>) {
        let names: Vec<&str> = missing.iter().map(ApiId::name).collect();
        tracing::debug!("{position}: missing from {}", names.join(", "));
    }

    fn report_different(&mut self, position: &Position, dimension: Dimension, values: &ApiMap<String>) {
        let rendered: Vec<String> = values.iter().map(|(id, v)| format!("{id}={v}")).collect();
        tracing::debug!("{position}: different {dimension}: {}", rendered.join("; "));
    }
}
