//! Report type definitions.

use crate::api::{Api, SnapshotApi};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable text, one block per differing entity
    #[default]
    Summary,
    /// Structured JSON event list
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// One compared snapshot, as listed in report headers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSummary {
    pub name: String,
    /// File the snapshot was read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// xxh3 fingerprint of the snapshot contents
    pub fingerprint: String,
}

impl From<&SnapshotApi> for ApiSummary {
    fn from(api: &SnapshotApi) -> Self {
        Self {
            name: api.name().to_string(),
            source: api.source().map(|p| p.display().to_string()),
            fingerprint: api.fingerprint_hex(),
        }
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Tool version
    pub tool_version: String,
    /// Generation timestamp
    pub generated_at: Option<String>,
    /// Compared snapshots, in declaration order
    pub apis: Vec<ApiSummary>,
}

impl ReportMetadata {
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_apis(mut self, apis: Vec<ApiSummary>) -> Self {
        self.apis = apis;
        self
    }

    /// Stamp with the current time.
    #[must_use]
    pub fn timestamped(mut self) -> Self {
        self.generated_at = Some(chrono::Utc::now().to_rfc3339());
        self
    }
}

/// Counts of what a reporter received
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    /// Entities compared
    pub compared: usize,
    /// Entities or parts absent from some snapshots
    pub missing: usize,
    /// Attribute disagreements
    pub different: usize,
}

impl ReportStats {
    #[must_use]
    pub const fn total_differences(&self) -> usize {
        self.missing + self.different
    }

    #[must_use]
    pub const fn is_equal(&self) -> bool {
        self.total_differences() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Snapshot;

    #[test]
    fn test_api_summary_from_snapshot() {
        let api = SnapshotApi::new("v1", Snapshot::default());
        let summary = ApiSummary::from(&api);
        assert_eq!(summary.name, "v1");
        assert_eq!(summary.source, None);
        assert_eq!(summary.fingerprint, api.fingerprint_hex());
    }

    #[test]
    fn test_stats() {
        let stats = ReportStats {
            compared: 10,
            missing: 1,
            different: 2,
        };
        assert_eq!(stats.total_differences(), 3);
        assert!(!stats.is_equal());
        assert!(ReportStats::default().is_equal());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(ReportFormat::default().to_string(), "summary");
        assert_eq!(ReportFormat::Json.to_string(), "json");
    }
}
