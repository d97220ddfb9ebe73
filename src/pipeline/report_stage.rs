//! Report output stage.

use super::{write_output, ComparisonOutcome, OutputTarget};
use crate::api::SnapshotApi;
use crate::config::OutputConfig;
use crate::reports::{ApiSummary, ReportMetadata};
use anyhow::Result;

/// Report metadata for the compared snapshots, stamped with the current time.
#[must_use]
pub fn report_metadata(apis: &[SnapshotApi]) -> ReportMetadata {
    ReportMetadata::new()
        .with_apis(apis.iter().map(ApiSummary::from).collect())
        .timestamped()
}

/// Write a rendered report to the configured destination.
///
/// In quiet mode a report bound for stdout is dropped; a report bound for a
/// file is still written.
pub fn output_report(outcome: &ComparisonOutcome, output: &OutputConfig, quiet: bool) -> Result<()> {
    let target = OutputTarget::from_option(output.file.clone());
    if quiet && matches!(target, OutputTarget::Stdout) {
        return Ok(());
    }
    write_output(&outcome.report, &target, quiet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Snapshot;
    use crate::reports::ReportStats;

    #[test]
    fn test_report_metadata_lists_apis_in_order() {
        let apis = [
            SnapshotApi::new("b", Snapshot::default()),
            SnapshotApi::new("a", Snapshot::default()),
        ];
        let metadata = report_metadata(&apis);
        let names: Vec<&str> = metadata.apis.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert!(metadata.generated_at.is_some());
    }

    #[test]
    fn test_output_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let outcome = ComparisonOutcome {
            equal: true,
            stats: ReportStats::default(),
            report: "No differences.".to_string(),
        };
        let output = OutputConfig {
            file: Some(path.clone()),
            ..OutputConfig::default()
        };

        output_report(&outcome, &output, true).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "No differences.");
    }
}
