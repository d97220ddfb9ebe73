//! Comparison stage.
//!
//! Builds the comparator from the configuration, drives it with the report
//! renderer for the configured format, and renders the result.

use super::report_metadata;
use crate::api::{Api, SnapshotApi};
use crate::compare::{Comparator, Selector};
use crate::config::AppConfig;
use crate::notes::Notes;
use crate::reports::{create_reporter, LogReporter, MultiplexReporter, ReportStats};
use anyhow::{Context, Result};

/// Result of one comparison run.
#[derive(Debug, Clone)]
pub struct ComparisonOutcome {
    pub equal: bool,
    pub stats: ReportStats,
    /// Rendered report in the configured format
    pub report: String,
}

/// Compare the snapshots and render the report.
///
/// Nothing is rendered when the comparison itself fails.
pub fn compare_apis(
    apis: &[SnapshotApi],
    config: &AppConfig,
    notes: Option<&Notes>,
    colored: bool,
    verbose: bool,
) -> Result<ComparisonOutcome> {
    let quiet = config.behavior.quiet;
    let selector = Selector::new(&config.selection.include, &config.selection.exclude)
        .context("Invalid selection patterns")?;

    if !quiet {
        tracing::info!(
            "Comparing {} APIs ({}, access >= {})",
            apis.len(),
            selector.describe(),
            config.comparison.access
        );
    }

    let comparator = Comparator::new(apis.iter().map(|api| api as &dyn Api))
        .with_access(config.comparison.access)
        .with_doc_comments(config.comparison.compare_doc_comments)
        .with_api_descriptions(config.comparison.compare_api_descriptions)
        .with_selector(selector);

    let mut reporter = create_reporter(config.output.format, colored, notes);
    let compared = if verbose {
        let mut log = LogReporter::new();
        let mut multiplex = MultiplexReporter::new().with(reporter.as_mut()).with(&mut log);
        comparator.compare(&mut multiplex)
    } else {
        comparator.compare(reporter.as_mut())
    };
    let equal = compared.context("Comparison failed")?;

    let stats = reporter.stats();
    if !quiet {
        tracing::info!(
            "Compared {} entities: {} missing, {} different",
            stats.compared,
            stats.missing,
            stats.different
        );
    }

    let report = reporter
        .render(&report_metadata(apis))
        .context("Failed to render report")?;

    Ok(ComparisonOutcome { equal, stats, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Element, Snapshot};
    use crate::reports::ReportFormat;

    fn api(name: &str, classes: &[&str]) -> SnapshotApi {
        SnapshotApi::new(
            name,
            Snapshot {
                name: None,
                modules: vec![],
                packages: vec![Element::package(
                    "p",
                    classes.iter().map(|c| Element::class(*c, vec![])).collect(),
                )],
            },
        )
    }

    #[test]
    fn test_compare_apis_json() {
        let apis = [api("v1", &["A", "B"]), api("v2", &["A"])];
        let config = AppConfig::builder().output_format(ReportFormat::Json).quiet(true).build();

        let outcome = compare_apis(&apis, &config, None, false, true).unwrap();
        assert!(!outcome.equal);
        assert_eq!(outcome.stats.missing, 1);

        let json: serde_json::Value = serde_json::from_str(&outcome.report).unwrap();
        assert_eq!(json["differences"][0]["position"], "type p.B");
    }

    #[test]
    fn test_excluded_package_is_not_compared() {
        let apis = [api("v1", &["A", "B"]), api("v2", &["A"])];
        let config = AppConfig::builder().exclude("p.*").quiet(true).build();

        let outcome = compare_apis(&apis, &config, None, false, false).unwrap();
        assert!(outcome.equal);
        assert_eq!(outcome.stats.compared, 0);
    }

    #[test]
    fn test_single_api_is_fatal() {
        let apis = [api("v1", &["A"])];
        assert!(compare_apis(&apis, &AppConfig::default(), None, false, false).is_err());
    }
}
