//! Pipeline orchestration for API comparisons.
//!
//! Shared load → compare → report logic used by the CLI command handlers.
//! Stages return `anyhow::Result`; recoverable problems in user input are
//! collected in an [`ErrorLog`] instead of aborting the run.

mod compare_stage;
mod load;
mod output;
mod report_stage;

pub use compare_stage::{compare_apis, ComparisonOutcome};
pub use load::{load_notes, load_snapshots, parse_api_arg};
pub use output::{should_use_color, write_output, OutputTarget};
pub use report_stage::{output_report, report_metadata};

use crate::notes::Diagnostic;

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - the APIs are equal, or differences are not treated as failure
    pub const SUCCESS: i32 = 0;
    /// Differences were found (with `--fail-on-difference`)
    pub const DIFFERENCES: i32 = 1;
    /// The comparison ran but errors were reported along the way
    pub const ERRORS_REPORTED: i32 = 2;
    /// A fatal error stopped the run
    pub const FATAL: i32 = 3;
}

/// Recoverable errors found while reading user input.
///
/// Each entry is logged when it is recorded. A non-empty log turns an
/// otherwise successful run into [`exit_codes::ERRORS_REPORTED`].
#[derive(Debug, Default)]
pub struct ErrorLog {
    diagnostics: Vec<Diagnostic>,
    other: usize,
}

impl ErrorLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic tied to a file and line.
    pub fn diagnostic(&mut self, diagnostic: Diagnostic) {
        tracing::error!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// Record an error that has no line position.
    pub fn error(&mut self, error: &dyn std::fmt::Display) {
        tracing::error!("{error}");
        self.other += 1;
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.diagnostic(diagnostic);
        }
    }

    /// Total number of errors recorded.
    #[must_use]
    pub fn count(&self) -> usize {
        self.diagnostics.len() + self.other
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Exit code for a finished comparison.
///
/// Reported errors take precedence over differences.
#[must_use]
pub const fn determine_exit_code(equal: bool, fail_on_difference: bool, errors: usize) -> i32 {
    if errors > 0 {
        exit_codes::ERRORS_REPORTED
    } else if fail_on_difference && !equal {
        exit_codes::DIFFERENCES
    } else {
        exit_codes::SUCCESS
    }
}
