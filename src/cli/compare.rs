//! Compare command handler.
//!
//! Implements the `compare` subcommand for comparing two or more API snapshots.

use crate::config::{CompareConfig, Validatable};
use crate::pipeline::{
    compare_apis, determine_exit_code, load_notes, load_snapshots, output_report, should_use_color, ErrorLog,
    OutputTarget,
};
use anyhow::{bail, Result};

/// Run the compare command, returning the desired exit code.
///
/// Configuration and load failures are errors. Problems in notes files are
/// logged and only affect the exit code.
#[allow(clippy::needless_pass_by_value)]
pub fn run_compare(config: CompareConfig) -> Result<i32> {
    let problems = config.validate();
    if !problems.is_empty() {
        let messages: Vec<String> = problems.iter().map(ToString::to_string).collect();
        bail!("Invalid configuration:\n  {}", messages.join("\n  "));
    }

    let app = &config.app;
    let quiet = app.behavior.quiet;

    let apis = load_snapshots(&config.apis, quiet)?;

    let mut errors = ErrorLog::new();
    let notes = load_notes(&app.notes.files, &mut errors);
    if !quiet && !notes.is_empty() {
        tracing::info!("Loaded {} noted signatures", notes.len());
    }

    let target = OutputTarget::from_option(app.output.file.clone());
    let colored = should_use_color(app.output.no_color, &target);
    let attached = (!notes.is_empty()).then_some(&notes);

    let outcome = compare_apis(&apis, app, attached, colored, config.verbose)?;
    output_report(&outcome, &app.output, quiet)?;

    if !errors.is_empty() {
        tracing::warn!("{} error(s) reported", errors.count());
    }
    Ok(determine_exit_code(
        outcome.equal,
        app.behavior.fail_on_difference,
        errors.count(),
    ))
}
