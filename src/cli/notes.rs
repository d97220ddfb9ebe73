//! Notes command handler.

use crate::notes::Notes;
use crate::pipeline::exit_codes;
use anyhow::Result;
use std::path::PathBuf;

/// Parse notes files and print every diagnostic to stdout.
///
/// Returns [`exit_codes::ERRORS_REPORTED`] if any file had problems.
pub fn run_notes_check(files: &[PathBuf]) -> Result<i32> {
    let mut notes = Notes::new();
    let mut problems = 0usize;

    for path in files {
        match notes.load_file(path) {
            Ok(diagnostics) => {
                for diagnostic in &diagnostics {
                    println!("{diagnostic}");
                }
                problems += diagnostics.len();
            }
            Err(e) => {
                println!("{}: {e}", path.display());
                problems += 1;
            }
        }
    }

    println!(
        "{} signature(s) in {} file(s), {} problem(s)",
        notes.len(),
        files.len(),
        problems
    );

    Ok(if problems == 0 {
        exit_codes::SUCCESS
    } else {
        exit_codes::ERRORS_REPORTED
    })
}
