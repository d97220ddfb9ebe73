//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod compare;
mod config;
mod notes;

pub use compare::run_compare;
pub use config::{run_config_init, run_config_path, run_config_schema, run_config_show};
pub use notes::run_notes_check;

// Re-export config types used by handlers
pub use crate::config::CompareConfig;
