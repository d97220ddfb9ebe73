//! **N-way structural comparison of API snapshots.**
//!
//! `api-diff` takes two or more snapshots of a program's public API (modules,
//! packages, types, and their members, each described by an extractor) and
//! reports every entity that is absent from some snapshots, together with
//! every attribute on which the snapshots disagree.
//!
//! ## Core Concepts & Modules
//!
//! - **[`api`]**: the [`Api`] trait a snapshot provider implements, the
//!   [`Element`] descriptors it hands out, and [`SnapshotApi`], which reads
//!   snapshots from JSON or YAML files.
//! - **[`model`]**: identity keys ([`ElementKey`], [`TypeKey`]) that are
//!   independent of any one snapshot, [`Position`]s inside an entity, and
//!   signature rendering.
//! - **[`compare`]**: the [`Comparator`], which aligns the snapshots key by
//!   key and drives a [`Reporter`].
//! - **[`reports`]**: reporter implementations: human-readable summary,
//!   JSON, an in-memory event recorder, a `tracing` mirror, and a multiplexer.
//! - **[`notes`]**: notes files that attach issue URIs to signatures; reports
//!   show the notes for each entity they mention.
//! - **[`config`]** and **[`pipeline`]**: configuration files and the
//!   load → compare → report stages used by the `apidiff` binary.
//!
//! ## Comparing Snapshots
//!
//! ```no_run
//! use std::path::Path;
//! use api_diff::{Api, Comparator, EventRecorder, SnapshotApi};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let v1 = SnapshotApi::from_path(Path::new("api-1.0.json"), Some("v1"))?;
//!     let v2 = SnapshotApi::from_path(Path::new("api-2.0.json"), Some("v2"))?;
//!
//!     let mut recorder = EventRecorder::new();
//!     let equal = Comparator::new([&v1 as &dyn Api, &v2]).compare(&mut recorder)?;
//!
//!     println!("equal: {equal}, {} differences", recorder.difference_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Attaching Notes
//!
//! ```no_run
//! use std::path::Path;
//! use api_diff::{Api, Comparator, Notes, ReportMetadata, ReportRenderer, SnapshotApi, SummaryReporter};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut notes = Notes::new();
//!     for diagnostic in notes.load_file(Path::new("api-notes.txt"))? {
//!         eprintln!("{diagnostic}");
//!     }
//!
//!     let v1 = SnapshotApi::from_path(Path::new("api-1.0.json"), None)?;
//!     let v2 = SnapshotApi::from_path(Path::new("api-2.0.json"), None)?;
//!
//!     let mut reporter = SummaryReporter::new().no_color().with_notes(Some(&notes));
//!     Comparator::new([&v1 as &dyn Api, &v2]).compare(&mut reporter)?;
//!     println!("{}", reporter.render(&ReportMetadata::new())?);
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the `api-diff` library crate. The `apidiff`
//! binary wraps it; run `apidiff --help` for its options and exit codes.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Ordinals and counts are bounded by snapshot sizes
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Attribute comparisons read best as one function per element kind
    clippy::too_many_lines,
    // Config structs legitimately use many bools for toggle flags
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    // self is kept for API consistency across comparator helpers
    clippy::unused_self,
    // Names like `present`/`providers` are clear in context
    clippy::similar_names
)]

pub mod api;
pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod model;
pub mod notes;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use api::{AccessKind, Api, ApiError, Element, ElementKind, Snapshot, SnapshotApi};
pub use compare::{Comparator, Selector};
pub use config::{AppConfig, AppConfigBuilder, CompareConfig, ConfigError, ConfigPreset, Validatable};
pub use error::{ApiDiffError, ErrorContext, OptionContext, Result};
pub use model::{ApiId, ApiMap, ElementKey, KeyError, Position, TypeKey};
pub use notes::{Diagnostic, Notes, NotesError};
pub use reports::{
    create_reporter, Dimension, EventRecorder, JsonReporter, LogReporter, MultiplexReporter, ReportEvent,
    ReportFormat, ReportMetadata, ReportRenderer, Reporter, SummaryReporter,
};
