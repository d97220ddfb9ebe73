//! N-way structural comparison.
//!
//! The [`Comparator`] walks every snapshot's tree in lockstep. At each
//! container it builds the frontier (the union of child keys over all
//! snapshots), reports children missing from some snapshots, compares the
//! attributes of children present in at least two, and recurses.
//!
//! ```no_run
//! use api_diff::api::{Api, SnapshotApi};
//! use api_diff::compare::Comparator;
//! use api_diff::reports::EventRecorder;
//! use std::path::Path;
//!
//! # fn main() -> api_diff::Result<()> {
//! let old = SnapshotApi::from_path(Path::new("v1.json"), None)?;
//! let new = SnapshotApi::from_path(Path::new("v2.json"), None)?;
//!
//! let mut recorder = EventRecorder::new();
//! let equal = Comparator::new([&old as &dyn Api, &new]).compare(&mut recorder)?;
//! println!("equal: {equal}, {} events", recorder.events().len());
//! # Ok(())
//! # }
//! ```

mod annotations;
mod directives;
mod elements;
mod engine;
mod frontier;
mod selector;
mod serial;

pub use engine::Comparator;
pub use frontier::Frontier;
pub use selector::Selector;
