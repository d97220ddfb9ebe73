//! Identity, address and alignment types shared by the comparison engine.
//!
//! Everything here is a pure value type. Keys are built from snapshot
//! descriptors but never borrow from them, so a key produced from one snapshot
//! compares equal to the key another snapshot produces for the same entity.
//!
//! - [`ElementKey`] identifies a module, package, type or member.
//! - [`TypeKey`] identifies a type shape inside a signature.
//! - [`Position`] addresses an entity or a named part of one.
//! - [`ApiMap`] associates each snapshot with the value it holds at a position.

mod api_map;
mod element_key;
pub mod names;
mod position;
mod type_key;

pub use api_map::{ApiId, ApiMap};
pub use element_key::{ElementKey, CONSTRUCTOR_NAME};
pub use names::{canonical_name, display_signature};
pub use position::{Position, PositionIndex, RelationKind};
pub use type_key::TypeKey;

use crate::api::ElementKind;
use thiserror::Error;

/// A key was requested for, or rendered from, a shape the grammar forbids.
///
/// These are contract violations between the snapshot producer and the
/// engine. They abort a comparison rather than being reported as differences.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum KeyError {
    #[error("unsupported element kind: {0}")]
    UnsupportedKind(ElementKind),

    #[error("{kind} '{name}' cannot appear {location}")]
    Misplaced {
        kind: ElementKind,
        name: String,
        location: String,
    },

    #[error("unsupported type in signature: {0}")]
    UnsupportedType(&'static str),

    #[error("{0} has no canonical name")]
    NotNameable(String),
}
