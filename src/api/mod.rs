//! Snapshot providers.
//!
//! An [`Api`] exposes one snapshot of a program's public surface as a tree of
//! [`Element`] descriptors. The comparison engine walks every provider in
//! parallel; it never looks at how a provider obtained its tree.
//!
//! [`SnapshotApi`] is the provider shipped with the crate. It reads a tree
//! that an extractor already serialized to JSON or YAML.

mod detection;
mod element;
mod snapshot;
mod types;

pub use detection::{detect_format, SnapshotFormat};
pub use element::{
    format_modifiers, AccessKind, AnnotationMirror, AnnotationValue, Directive, DocFile, Element,
    ElementKind, Modifier, Parameter, RecordComponent, RequiresModifier, SerializedField,
    SerializedForm, TypeParameter,
};
pub use snapshot::{Snapshot, SnapshotApi, MAX_SNAPSHOT_FILE_SIZE};
pub use types::{DeclaredType, PrimitiveKind, TypeMirror};

use thiserror::Error;

/// A provider could not supply part of its tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiError {
    #[error("{kind} '{name}' could not be read: {message}")]
    Unreadable {
        kind: ElementKind,
        name: String,
        message: String,
    },

    #[error("provider failure: {0}")]
    Provider(String),
}

/// One snapshot of an API.
///
/// `enclosed` distinguishes a container whose children were not provided
/// (`Ok(None)`) from one with zero children (`Ok(Some(&[]))`). A container the
/// provider failed to read is an error; treating it as empty would report
/// every child as missing.
pub trait Api {
    /// Display name, unique within one comparison.
    fn name(&self) -> &str;

    /// Modules, followed by the packages of the unnamed module.
    fn top_level(&self) -> Result<Vec<&Element>, ApiError>;

    /// Children of a module, package or type.
    fn enclosed<'a>(&'a self, container: &'a Element) -> Result<Option<&'a [Element]>, ApiError> {
        if let Some(message) = &container.load_error {
            return Err(ApiError::Unreadable {
                kind: container.kind,
                name: container.name.clone(),
                message: message.clone(),
            });
        }
        Ok(container.enclosed.as_deref())
    }

    fn raw_doc_comment<'a>(&'a self, element: &'a Element) -> Option<&'a str> {
        element.doc_comment.as_deref()
    }

    fn api_description<'a>(&'a self, element: &'a Element) -> Option<&'a str> {
        element.api_description.as_deref()
    }

    /// Resource files of a module or package.
    fn doc_files<'a>(&'a self, element: &'a Element) -> &'a [DocFile] {
        &element.doc_files
    }

    /// Serialized form of a type, when it is serializable.
    fn serialized_form<'a>(&'a self, element: &'a Element) -> Option<&'a SerializedForm> {
        element.serialized_form.as_ref()
    }
}
