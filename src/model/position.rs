//! Addresses of entities and of named parts of entities.

use super::element_key::ElementKey;
use super::names;
use serde::{Serialize, Serializer};
use std::fmt;

/// The part of an entity a relative position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationKind {
    Annotation,
    AnnotationValue,
    Bound,
    DefaultValue,
    DocFile,
    Exception,
    ModuleExports,
    ModuleOpens,
    ModuleProvides,
    ModuleRequires,
    ModuleUses,
    Parameter,
    PermittedSubclass,
    ReceiverType,
    RecordComponent,
    ReturnType,
    SerialVersionUid,
    SerializedField,
    Superclass,
    Superinterface,
    TypeParameter,
}

impl RelationKind {
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Annotation => "annotation",
            Self::AnnotationValue => "annotation value",
            Self::Bound => "bound",
            Self::DefaultValue => "default value",
            Self::DocFile => "doc file",
            Self::Exception => "exceptions",
            Self::ModuleExports => "exports",
            Self::ModuleOpens => "opens",
            Self::ModuleProvides => "provides",
            Self::ModuleRequires => "requires",
            Self::ModuleUses => "uses",
            Self::Parameter => "parameter",
            Self::PermittedSubclass => "permitted subclasses",
            Self::ReceiverType => "receiver type",
            Self::RecordComponent => "record component",
            Self::ReturnType => "return type",
            Self::SerialVersionUid => "serialVersionUID",
            Self::SerializedField => "serialized field",
            Self::Superclass => "superclass",
            Self::Superinterface => "superinterfaces",
            Self::TypeParameter => "type parameter",
        }
    }
}

/// Selects one of several parts of the same kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PositionIndex {
    /// Zero-based; rendered one-based
    Ordinal(usize),
    Name(String),
    Key(ElementKey),
}

impl fmt::Display for PositionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ordinal(i) => write!(f, "{}", i + 1),
            Self::Name(name) => f.write_str(name),
            Self::Key(key) => write!(f, "{}", names::qualified_type_name(key)),
        }
    }
}

/// Address of an entity, or of a part of one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    Element(ElementKey),
    Relative {
        parent: Box<Position>,
        kind: RelationKind,
        index: Option<PositionIndex>,
    },
}

impl Position {
    #[must_use]
    pub const fn element(key: ElementKey) -> Self {
        Self::Element(key)
    }

    /// An unindexed part of this position.
    #[must_use]
    pub fn relative(&self, kind: RelationKind) -> Self {
        Self::Relative {
            parent: Box::new(self.clone()),
            kind,
            index: None,
        }
    }

    /// An indexed part of this position.
    #[must_use]
    pub fn relative_at(&self, kind: RelationKind, index: PositionIndex) -> Self {
        Self::Relative {
            parent: Box::new(self.clone()),
            kind,
            index: Some(index),
        }
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        match self {
            Self::Element(_) => None,
            Self::Relative { parent, .. } => Some(parent),
        }
    }

    /// Key of the entity this position belongs to.
    #[must_use]
    pub fn element_key(&self) -> &ElementKey {
        match self {
            Self::Element(key) => key,
            Self::Relative { parent, .. } => parent.element_key(),
        }
    }

    /// The entity position this position is rooted at.
    #[must_use]
    pub fn element_position(&self) -> &Self {
        match self {
            Self::Element(_) => self,
            Self::Relative { parent, .. } => parent.element_position(),
        }
    }

    #[must_use]
    pub const fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(key) => write!(f, "{} {key}", names::kind_name(key)),
            Self::Relative {
                parent,
                kind,
                index,
            } => {
                f.write_str(kind.description())?;
                if let Some(index) = index {
                    write!(f, " {index}")?;
                }
                write!(f, " of {parent}")
            }
        }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Element, Parameter, PrimitiveKind, TypeMirror};

    fn method_key() -> ElementKey {
        let owner = ElementKey::package(Some("mA"), "p").nested("C");
        let m = Element::method(
            "m",
            TypeMirror::primitive(PrimitiveKind::Void),
            vec![Parameter::new("x", TypeMirror::primitive(PrimitiveKind::Int))],
        );
        ElementKey::of(Some(&owner), &m).expect("key")
    }

    #[test]
    fn test_relative_position_rendering() {
        let pos = Position::element(method_key());
        assert_eq!(pos.to_string(), "method mA/p.C#m(int)");

        let param = pos.relative_at(RelationKind::Parameter, PositionIndex::Ordinal(1));
        assert_eq!(param.to_string(), "parameter 2 of method mA/p.C#m(int)");

        let anno = param.relative_at(
            RelationKind::Annotation,
            PositionIndex::Key(ElementKey::package(None, "q").nested("A")),
        );
        assert_eq!(
            anno.to_string(),
            "annotation q.A of parameter 2 of method mA/p.C#m(int)"
        );
    }

    #[test]
    fn test_element_key_of_nested_position() {
        let pos = Position::element(method_key());
        let ret = pos.relative(RelationKind::ReturnType);
        let deeper = ret.relative(RelationKind::Annotation);

        assert_eq!(deeper.element_key(), &method_key());
        assert_eq!(deeper.element_position(), &pos);
        assert_eq!(deeper.parent(), Some(&ret));
        assert!(pos.parent().is_none());
    }

    #[test]
    fn test_serializes_as_string() {
        let pos = Position::element(ElementKey::module("mA"));
        assert_eq!(serde_json::to_string(&pos).expect("json"), "\"module mA\"");
    }
}
