//! Structural identity for type shapes in signatures.

use super::KeyError;
use super::element_key::ElementKey;
use crate::api::{DeclaredType, PrimitiveKind, TypeMirror};
use std::fmt;

/// Comparable form of a [`TypeMirror`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeKey {
    Array(Box<TypeKey>),
    Declared {
        element: ElementKey,
        type_args: Vec<TypeKey>,
    },
    Primitive(PrimitiveKind),
    TypeVariable(String),
    Wildcard {
        extends: Option<Box<TypeKey>>,
        super_bound: Option<Box<TypeKey>>,
    },
}

impl TypeKey {
    /// Full key for a type as written, type arguments included.
    pub fn of(mirror: &TypeMirror) -> Result<Self, KeyError> {
        match mirror {
            TypeMirror::Primitive { name } => Ok(Self::Primitive(*name)),
            TypeMirror::Array { component } => Ok(Self::Array(Box::new(Self::of(component)?))),
            TypeMirror::Declared(d) => Ok(Self::Declared {
                element: ElementKey::declared(d),
                type_args: d
                    .type_args
                    .iter()
                    .map(Self::of)
                    .collect::<Result<_, _>>()?,
            }),
            TypeMirror::TypeVariable { name, .. } => Ok(Self::TypeVariable(name.clone())),
            TypeMirror::Wildcard {
                extends,
                super_bound,
            } => Ok(Self::Wildcard {
                extends: extends.as_deref().map(Self::of).transpose()?.map(Box::new),
                super_bound: super_bound.as_deref().map(Self::of).transpose()?.map(Box::new),
            }),
            other => Err(KeyError::UnsupportedType(other.kind_name())),
        }
    }

    /// Like [`TypeKey::of`], mapping the `none` placeholder to `None`.
    pub fn of_optional(mirror: Option<&TypeMirror>) -> Result<Option<Self>, KeyError> {
        match mirror {
            None | Some(TypeMirror::None) => Ok(None),
            Some(m) => Self::of(m).map(Some),
        }
    }

    /// Erased key, as used for overload identity.
    ///
    /// Type arguments are dropped and type variables are replaced by the
    /// erasure of their first bound, or `java.lang.Object` when unbounded.
    pub fn erasure(mirror: &TypeMirror) -> Result<Self, KeyError> {
        match mirror {
            TypeMirror::Primitive { name } => Ok(Self::Primitive(*name)),
            TypeMirror::Array { component } => Ok(Self::Array(Box::new(Self::erasure(component)?))),
            TypeMirror::Declared(d) => Ok(Self::raw(d)),
            TypeMirror::TypeVariable { bound, .. } => match bound {
                Some(b) => Self::erasure(b),
                None => Ok(Self::object()),
            },
            other => Err(KeyError::UnsupportedType(other.kind_name())),
        }
    }

    fn raw(d: &DeclaredType) -> Self {
        Self::Declared {
            element: ElementKey::declared(d),
            type_args: Vec::new(),
        }
    }

    /// `java.lang.Object`
    #[must_use]
    pub fn object() -> Self {
        Self::raw(&DeclaredType::new("java.lang", "Object"))
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array(component) => write!(f, "{component}[]"),
            Self::Declared { element, type_args } => {
                write!(f, "{}", super::names::qualified_type_name(element))?;
                if !type_args.is_empty() {
                    let args: Vec<String> = type_args.iter().map(ToString::to_string).collect();
                    write!(f, "<{}>", args.join(","))?;
                }
                Ok(())
            }
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::TypeVariable(name) => f.write_str(name),
            Self::Wildcard {
                extends,
                super_bound,
            } => {
                f.write_str("?")?;
                if let Some(b) = extends {
                    write!(f, " extends {b}")?;
                }
                if let Some(b) = super_bound {
                    write!(f, " super {b}")?;
                }
                Ok(())
            }
        }
    }
}
