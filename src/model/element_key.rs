//! Structural identity for modules, packages, types and members.

use super::KeyError;
use super::type_key::TypeKey;
use crate::api::{DeclaredType, Element, ElementKind, TypeParameter};
use std::fmt;

/// Reserved executable name for constructors.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Snapshot-independent identity of one entity.
///
/// Two keys are equal iff they name the same entity at the same place in the
/// containment tree. The derived ordering sorts by variant first, so children
/// of one container are visited as nested types, then executables, then
/// variables, each group sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKey {
    Module {
        name: String,
    },
    Package {
        /// `None` for packages of the unnamed module
        module: Option<Box<ElementKey>>,
        name: String,
    },
    Type {
        /// A package, or the enclosing type of a nested type
        enclosing: Box<ElementKey>,
        name: String,
    },
    Executable {
        owner: Box<ElementKey>,
        name: String,
        /// Erased parameter types, in declaration order
        params: Vec<TypeKey>,
    },
    Variable {
        owner: Box<ElementKey>,
        name: String,
    },
    TypeParameter {
        owner: Box<ElementKey>,
        name: String,
    },
}

impl ElementKey {
    /// Build the key for `element` as a child of `parent`.
    ///
    /// `parent` is `None` for top-level entities: modules and packages of the
    /// unnamed module.
    pub fn of(parent: Option<&Self>, element: &Element) -> Result<Self, KeyError> {
        let misplaced = |location: String| KeyError::Misplaced {
            kind: element.kind,
            name: element.name.clone(),
            location,
        };
        let location = |p: &Self| format!("in {p}");

        match element.kind {
            ElementKind::Module => match parent {
                None => Ok(Self::module(&element.name)),
                Some(p) => Err(misplaced(location(p))),
            },
            ElementKind::Package => match parent {
                None => Ok(Self::Package {
                    module: None,
                    name: element.name.clone(),
                }),
                Some(p @ Self::Module { .. }) => Ok(Self::Package {
                    module: Some(Box::new(p.clone())),
                    name: element.name.clone(),
                }),
                Some(p) => Err(misplaced(location(p))),
            },
            kind if kind.is_type() => match parent {
                Some(p @ (Self::Package { .. } | Self::Type { .. })) => Ok(Self::Type {
                    enclosing: Box::new(p.clone()),
                    name: element.name.clone(),
                }),
                Some(p) => Err(misplaced(location(p))),
                None => Err(misplaced("at top level".to_string())),
            },
            kind if kind.is_executable() => match parent {
                Some(p @ Self::Type { .. }) => {
                    let params = element
                        .parameters
                        .iter()
                        .map(|param| TypeKey::erasure(&param.ty))
                        .collect::<Result<Vec<_>, _>>()?;
                    let name = if kind == ElementKind::Constructor {
                        CONSTRUCTOR_NAME.to_string()
                    } else {
                        element.name.clone()
                    };
                    Ok(Self::Executable {
                        owner: Box::new(p.clone()),
                        name,
                        params,
                    })
                }
                Some(p) => Err(misplaced(location(p))),
                None => Err(misplaced("at top level".to_string())),
            },
            kind if kind.is_variable() => match parent {
                Some(p @ Self::Type { .. }) => Ok(Self::Variable {
                    owner: Box::new(p.clone()),
                    name: element.name.clone(),
                }),
                Some(p) => Err(misplaced(location(p))),
                None => Err(misplaced("at top level".to_string())),
            },
            // type parameters are attributes; see `for_type_parameter`
            ElementKind::TypeParameter => Err(misplaced(match parent {
                Some(p) => format!("among the children of {p}"),
                None => "at top level".to_string(),
            })),
            other => Err(KeyError::UnsupportedKind(other)),
        }
    }

    pub fn module(name: impl Into<String>) -> Self {
        Self::Module { name: name.into() }
    }

    /// A package, optionally inside a named module.
    pub fn package(module: Option<&str>, name: impl Into<String>) -> Self {
        Self::Package {
            module: module.map(|m| Box::new(Self::module(m))),
            name: name.into(),
        }
    }

    /// A type nested directly in this package or type.
    #[must_use]
    pub fn nested(&self, name: impl Into<String>) -> Self {
        Self::Type {
            enclosing: Box::new(self.clone()),
            name: name.into(),
        }
    }

    /// Key for a type parameter declared by a type or executable.
    pub fn for_type_parameter(owner: &Self, parameter: &TypeParameter) -> Result<Self, KeyError> {
        match owner {
            Self::Type { .. } | Self::Executable { .. } => Ok(Self::TypeParameter {
                owner: Box::new(owner.clone()),
                name: parameter.name.clone(),
            }),
            other => Err(KeyError::Misplaced {
                kind: ElementKind::TypeParameter,
                name: parameter.name.clone(),
                location: format!("in {other}"),
            }),
        }
    }

    /// Key of a type referenced from a signature.
    ///
    /// Signatures carry no module information, so the package key is built
    /// without one.
    #[must_use]
    pub fn declared(ty: &DeclaredType) -> Self {
        let mut key = Self::Package {
            module: None,
            name: ty.package.clone(),
        };
        for segment in ty.name.split('.') {
            key = key.nested(segment);
        }
        key
    }

    /// The key this one is declared in, or `None` for modules and packages of
    /// the unnamed module.
    #[must_use]
    pub fn enclosing(&self) -> Option<&Self> {
        match self {
            Self::Module { .. } => None,
            Self::Package { module, .. } => module.as_deref(),
            Self::Type { enclosing, .. } => Some(enclosing),
            Self::Executable { owner, .. }
            | Self::Variable { owner, .. }
            | Self::TypeParameter { owner, .. } => Some(owner),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Module { name }
            | Self::Package { name, .. }
            | Self::Type { name, .. }
            | Self::Executable { name, .. }
            | Self::Variable { name, .. }
            | Self::TypeParameter { name, .. } => name,
        }
    }

    /// Modules, packages and types have children that are compared.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Module { .. } | Self::Package { .. } | Self::Type { .. })
    }

    /// Number of keys in the enclosing chain, including this one.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.enclosing().map_or(0, Self::depth)
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::names::lenient_name(self))
    }
}
