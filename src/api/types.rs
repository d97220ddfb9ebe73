//! Type descriptors as they appear in a snapshot.
//!
//! These mirror the shapes an extractor emits for parameter, field, return and
//! supertype positions. They are snapshot-local values; the comparable form is
//! [`TypeKey`](crate::model::TypeKey).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive type kinds, including `void` for return positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveKind {
    /// The source-level keyword for this primitive.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }

    /// Parse a primitive keyword.
    #[must_use]
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "boolean" => Some(Self::Boolean),
            "byte" => Some(Self::Byte),
            "char" => Some(Self::Char),
            "short" => Some(Self::Short),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            "void" => Some(Self::Void),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Reference to a declared (class, interface, enum, record, annotation) type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredType {
    /// Package name; empty for the unnamed package
    #[serde(default)]
    pub package: String,
    /// Dotted nesting path inside the package, e.g. `Map.Entry`
    pub name: String,
    /// Type arguments, empty for raw or non-generic uses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_args: Vec<TypeMirror>,
}

impl DeclaredType {
    /// Create a reference without type arguments.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    /// Add type arguments.
    #[must_use]
    pub fn with_type_args(mut self, args: Vec<TypeMirror>) -> Self {
        self.type_args = args;
        self
    }

    /// Last segment of the nesting path.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Fully qualified dotted name.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

/// A type as written in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeMirror {
    Primitive {
        name: PrimitiveKind,
    },
    Array {
        component: Box<TypeMirror>,
    },
    Declared(DeclaredType),
    #[serde(rename_all = "camelCase")]
    TypeVariable {
        name: String,
        /// First upper bound, used for erasure
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bound: Option<Box<TypeMirror>>,
    },
    Wildcard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        extends: Option<Box<TypeMirror>>,
        #[serde(default, rename = "super", skip_serializing_if = "Option::is_none")]
        super_bound: Option<Box<TypeMirror>>,
    },
    Intersection {
        bounds: Vec<TypeMirror>,
    },
    Union {
        alternatives: Vec<TypeMirror>,
    },
    /// Absence of a type, e.g. the superclass of an interface
    None,
}

impl TypeMirror {
    pub const fn primitive(kind: PrimitiveKind) -> Self {
        Self::Primitive { name: kind }
    }

    pub fn declared(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Declared(DeclaredType::new(package, name))
    }

    pub fn array(component: Self) -> Self {
        Self::Array {
            component: Box::new(component),
        }
    }

    pub fn type_variable(name: impl Into<String>) -> Self {
        Self::TypeVariable {
            name: name.into(),
            bound: None,
        }
    }

    /// Short lowercase name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Primitive { .. } => "primitive",
            Self::Array { .. } => "array",
            Self::Declared(_) => "declared",
            Self::TypeVariable { .. } => "type variable",
            Self::Wildcard { .. } => "wildcard",
            Self::Intersection { .. } => "intersection",
            Self::Union { .. } => "union",
            Self::None => "none",
        }
    }

    /// True for the `none` placeholder.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

fn join(f: &mut fmt::Formatter<'_>, types: &[TypeMirror], sep: &str) -> fmt::Result {
    for (i, t) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{t}")?;
    }
    Ok(())
}

impl fmt::Display for TypeMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive { name } => write!(f, "{name}"),
            Self::Array { component } => write!(f, "{component}[]"),
            Self::Declared(d) => {
                f.write_str(&d.qualified_name())?;
                if !d.type_args.is_empty() {
                    f.write_str("<")?;
                    join(f, &d.type_args, ",")?;
                    f.write_str(">")?;
                }
                Ok(())
            }
            Self::TypeVariable { name, .. } => f.write_str(name),
            Self::Wildcard { extends, super_bound } => {
                f.write_str("?")?;
                if let Some(b) = extends {
                    write!(f, " extends {b}")?;
                }
                if let Some(b) = super_bound {
                    write!(f, " super {b}")?;
                }
                Ok(())
            }
            Self::Intersection { bounds } => join(f, bounds, " & "),
            Self::Union { alternatives } => join(f, alternatives, " | "),
            Self::None => f.write_str("none"),
        }
    }
}
