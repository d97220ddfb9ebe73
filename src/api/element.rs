//! Entity descriptors as they appear in a snapshot.
//!
//! An [`Element`] is what an extractor produced for one module, package, type
//! or member. Descriptors carry no identity of their own: two snapshots are
//! aligned through [`ElementKey`](crate::model::ElementKey)s built from them.

use super::types::{DeclaredType, TypeMirror};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The kind of entity an [`Element`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    Module,
    Package,
    Class,
    Interface,
    Enum,
    Record,
    AnnotationType,
    Constructor,
    Method,
    Field,
    EnumConstant,
    TypeParameter,
    StaticInit,
    InstanceInit,
}

impl ElementKind {
    /// Class, interface, enum, record or annotation type.
    #[must_use]
    pub const fn is_type(&self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Enum | Self::Record | Self::AnnotationType
        )
    }

    #[must_use]
    pub const fn is_executable(&self) -> bool {
        matches!(self, Self::Constructor | Self::Method)
    }

    #[must_use]
    pub const fn is_variable(&self) -> bool {
        matches!(self, Self::Field | Self::EnumConstant)
    }

    /// Kinds whose children take part in the comparison.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Module | Self::Package) || self.is_type()
    }

    /// Human-readable name used as a signature prefix.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Package => "package",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Record => "record",
            Self::AnnotationType => "annotation type",
            Self::Constructor => "constructor",
            Self::Method => "method",
            Self::Field => "field",
            Self::EnumConstant => "enum constant",
            Self::TypeParameter => "type parameter",
            Self::StaticInit => "static initializer",
            Self::InstanceInit => "instance initializer",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Declaration modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Default,
    Static,
    Sealed,
    NonSealed,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,
}

impl Modifier {
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Abstract => "abstract",
            Self::Default => "default",
            Self::Static => "static",
            Self::Sealed => "sealed",
            Self::NonSealed => "non-sealed",
            Self::Final => "final",
            Self::Transient => "transient",
            Self::Volatile => "volatile",
            Self::Synchronized => "synchronized",
            Self::Native => "native",
            Self::Strictfp => "strictfp",
        }
    }
}

/// Render a modifier set in declaration order, space separated.
#[must_use]
pub fn format_modifiers(modifiers: &BTreeSet<Modifier>) -> String {
    modifiers
        .iter()
        .map(Modifier::keyword)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Access level, ordered from most to least restrictive.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    Private,
    Package,
    #[default]
    Protected,
    Public,
}

impl AccessKind {
    /// Derive the access level from a modifier set.
    #[must_use]
    pub fn of(modifiers: &BTreeSet<Modifier>) -> Self {
        if modifiers.contains(&Modifier::Public) {
            Self::Public
        } else if modifiers.contains(&Modifier::Protected) {
            Self::Protected
        } else if modifiers.contains(&Modifier::Private) {
            Self::Private
        } else {
            Self::Package
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Private => "private",
            Self::Package => "package",
            Self::Protected => "protected",
            Self::Public => "public",
        })
    }
}

/// A type parameter of a generic type or executable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<TypeMirror>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationMirror>,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Vec<TypeMirror>) -> Self {
        self.bounds = bounds;
        self
    }
}

/// A formal parameter of an executable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeMirror,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationMirror>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeMirror) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations: Vec::new(),
        }
    }
}

/// A component of a record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordComponent {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeMirror,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationMirror>,
}

/// An annotation applied to a declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationMirror {
    #[serde(rename = "type")]
    pub annotation_type: DeclaredType,
    /// Explicitly given element values, keyed by element name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, AnnotationValue>,
}

impl AnnotationMirror {
    pub fn new(annotation_type: DeclaredType) -> Self {
        Self {
            annotation_type,
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }
}

impl fmt::Display for AnnotationMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.annotation_type.qualified_name())?;
        if !self.values.is_empty() {
            let values: Vec<String> = self
                .values
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect();
            write!(f, "({})", values.join(", "))?;
        }
        Ok(())
    }
}

/// A constant: annotation element value, default value or field initializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum AnnotationValue {
    Boolean(bool),
    Number(serde_json::Number),
    Char(char),
    String(String),
    EnumConstant {
        #[serde(rename = "type")]
        enum_type: DeclaredType,
        name: String,
    },
    Class(TypeMirror),
    Annotation(AnnotationMirror),
    Array(Vec<AnnotationValue>),
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Char(c) => write!(f, "{c:?}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::EnumConstant { enum_type, name } => {
                write!(f, "{}.{name}", enum_type.qualified_name())
            }
            Self::Class(t) => write!(f, "{t}.class"),
            Self::Annotation(a) => write!(f, "{a}"),
            Self::Array(items) => {
                let items: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "{{{}}}", items.join(", "))
            }
        }
    }
}

/// Modifiers on a `requires` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequiresModifier {
    Transitive,
    Static,
}

/// A module directive.
///
/// Target and implementation lists are sets: their order in a snapshot is not
/// significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Directive {
    Requires {
        module: String,
        #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
        modifiers: BTreeSet<RequiresModifier>,
    },
    Exports {
        package: String,
        #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
        targets: BTreeSet<String>,
    },
    Opens {
        package: String,
        #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
        targets: BTreeSet<String>,
    },
    Uses {
        service: String,
    },
    Provides {
        service: String,
        implementations: BTreeSet<String>,
    },
}

impl Directive {
    /// The module, package or service the directive is about.
    #[must_use]
    pub fn subject(&self) -> &str {
        match self {
            Self::Requires { module, .. } => module,
            Self::Exports { package, .. } | Self::Opens { package, .. } => package,
            Self::Uses { service } | Self::Provides { service, .. } => service,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(set: &BTreeSet<String>) -> String {
            set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
        }
        match self {
            Self::Requires { module, modifiers } => {
                f.write_str("requires ")?;
                for m in modifiers {
                    match m {
                        RequiresModifier::Transitive => f.write_str("transitive ")?,
                        RequiresModifier::Static => f.write_str("static ")?,
                    }
                }
                f.write_str(module)
            }
            Self::Exports { package, targets } | Self::Opens { package, targets } => {
                let verb = if matches!(self, Self::Exports { .. }) { "exports" } else { "opens" };
                if targets.is_empty() {
                    write!(f, "{verb} {package}")
                } else {
                    write!(f, "{verb} {package} to {}", join(targets))
                }
            }
            Self::Uses { service } => write!(f, "uses {service}"),
            Self::Provides { service, implementations } => {
                write!(f, "provides {service} with {}", join(implementations))
            }
        }
    }
}

/// A non-source resource file associated with a package or module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocFile {
    /// Path relative to the owning package's `doc-files` directory
    pub path: String,
    pub content: String,
}

/// A field in the serialized form of a serializable type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeMirror,
}

/// The serialized form of a serializable type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_version_uid: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<SerializedField>,
}

/// One entity in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub kind: ElementKind,
    /// Simple name; dotted for modules and packages; ignored for constructors
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub modifiers: BTreeSet<Modifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationMirror>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<TypeMirror>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeMirror>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permitted_subclasses: Vec<TypeMirror>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub record_components: Vec<RecordComponent>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_type: Option<TypeMirror>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeMirror>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thrown_types: Vec<TypeMirror>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<AnnotationValue>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeMirror>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant_value: Option<AnnotationValue>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub doc_files: Vec<DocFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serialized_form: Option<SerializedForm>,

    /// Children; `None` when the extractor did not provide them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosed: Option<Vec<Element>>,
    /// Set when the extractor failed to read this container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
}

impl Element {
    /// Create a bare descriptor with no attributes and no children provided.
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            modifiers: BTreeSet::new(),
            type_parameters: Vec::new(),
            annotations: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            permitted_subclasses: Vec::new(),
            record_components: Vec::new(),
            parameters: Vec::new(),
            receiver_type: None,
            return_type: None,
            thrown_types: Vec::new(),
            default_value: None,
            ty: None,
            constant_value: None,
            directives: Vec::new(),
            doc_comment: None,
            api_description: None,
            doc_files: Vec::new(),
            serialized_form: None,
            enclosed: None,
            load_error: None,
        }
    }

    pub fn module(name: impl Into<String>, packages: Vec<Element>) -> Self {
        Self::new(ElementKind::Module, name).with_enclosed(packages)
    }

    pub fn package(name: impl Into<String>, types: Vec<Element>) -> Self {
        Self::new(ElementKind::Package, name).with_enclosed(types)
    }

    /// A public class with the given members.
    pub fn class(name: impl Into<String>, members: Vec<Element>) -> Self {
        Self::new(ElementKind::Class, name)
            .with_modifiers([Modifier::Public])
            .with_enclosed(members)
    }

    /// A public method returning `ty` with the given parameters.
    pub fn method(name: impl Into<String>, return_type: TypeMirror, parameters: Vec<Parameter>) -> Self {
        let mut e = Self::new(ElementKind::Method, name).with_modifiers([Modifier::Public]);
        e.return_type = Some(return_type);
        e.parameters = parameters;
        e
    }

    /// A public constructor with the given parameters.
    pub fn constructor(parameters: Vec<Parameter>) -> Self {
        let mut e = Self::new(ElementKind::Constructor, "<init>").with_modifiers([Modifier::Public]);
        e.parameters = parameters;
        e
    }

    /// A public field of the given type.
    pub fn field(name: impl Into<String>, ty: TypeMirror) -> Self {
        let mut e = Self::new(ElementKind::Field, name).with_modifiers([Modifier::Public]);
        e.ty = Some(ty);
        e
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = modifiers.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_enclosed(mut self, enclosed: Vec<Element>) -> Self {
        self.enclosed = Some(enclosed);
        self
    }

    #[must_use]
    pub fn with_interfaces(mut self, interfaces: Vec<TypeMirror>) -> Self {
        self.interfaces = interfaces;
        self
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: Vec<AnnotationMirror>) -> Self {
        self.annotations = annotations;
        self
    }

    #[must_use]
    pub fn with_doc_comment(mut self, text: impl Into<String>) -> Self {
        self.doc_comment = Some(text.into());
        self
    }

    /// Access level derived from the modifiers.
    #[must_use]
    pub fn access(&self) -> AccessKind {
        AccessKind::of(&self.modifiers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::PrimitiveKind;

    #[test]
    fn test_access_from_modifiers() {
        let public = Element::class("C", vec![]);
        assert_eq!(public.access(), AccessKind::Public);

        let hidden = Element::new(ElementKind::Class, "D");
        assert_eq!(hidden.access(), AccessKind::Package);

        assert!(AccessKind::Public > AccessKind::Protected);
        assert!(AccessKind::Package > AccessKind::Private);
    }

    #[test]
    fn test_enclosed_absent_vs_empty() {
        let json = r#"{"kind":"package","name":"p"}"#;
        let e: Element = serde_json::from_str(json).expect("valid element");
        assert!(e.enclosed.is_none());

        let json = r#"{"kind":"package","name":"p","enclosed":[]}"#;
        let e: Element = serde_json::from_str(json).expect("valid element");
        assert_eq!(e.enclosed.map(|v| v.len()), Some(0));
    }

    #[test]
    fn test_directive_display() {
        let d = Directive::Exports {
            package: "p".into(),
            targets: ["m2".to_string(), "m1".to_string()].into_iter().collect(),
        };
        assert_eq!(d.to_string(), "exports p to m1, m2");

        let d = Directive::Requires {
            module: "java.sql".into(),
            modifiers: [RequiresModifier::Transitive].into_iter().collect(),
        };
        assert_eq!(d.to_string(), "requires transitive java.sql");
    }

    #[test]
    fn test_annotation_value_json() {
        let json = r#"{"kind":"array","value":[{"kind":"number","value":3},{"kind":"string","value":"x"}]}"#;
        let v: AnnotationValue = serde_json::from_str(json).expect("valid value");
        assert_eq!(v.to_string(), "{3, \"x\"}");
    }

    #[test]
    fn test_element_builders() {
        let m = Element::method(
            "size",
            TypeMirror::primitive(PrimitiveKind::Int),
            vec![Parameter::new("x", TypeMirror::primitive(PrimitiveKind::Long))],
        );
        assert_eq!(m.kind, ElementKind::Method);
        assert_eq!(m.parameters.len(), 1);
        assert!(m.enclosed.is_none());
        assert_eq!(format_modifiers(&m.modifiers), "public");
    }
}
