//! String forms of keys.
//!
//! The canonical name is the lookup key for notes and follows the signature
//! grammar: `module/package.Outer.Inner#member(Simple,int[])`. Declared types
//! in parameter lists are rendered by simple name only. The display signature
//! prefixes the name with the entity kind for reports.

use super::api_map::ApiMap;
use super::element_key::{CONSTRUCTOR_NAME, ElementKey};
use super::type_key::TypeKey;
use super::KeyError;
use crate::api::{Element, ElementKind};
use std::collections::BTreeSet;

/// Canonical name of `key`.
///
/// Type parameter keys, and executables whose parameter list contains a
/// wildcard, have no canonical name.
pub fn canonical_name(key: &ElementKey) -> Result<String, KeyError> {
    render(key, true)
}

/// Canonical name where it exists, otherwise a best-effort rendering.
pub(crate) fn lenient_name(key: &ElementKey) -> String {
    render(key, false).unwrap_or_else(|_| key.name().to_string())
}

fn render(key: &ElementKey, strict: bool) -> Result<String, KeyError> {
    Ok(match key {
        ElementKey::Module { name } => name.clone(),
        ElementKey::Package { module, name } => match module {
            Some(m) => format!("{}/{name}", render(m, strict)?),
            None => name.clone(),
        },
        ElementKey::Type { enclosing, name } => {
            let prefix = render(enclosing, strict)?;
            match enclosing.as_ref() {
                // types in an unnamed package follow the module separator directly
                ElementKey::Package { name: pkg, .. } if pkg.is_empty() => format!("{prefix}{name}"),
                _ => format!("{prefix}.{name}"),
            }
        }
        ElementKey::Executable {
            owner,
            name,
            params,
        } => {
            let params = params
                .iter()
                .map(|p| parameter_name(p, strict))
                .collect::<Result<Vec<_>, _>>()?;
            format!("{}#{name}({})", render(owner, strict)?, params.join(","))
        }
        ElementKey::Variable { owner, name } => format!("{}#{name}", render(owner, strict)?),
        ElementKey::TypeParameter { owner, name } => {
            if strict {
                return Err(KeyError::NotNameable(format!("type parameter {name}")));
            }
            format!("{}<{name}>", render(owner, strict)?)
        }
    })
}

fn parameter_name(ty: &TypeKey, strict: bool) -> Result<String, KeyError> {
    Ok(match ty {
        TypeKey::Array(component) => format!("{}[]", parameter_name(component, strict)?),
        TypeKey::Declared { element, .. } => element.name().to_string(),
        TypeKey::Primitive(kind) => kind.keyword().to_string(),
        TypeKey::TypeVariable(name) => name.clone(),
        TypeKey::Wildcard { .. } => {
            if strict {
                return Err(KeyError::NotNameable("wildcard".to_string()));
            }
            "?".to_string()
        }
    })
}

/// Dotted package-qualified name of a declared type key.
pub(crate) fn qualified_type_name(key: &ElementKey) -> String {
    match key {
        ElementKey::Type { enclosing, name } => match enclosing.as_ref() {
            ElementKey::Package { name: pkg, .. } if pkg.is_empty() => name.clone(),
            ElementKey::Package { name: pkg, .. } => format!("{pkg}.{name}"),
            outer => format!("{}.{name}", qualified_type_name(outer)),
        },
        other => lenient_name(other),
    }
}

/// Kind word for a key when no descriptor is at hand.
#[must_use]
pub fn kind_name(key: &ElementKey) -> &'static str {
    match key {
        ElementKey::Module { .. } => "module",
        ElementKey::Package { .. } => "package",
        ElementKey::Type { .. } => "type",
        ElementKey::Executable { name, .. } if name == CONSTRUCTOR_NAME => "constructor",
        ElementKey::Executable { .. } => "method",
        ElementKey::Variable { .. } => "field",
        ElementKey::TypeParameter { .. } => "type parameter",
    }
}

/// Kind-prefixed signature for reports.
///
/// For types and members the prefix is taken from the descriptors in
/// `elements`: `(various)` when the snapshots disagree on the kind and
/// `(unknown)` when no snapshot has the entity.
pub fn display_signature(key: &ElementKey, elements: &ApiMap<&Element>) -> String {
    let prefix = match key {
        ElementKey::Module { .. } => ElementKind::Module.display_name(),
        ElementKey::Package { .. } => ElementKind::Package.display_name(),
        ElementKey::TypeParameter { .. } => ElementKind::TypeParameter.display_name(),
        ElementKey::Type { .. } | ElementKey::Executable { .. } | ElementKey::Variable { .. } => {
            let kinds: BTreeSet<ElementKind> = elements.values().map(|e| e.kind).collect();
            let mut iter = kinds.iter();
            match (iter.next(), iter.next()) {
                (None, _) => "(unknown)",
                (Some(kind), None) => kind.display_name(),
                (Some(_), Some(_)) => "(various)",
            }
        }
    };
    format!("{prefix} {}", lenient_name(key))
}
