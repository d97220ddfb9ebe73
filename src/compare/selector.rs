//! Include/exclude selection of modules and packages.
//!
//! Pattern forms:
//!
//! | pattern          | selects                                         |
//! |------------------|-------------------------------------------------|
//! | `m`, `m/**`      | module `m` and all its packages                 |
//! | `m/p`, `m/p.*`   | package `p` of module `m`                       |
//! | `m/p.**`         | package `p` of module `m` and its subpackages   |
//! | `*/p.*`, `p.*`   | package `p` of any module, including the unnamed one |
//!
//! `*` inside a module name matches any run of characters; inside a package
//! name it matches one name segment.

use crate::error::{ApiDiffError, Result};
use crate::model::ElementKey;
use regex::Regex;

#[derive(Debug, Clone)]
struct Pattern {
    source: String,
    /// `None` matches any module, including the unnamed one
    module: Option<Regex>,
    /// `None` matches every package
    package: Option<Regex>,
}

impl Pattern {
    fn parse(source: &str) -> Result<Self> {
        let invalid = |reason: &str| ApiDiffError::config(format!("invalid selection pattern '{source}': {reason}"));
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty pattern"));
        }

        let (module, package) = match trimmed.split_once('/') {
            Some((m, p)) => (Some(m), Some(p)),
            None if trimmed.ends_with(".*") || trimmed.ends_with(".**") => (None, Some(trimmed)),
            None => (Some(trimmed), None),
        };

        let module = match module {
            None | Some("*") => None,
            Some(m) if m.is_empty() => return Err(invalid("missing module name before '/'")),
            Some(m) => Some(compile(&glob_to_regex(m, ".*"))?),
        };

        let package = match package {
            None | Some("" | "**") => None,
            Some(p) => {
                let regex = if let Some(prefix) = p.strip_suffix(".**") {
                    let prefix = glob_to_regex(prefix, "[^.]*");
                    format!("{prefix}(\\..+)?")
                } else {
                    glob_to_regex(p.strip_suffix(".*").unwrap_or(p), "[^.]*")
                };
                Some(compile(&regex)?)
            }
        };

        Ok(Self {
            source: source.to_string(),
            module,
            package,
        })
    }

    fn matches_module(&self, module: &str) -> bool {
        self.module.as_ref().is_none_or(|re| re.is_match(module))
    }

    fn matches_package(&self, module: &str, package: &str) -> bool {
        self.matches_module(module) && self.package.as_ref().is_none_or(|re| re.is_match(package))
    }

    /// Selects whole modules rather than individual packages.
    fn is_module_pattern(&self) -> bool {
        self.package.is_none()
    }
}

fn glob_to_regex(glob: &str, star: &str) -> String {
    let body: Vec<String> = glob.split('*').map(regex::escape).collect();
    body.join(star)
}

fn compile(body: &str) -> Result<Regex> {
    Regex::new(&format!("^{body}$")).map_err(|e| ApiDiffError::config(format!("invalid selection pattern: {e}")))
}

/// Which modules and packages take part in a comparison.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl Selector {
    /// Select everything.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// With no include patterns everything not excluded is selected.
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self> {
        Ok(Self {
            include: include.iter().map(|p| Pattern::parse(p.as_ref())).collect::<Result<_>>()?,
            exclude: exclude.iter().map(|p| Pattern::parse(p.as_ref())).collect::<Result<_>>()?,
        })
    }

    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Whether any package of `module` can be selected.
    #[must_use]
    pub fn includes_module(&self, module: &str) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|p| p.matches_module(module));
        let excluded = self
            .exclude
            .iter()
            .any(|p| p.is_module_pattern() && p.matches_module(module));
        included && !excluded
    }

    /// Whether a package is selected. `module` is `None` for the unnamed module.
    #[must_use]
    pub fn includes_package(&self, module: Option<&str>, package: &str) -> bool {
        let module = module.unwrap_or("");
        let included = self.include.is_empty() || self.include.iter().any(|p| p.matches_package(module, package));
        let excluded = self.exclude.iter().any(|p| p.matches_package(module, package));
        included && !excluded
    }

    /// Modules and packages are checked; everything else is selected.
    #[must_use]
    pub fn includes(&self, key: &ElementKey) -> bool {
        match key {
            ElementKey::Module { name } => self.includes_module(name),
            ElementKey::Package { module, name } => {
                self.includes_package(module.as_deref().map(ElementKey::name), name)
            }
            _ => true,
        }
    }

    /// The patterns as given, for diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        let inc: Vec<&str> = self.include.iter().map(|p| p.source.as_str()).collect();
        let exc: Vec<&str> = self.exclude.iter().map(|p| p.source.as_str()).collect();
        format!("include [{}], exclude [{}]", inc.join(", "), exc.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(include: &[&str], exclude: &[&str]) -> Selector {
        Selector::new(include, exclude).expect("valid patterns")
    }

    #[test]
    fn test_everything_selected_by_default() {
        let s = Selector::all();
        assert!(s.is_unrestricted());
        assert!(s.includes_module("java.base"));
        assert!(s.includes_package(None, "p"));
    }

    #[test]
    fn test_module_patterns() {
        let s = selector(&["java.base/**"], &[]);
        assert!(s.includes_module("java.base"));
        assert!(!s.includes_module("java.sql"));
        assert!(s.includes_package(Some("java.base"), "java.lang"));

        let s = selector(&["java.sql"], &[]);
        assert!(s.includes_package(Some("java.sql"), "javax.sql"));
        assert!(!s.includes_package(Some("java.base"), "java.lang"));
    }

    #[test]
    fn test_package_patterns() {
        let s = selector(&["java.base/java.lang.*"], &[]);
        assert!(s.includes_module("java.base"));
        assert!(s.includes_package(Some("java.base"), "java.lang"));
        assert!(!s.includes_package(Some("java.base"), "java.lang.reflect"));

        let s = selector(&["java.base/java.util.**"], &[]);
        assert!(s.includes_package(Some("java.base"), "java.util"));
        assert!(s.includes_package(Some("java.base"), "java.util.concurrent"));
        assert!(!s.includes_package(Some("java.base"), "java.utilities"));
    }

    #[test]
    fn test_any_module_patterns() {
        let s = selector(&["*/java.io.*"], &[]);
        assert!(s.includes_package(Some("java.base"), "java.io"));
        assert!(s.includes_package(None, "java.io"));

        let s = selector(&["p.*"], &[]);
        assert!(s.includes_package(None, "p"));
        assert!(s.includes_package(Some("m"), "p"));
    }

    #[test]
    fn test_exclusion_wins() {
        let s = selector(&["java.base"], &["java.base/sun.**"]);
        assert!(s.includes_module("java.base"));
        assert!(!s.includes_package(Some("java.base"), "sun.misc"));
        assert!(s.includes_package(Some("java.base"), "java.lang"));

        let s = selector(&[], &["jdk.internal"]);
        assert!(!s.includes_module("jdk.internal"));
        assert!(s.includes_module("java.base"));
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(Selector::new(&[""], &[]).is_err());
        assert!(Selector::new(&["/p.*"], &[]).is_err());
    }
}
