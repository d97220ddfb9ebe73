use super::parser::{parse, ParsedNotes};
use super::{Diagnostic, Entry, NotesError};
use crate::error::{ApiDiffError, Result};
use crate::model::{canonical_name, ElementKey, KeyError};
use indexmap::IndexMap;
use std::path::Path;

/// Notes from any number of files, indexed by signature.
#[derive(Debug, Clone, Default)]
pub struct Notes {
    index: IndexMap<String, Vec<Entry>>,
}

impl Notes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the entries of one parsed file.
    pub fn add(&mut self, parsed: ParsedNotes) {
        for entry in parsed.entries {
            self.index.entry(entry.name.clone()).or_default().push(entry);
        }
    }

    /// Parse `content` and add its entries. Returns the line diagnostics.
    pub fn add_str(&mut self, file: &str, content: &str) -> std::result::Result<Vec<Diagnostic>, NotesError> {
        let mut parsed = parse(file, content)?;
        let diagnostics = std::mem::take(&mut parsed.diagnostics);
        self.add(parsed);
        Ok(diagnostics)
    }

    /// Read, parse and add a notes file.
    ///
    /// A file that cannot be read, or that has a signature before its first
    /// header, contributes no entries.
    pub fn load_file(&mut self, path: &Path) -> Result<Vec<Diagnostic>> {
        let file = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| {
            ApiDiffError::notes(
                format!("reading {file}"),
                NotesError::Io {
                    file: file.clone(),
                    source,
                },
            )
        })?;
        let diagnostics = self
            .add_str(&file, &content)
            .map_err(|e| ApiDiffError::notes(format!("parsing {file}"), e))?;
        tracing::info!("Loaded notes from {} ({} signatures total)", file, self.len());
        Ok(diagnostics)
    }

    /// Number of distinct signatures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Entries registered for exactly this signature.
    #[must_use]
    pub fn entries(&self, signature: &str) -> &[Entry] {
        self.index.get(signature).map_or(&[], Vec::as_slice)
    }

    /// Notes that apply to `key`.
    ///
    /// Entries for the key itself map to `false`. Recursive entries of any
    /// enclosing entity map to `true`. Order is first seen, innermost first.
    pub fn lookup(&self, key: &ElementKey) -> std::result::Result<IndexMap<Entry, bool>, KeyError> {
        let mut result = IndexMap::new();
        let mut current = Some(key);
        let mut inherited = false;
        while let Some(k) = current {
            let name = canonical_name(k)?;
            for entry in self.entries(&name) {
                if !inherited || entry.recursive {
                    result.entry(entry.clone()).or_insert(inherited);
                }
            }
            inherited = true;
            current = k.enclosing();
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Element, PrimitiveKind, TypeMirror};

    const NOTES: &str = "\
https://bugs.example.org/1 module wide
    mA/*
https://bugs.example.org/2 package only
    mA/p
https://bugs.example.org/3 class tree
    mA/p.C.*
https://bugs.example.org/4 method
    mA/p.C#m(int)
";

    fn notes() -> Notes {
        let mut notes = Notes::new();
        let diagnostics = notes.add_str("notes.txt", NOTES).expect("parse");
        assert!(diagnostics.is_empty());
        notes
    }

    fn uris(found: &IndexMap<Entry, bool>) -> Vec<(&str, bool)> {
        found.iter().map(|(e, inherited)| (e.uri.as_str(), *inherited)).collect()
    }

    #[test]
    fn test_exact_and_inherited() {
        let notes = notes();
        let class = ElementKey::package(Some("mA"), "p").nested("C");
        let method = ElementKey::of(
            Some(&class),
            &Element::method(
                "m",
                TypeMirror::primitive(PrimitiveKind::Void),
                vec![crate::api::Parameter::new("x", TypeMirror::primitive(PrimitiveKind::Int))],
            ),
        )
        .expect("key");

        let found = notes.lookup(&method).expect("lookup");
        assert_eq!(
            uris(&found),
            vec![
                ("https://bugs.example.org/4", false),
                ("https://bugs.example.org/3", true),
                ("https://bugs.example.org/1", true),
            ]
        );

        let found = notes.lookup(&class).expect("lookup");
        assert_eq!(
            uris(&found),
            vec![("https://bugs.example.org/3", false), ("https://bugs.example.org/1", true)]
        );

        let package = ElementKey::package(Some("mA"), "p");
        let found = notes.lookup(&package).expect("lookup");
        assert_eq!(
            uris(&found),
            vec![("https://bugs.example.org/2", false), ("https://bugs.example.org/1", true)]
        );
    }

    #[test]
    fn test_type_parameter_lookup_is_an_error() {
        let owner = ElementKey::package(None, "p").nested("C");
        let key = ElementKey::for_type_parameter(&owner, &crate::api::TypeParameter::new("T")).expect("key");
        assert!(matches!(notes().lookup(&key), Err(KeyError::NotNameable(_))));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        std::io::Write::write_all(&mut file, b"urn:a:1\n    p.C\n    bad sig\n").expect("write");

        let mut notes = Notes::new();
        let diagnostics = notes.load_file(file.path()).expect("load");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 3);
        assert_eq!(notes.entries("p.C").len(), 1);
    }

    #[test]
    fn test_unreadable_file() {
        let mut notes = Notes::new();
        let err = notes.load_file(Path::new("/nonexistent/notes.txt")).unwrap_err();
        assert!(matches!(err, ApiDiffError::Notes { .. }));
        assert!(notes.is_empty());
    }
}
