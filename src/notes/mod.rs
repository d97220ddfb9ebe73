//! Notes: external commentary attached to API signatures.
//!
//! A notes file groups signatures under a header line naming a URI and an
//! optional description:
//!
//! ```text
//! # comments and blank lines are ignored
//! https://bugs.example.org/JDK-1234  Fixed in 17
//!     java.base/java.lang.String#strip()
//!     java.base/java.util.concurrent.*
//! ```
//!
//! A signature ending in `.*` or `/*` also applies to everything enclosed in
//! the named entity.

mod index;
mod parser;

pub use index::Notes;
pub use parser::{is_valid_signature, parse, ParsedNotes};

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A notes file that cannot be used at all.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NotesError {
    #[error("{file}:{line}: signature appears before any note header")]
    SignatureWithoutNote { file: String, line: usize },

    #[error("cannot read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

/// A recoverable problem in one line of a notes file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    /// One-based
    pub line: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.message)
    }
}

/// One note attached to one signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Entry {
    /// Signature as written, without the recursion suffix
    pub name: String,
    pub uri: String,
    pub description: String,
    /// Also applies to enclosed entities
    pub recursive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::new("notes.txt", 3, "bad URI");
        assert_eq!(d.to_string(), "notes.txt:3: bad URI");
    }

    #[test]
    fn test_fatal_error_display() {
        let err = NotesError::SignatureWithoutNote {
            file: "n.txt".into(),
            line: 2,
        };
        assert_eq!(err.to_string(), "n.txt:2: signature appears before any note header");
    }
}
