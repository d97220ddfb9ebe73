//! Line parser for notes files.

use super::{Diagnostic, Entry, NotesError};
use regex::Regex;
use std::sync::LazyLock;

const IDENT: &str = r"[\p{L}_$][\p{L}\p{N}_$]*";

static URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:\S+$").expect("static regex"));

static SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    let qualified = format!("{IDENT}(?:\\.{IDENT})*");
    let ty = format!("{qualified}(?:\\[\\])*");
    let params = format!("\\((?:{ty}(?:,{ty})*)?\\)");
    let member = format!("#(?:{IDENT}|(?:{IDENT}|<init>){params})");
    let pattern = format!("^(?:(?:{qualified}/)?{qualified}(?:{member})?|{qualified}/)$");
    Regex::new(&pattern).expect("static regex")
});

/// Whether `signature` follows the grammar
/// `[module/][package.]type[#member[(params)]]`, `module/` or `module`.
///
/// Constructors are written `<init>` and always carry a parameter list.
#[must_use]
pub fn is_valid_signature(signature: &str) -> bool {
    SIGNATURE.is_match(signature)
}

/// Result of parsing one notes file.
#[derive(Debug, Default)]
pub struct ParsedNotes {
    pub entries: Vec<Entry>,
    pub diagnostics: Vec<Diagnostic>,
}

struct Header {
    uri: String,
    description: String,
}

enum State {
    /// No header seen yet
    Start,
    InNote(Header),
    /// After a bad header; its signatures are dropped with it
    Skipping,
}

/// Parse the contents of a notes file.
///
/// Bad lines become diagnostics. A signature before the first header makes
/// the whole file unusable.
pub fn parse(file: &str, content: &str) -> Result<ParsedNotes, NotesError> {
    let mut parsed = ParsedNotes::default();
    let mut state = State::Start;

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if !raw.starts_with(char::is_whitespace) {
            state = match parse_header(trimmed) {
                Ok(header) => State::InNote(header),
                Err(message) => {
                    parsed.diagnostics.push(Diagnostic::new(file, line_no, message));
                    State::Skipping
                }
            };
            continue;
        }

        match &state {
            State::Start => {
                return Err(NotesError::SignatureWithoutNote {
                    file: file.to_string(),
                    line: line_no,
                });
            }
            State::Skipping => {}
            State::InNote(header) => match parse_signature(trimmed) {
                Some((name, recursive)) => parsed.entries.push(Entry {
                    name,
                    uri: header.uri.clone(),
                    description: header.description.clone(),
                    recursive,
                }),
                None => parsed
                    .diagnostics
                    .push(Diagnostic::new(file, line_no, format!("invalid signature: {trimmed}"))),
            },
        }
    }

    tracing::debug!(
        "Parsed {}: {} entries, {} diagnostics",
        file,
        parsed.entries.len(),
        parsed.diagnostics.len()
    );
    Ok(parsed)
}

fn parse_header(line: &str) -> Result<Header, String> {
    let (token, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    if !token.contains(':') {
        return Err(format!("expected a URI to start a note, found: {token}"));
    }
    if !URI.is_match(token) {
        return Err(format!("bad URI: {token}"));
    }
    Ok(Header {
        uri: token.to_string(),
        description: rest.trim().to_string(),
    })
}

/// Split off the recursion suffix and validate. `/*` keeps its slash for
/// validation; a trailing slash is dropped afterwards so `m/` names module `m`.
fn parse_signature(text: &str) -> Option<(String, bool)> {
    let (name, recursive) = if let Some(module) = text.strip_suffix('*').filter(|s| s.ends_with('/')) {
        (module, true)
    } else if let Some(prefix) = text.strip_suffix(".*") {
        (prefix, true)
    } else {
        (text, false)
    };
    if !is_valid_signature(name) {
        return None;
    }
    Some((name.trim_end_matches('/').to_string(), recursive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_signatures() {
        for sig in [
            "java.base",
            "java.base/",
            "java.base/java.lang",
            "java.base/java.lang.String",
            "java.lang.Map.Entry",
            "p.C#field",
            "p.C#m()",
            "p.C#m(int,String[][],T)",
            "p.C#<init>(int)",
            "m/p.C#<init>()",
            "m/C",
            "C",
        ] {
            assert!(is_valid_signature(sig), "{sig}");
        }
    }

    #[test]
    fn test_invalid_signatures() {
        for sig in [
            "",
            "p.C#<init>",
            "p.C#m(int, long)",
            "p..C",
            "m//p",
            "p.C#",
            "1abc",
            "p.C#m(java.util.List<String>)",
        ] {
            assert!(!is_valid_signature(sig), "{sig}");
        }
    }

    #[test]
    fn test_parse_entries() {
        let text = "\
# header comment
https://example.org/1  First note
    p.C#m()
    m/*

urn:x:2
\tp.*
";
        let parsed = parse("n.txt", text).expect("parse");
        assert!(parsed.diagnostics.is_empty());
        let summary: Vec<(&str, &str, bool)> = parsed
            .entries
            .iter()
            .map(|e| (e.name.as_str(), e.uri.as_str(), e.recursive))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("p.C#m()", "https://example.org/1", false),
                ("m", "https://example.org/1", true),
                ("p", "urn:x:2", true),
            ]
        );
        assert_eq!(parsed.entries[0].description, "First note");
        assert_eq!(parsed.entries[2].description, "");
    }

    #[test]
    fn test_bad_lines_are_diagnostics() {
        let text = "\
not-a-uri here
    p.C
1http:bad
    p.D
https://ok
    p.E#<init>
    p.F
";
        let parsed = parse("n.txt", text).expect("parse");
        let lines: Vec<usize> = parsed.diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![1, 3, 6]);
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].name, "p.F");
    }

    #[test]
    fn test_signature_before_header_is_fatal() {
        let err = parse("n.txt", "# intro\n    p.C\n").unwrap_err();
        assert!(matches!(err, NotesError::SignatureWithoutNote { line: 2, .. }));
    }
}
