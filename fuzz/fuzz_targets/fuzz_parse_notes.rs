#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the notes file parser.
///
/// Any input must either parse, possibly with line diagnostics, or fail with
/// a `NotesError`. Accepted signatures must satisfy the signature grammar.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data)
        && let Ok(parsed) = api_diff::notes::parse("fuzz.notes", s)
    {
        for entry in &parsed.entries {
            assert!(api_diff::notes::is_valid_signature(&entry.name));
        }
    }
});
