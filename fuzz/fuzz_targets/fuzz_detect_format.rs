#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz snapshot format detection heuristics.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = api_diff::api::detect_format(s);
    }
});
