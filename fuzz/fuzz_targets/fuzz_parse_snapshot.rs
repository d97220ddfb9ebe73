#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz snapshot loading and comparison.
///
/// Snapshots that load are compared against themselves; whatever the engine
/// does with malformed trees, it must return rather than panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data)
        && let Ok(api) = api_diff::SnapshotApi::parse_str(s, None, Some("a"))
    {
        let other = api.clone().with_name("b");
        let mut recorder = api_diff::EventRecorder::new();
        let _ = api_diff::Comparator::new([&api as &dyn api_diff::Api, &other]).compare(&mut recorder);
    }
});
