//! Snapshot and notes loading stage.

use super::ErrorLog;
use crate::api::SnapshotApi;
use crate::config::ApiSource;
use crate::notes::Notes;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Parse a `NAME=PATH` or plain `PATH` snapshot argument.
///
/// A `=` whose left side looks like a path is part of the path.
pub fn parse_api_arg(arg: &str) -> Result<ApiSource> {
    if let Some((name, path)) = arg.split_once('=')
        && !name.is_empty()
        && !name.contains(['/', '\\'])
    {
        anyhow::ensure!(!path.is_empty(), "missing path after '=' in '{arg}'");
        return Ok(ApiSource {
            name: Some(name.to_string()),
            path: PathBuf::from(path),
        });
    }
    anyhow::ensure!(!arg.is_empty(), "empty snapshot argument");
    Ok(ApiSource {
        name: None,
        path: PathBuf::from(arg),
    })
}

/// Load every snapshot, in order.
///
/// Any snapshot that fails to load stops the run.
pub fn load_snapshots(sources: &[ApiSource], quiet: bool) -> Result<Vec<SnapshotApi>> {
    sources
        .iter()
        .map(|source| {
            let api = SnapshotApi::from_path(&source.path, source.name.as_deref())
                .with_context(|| format!("Failed to load snapshot: {}", source.path.display()))?;
            if !quiet {
                tracing::info!("Loaded API '{}' from {}", crate::api::Api::name(&api), source.path.display());
            }
            Ok(api)
        })
        .collect()
}

/// Load notes files in order.
///
/// Bad lines are recorded as diagnostics. A file that cannot be read, or
/// that fails to parse, is recorded as one error and contributes nothing.
pub fn load_notes(paths: &[impl AsRef<Path>], errors: &mut ErrorLog) -> Notes {
    let mut notes = Notes::new();
    for path in paths {
        match notes.load_file(path.as_ref()) {
            Ok(diagnostics) => errors.extend(diagnostics),
            Err(e) => errors.error(&e),
        }
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Api;

    #[test]
    fn test_parse_api_arg() {
        let named = parse_api_arg("v1=build/api.json").unwrap();
        assert_eq!(named.name.as_deref(), Some("v1"));
        assert_eq!(named.path, PathBuf::from("build/api.json"));

        let plain = parse_api_arg("build/api.json").unwrap();
        assert_eq!(plain.name, None);

        let path_with_eq = parse_api_arg("out/a=b.json").unwrap();
        assert_eq!(path_with_eq.name, None);
        assert_eq!(path_with_eq.path, PathBuf::from("out/a=b.json"));

        assert!(parse_api_arg("v1=").is_err());
        assert!(parse_api_arg("").is_err());
    }

    #[test]
    fn test_load_snapshots_names() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.yaml");
        std::fs::write(&first, r#"{"packages": [{"kind": "package", "name": "p"}]}"#).unwrap();
        std::fs::write(&second, "name: recorded\npackages:\n  - kind: package\n    name: p\n").unwrap();

        let apis = load_snapshots(
            &[
                ApiSource {
                    name: Some("explicit".to_string()),
                    path: first,
                },
                ApiSource {
                    name: None,
                    path: second,
                },
            ],
            true,
        )
        .unwrap();

        let names: Vec<&str> = apis.iter().map(Api::name).collect();
        assert_eq!(names, ["explicit", "recorded"]);
    }

    #[test]
    fn test_load_snapshots_missing_file() {
        let err = load_snapshots(
            &[ApiSource {
                name: None,
                path: PathBuf::from("/nonexistent/api.json"),
            }],
            true,
        )
        .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/api.json"));
    }

    #[test]
    fn test_load_notes_collects_errors() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.txt");
        let fatal = dir.path().join("fatal.txt");
        std::fs::write(&good, "urn:x:1 fine\n    p.C\nnot-a-header\n").unwrap();
        std::fs::write(&fatal, "    p.C\n").unwrap();

        let mut errors = ErrorLog::new();
        let notes = load_notes(&[good, fatal, dir.path().join("absent.txt")], &mut errors);

        assert_eq!(notes.entries("p.C").len(), 1);
        assert_eq!(errors.diagnostics().len(), 1);
        assert_eq!(errors.count(), 3);
    }
}
