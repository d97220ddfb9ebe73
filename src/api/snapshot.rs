//! File-backed snapshot provider.

use super::detection::SnapshotFormat;
use super::element::{Element, ElementKind};
use super::{Api, ApiError};
use crate::error::{ApiDiffError, LoadErrorKind, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use xxhash_rust::xxh3::xxh3_64;

/// Maximum snapshot file size (512 MB).
pub const MAX_SNAPSHOT_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// On-disk layout of a snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Suggested display name; overridden by an explicit name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub modules: Vec<Element>,
    /// Packages of the unnamed module
    #[serde(default)]
    pub packages: Vec<Element>,
}

/// A snapshot read from a JSON or YAML file.
#[derive(Debug, Clone)]
pub struct SnapshotApi {
    name: String,
    snapshot: Snapshot,
    fingerprint: u64,
    source: Option<PathBuf>,
}

impl SnapshotApi {
    /// Wrap an in-memory snapshot.
    pub fn new(name: impl Into<String>, snapshot: Snapshot) -> Self {
        let fingerprint = serde_json::to_vec(&snapshot).map_or(0, |bytes| xxh3_64(&bytes));
        Self {
            name: name.into(),
            snapshot,
            fingerprint,
            source: None,
        }
    }

    /// Read and validate a snapshot file.
    ///
    /// The display name is `name` if given, else the name recorded in the
    /// file, else the file stem.
    pub fn from_path(path: &Path, name: Option<&str>) -> Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| ApiDiffError::io(path, e))?;
        if metadata.len() > MAX_SNAPSHOT_FILE_SIZE {
            return Err(ApiDiffError::load(
                format!("at {}", path.display()),
                LoadErrorKind::TooLarge {
                    size_mb: metadata.len() / (1024 * 1024),
                    limit_mb: MAX_SNAPSHOT_FILE_SIZE / (1024 * 1024),
                },
            ));
        }
        let content = std::fs::read_to_string(path).map_err(|e| ApiDiffError::io(path, e))?;

        let format = SnapshotFormat::detect(Some(path), &content)
            .ok_or_else(|| ApiDiffError::unknown_format(path.display().to_string()))?;
        let stem = path.file_stem().and_then(|s| s.to_str());

        let mut api = Self::parse(&content, format, name, stem)?;
        api.source = Some(path.to_path_buf());
        tracing::debug!(
            "Loaded snapshot '{}' from {} ({}, fingerprint {})",
            api.name,
            path.display(),
            format,
            api.fingerprint_hex()
        );
        Ok(api)
    }

    /// Parse snapshot content, detecting the format when not given.
    pub fn parse_str(content: &str, format: Option<SnapshotFormat>, name: Option<&str>) -> Result<Self> {
        let format = format
            .or_else(|| super::detect_format(content))
            .ok_or_else(|| ApiDiffError::unknown_format("<input>"))?;
        Self::parse(content, format, name, None)
    }

    /// Name precedence: explicit, then recorded in the content, then `fallback`.
    fn parse(
        content: &str,
        format: SnapshotFormat,
        explicit: Option<&str>,
        fallback: Option<&str>,
    ) -> Result<Self> {
        let snapshot: Snapshot = match format {
            SnapshotFormat::Json => serde_json::from_str(content)?,
            SnapshotFormat::Yaml => serde_yaml_ng::from_str(content)?,
        };
        validate(&snapshot)?;

        let name = explicit
            .map(str::to_string)
            .or_else(|| snapshot.name.clone())
            .or_else(|| fallback.map(str::to_string))
            .unwrap_or_else(|| "api".to_string());

        Ok(Self {
            name,
            snapshot,
            fingerprint: xxh3_64(content.as_bytes()),
            source: None,
        })
    }

    /// Rename this snapshot.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub const fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    #[must_use]
    pub fn fingerprint_hex(&self) -> String {
        format!("{:016x}", self.fingerprint)
    }

    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

impl Api for SnapshotApi {
    fn name(&self) -> &str {
        &self.name
    }

    fn top_level(&self) -> std::result::Result<Vec<&Element>, ApiError> {
        Ok(self
            .snapshot
            .modules
            .iter()
            .chain(self.snapshot.packages.iter())
            .collect())
    }
}

/// Check the top two levels. Deeper structure is checked by the engine when
/// keys are built.
fn validate(snapshot: &Snapshot) -> Result<()> {
    let invalid = |message: String| ApiDiffError::load("validating snapshot", LoadErrorKind::InvalidSnapshot(message));

    for module in &snapshot.modules {
        if module.kind != ElementKind::Module {
            return Err(invalid(format!(
                "'{}' is listed as a module but is a {}",
                module.name, module.kind
            )));
        }
        if module.name.is_empty() {
            return Err(invalid("module with an empty name".to_string()));
        }
        for child in module.enclosed.iter().flatten() {
            if child.kind != ElementKind::Package {
                return Err(invalid(format!(
                    "module '{}' encloses {} '{}'; only packages are allowed",
                    module.name, child.kind, child.name
                )));
            }
        }
    }
    for package in &snapshot.packages {
        if package.kind != ElementKind::Package {
            return Err(invalid(format!(
                "'{}' is listed as a package but is a {}",
                package.name, package.kind
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const JSON: &str = r#"{
        "name": "v1",
        "modules": [
            {"kind": "module", "name": "mA", "enclosed": [
                {"kind": "package", "name": "p", "enclosed": [
                    {"kind": "class", "name": "C", "modifiers": ["public"], "enclosed": []}
                ]}
            ]}
        ]
    }"#;

    #[test]
    fn test_parse_json_snapshot() {
        let api = SnapshotApi::parse_str(JSON, None, None).expect("valid snapshot");
        assert_eq!(api.name(), "v1");
        let top = api.top_level().expect("top level");
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].kind, ElementKind::Module);
        assert_ne!(api.fingerprint(), 0);
    }

    #[test]
    fn test_explicit_name_overrides_recorded_name() {
        let api = SnapshotApi::parse_str(JSON, Some(SnapshotFormat::Json), Some("left")).expect("valid snapshot");
        assert_eq!(api.name(), "left");
    }

    #[test]
    fn test_parse_yaml_snapshot() {
        let yaml = "packages:\n  - kind: package\n    name: p\n    enclosed: []\n";
        let api = SnapshotApi::parse_str(yaml, None, Some("y")).expect("valid snapshot");
        let top = api.top_level().expect("top level");
        assert_eq!(top[0].kind, ElementKind::Package);
        assert_eq!(api.enclosed(top[0]).expect("readable").map(<[Element]>::len), Some(0));
    }

    #[test]
    fn test_rejects_misplaced_top_level() {
        let json = r#"{"modules": [{"kind": "package", "name": "p"}]}"#;
        let err = SnapshotApi::parse_str(json, None, None).unwrap_err();
        assert!(err.to_string().contains("snapshot"), "{err}");

        let json = r#"{"modules": [{"kind": "module", "name": "m", "enclosed": [{"kind": "class", "name": "C"}]}]}"#;
        assert!(SnapshotApi::parse_str(json, None, None).is_err());
    }

    #[test]
    fn test_unreadable_container_is_an_error() {
        let json = r#"{"packages": [{"kind": "package", "name": "p", "loadError": "truncated class file"}]}"#;
        let api = SnapshotApi::parse_str(json, None, None).expect("valid snapshot");
        let top = api.top_level().expect("top level");
        assert!(matches!(api.enclosed(top[0]), Err(ApiError::Unreadable { .. })));
    }

    #[test]
    fn test_from_path_uses_file_stem() {
        let mut file = tempfile::Builder::new()
            .prefix("jdk17-")
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        file.write_all(br#"{"packages": []}"#).expect("write");

        let api = SnapshotApi::from_path(file.path(), None).expect("load");
        assert!(api.name().starts_with("jdk17-"));
        assert_eq!(api.source(), Some(file.path()));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = SnapshotApi::parse_str("{ not json", Some(SnapshotFormat::Json), None).unwrap_err();
        assert!(matches!(err, ApiDiffError::Load { .. }));
    }
}
