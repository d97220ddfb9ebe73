//! Snapshot file format detection.
//!
//! The file extension decides when it is conclusive; otherwise the first
//! meaningful line of the content is inspected.

use std::path::Path;

/// Serialization of a snapshot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }

    /// Format implied by a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Extension first, then content.
    #[must_use]
    pub fn detect(path: Option<&Path>, content: &str) -> Option<Self> {
        path.and_then(Self::from_path).or_else(|| detect_format(content))
    }
}

impl std::fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Detect the format from content alone.
///
/// Returns `None` for empty content or content that looks like neither.
#[must_use]
pub fn detect_format(content: &str) -> Option<SnapshotFormat> {
    let first = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))?;

    if first.starts_with('{') {
        return Some(SnapshotFormat::Json);
    }

    let yaml_key = first
        .split_once(':')
        .is_some_and(|(k, _)| !k.is_empty() && k.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    if first == "---" || yaml_key {
        tracing::debug!("Detected YAML snapshot from first line: {}", first);
        return Some(SnapshotFormat::Yaml);
    }

    None
}
