//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::api::AccessKind;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[".apidiff.yaml", ".apidiff.yml", "apidiff.yaml", "apidiff.yml"];

/// Subdirectory of the user config directory searched for config files.
const CONFIG_DIR_NAME: &str = "apidiff";

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/apidiff/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    if let Some(git_root) = find_git_root()
        && let Some(path) = find_config_in_dir(&git_root)
    {
        return Some(path);
    }

    if let Some(path) = user_config_dir().and_then(|dir| find_config_in_dir(&dir)) {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// The per-user configuration directory, whether or not it exists.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml_ng::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "Config file not found: {}", path.display()),
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml_ng::Error> for ConfigFileError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    // An empty file is a valid, all-default config.
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    Ok(serde_yaml_ng::from_str(&content)?)
}

/// Load config from discovered file, or return default.
///
/// A file that was named explicitly but cannot be loaded is an error;
/// a discovered file that cannot be loaded only logs a warning.
pub fn load_or_default(explicit_path: Option<&Path>) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    if let Some(path) = explicit_path {
        return load_config_file(path).map(|config| (config, Some(path.to_path_buf())));
    }

    Ok(discover_config_file(None).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    ))
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only settings that differ from their defaults override; lists are
    /// appended.
    pub fn merge(&mut self, other: &Self) {
        if other.comparison.access != AccessKind::default() {
            self.comparison.access = other.comparison.access;
        }
        if other.comparison.compare_doc_comments {
            self.comparison.compare_doc_comments = true;
        }
        if other.comparison.compare_api_descriptions {
            self.comparison.compare_api_descriptions = true;
        }

        self.selection.include.extend(other.selection.include.iter().cloned());
        self.selection.exclude.extend(other.selection.exclude.iter().cloned());
        self.notes.files.extend(other.notes.files.iter().cloned());

        if other.output.format != ReportFormat::default() {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        if other.behavior.fail_on_difference {
            self.behavior.fail_on_difference = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> Result<(Self, Option<PathBuf>), ConfigFileError> {
        let (mut config, loaded_from) = load_or_default(config_path)?;
        config.merge(cli_overrides);
        Ok((config, loaded_from))
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content from the default settings.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# api-diff configuration
# Place this file at .apidiff.yaml in your project root or ~/.config/apidiff/

{}",
        serde_yaml_ng::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# api-diff configuration file
# ============================
#
# Place it at:
#   - .apidiff.yaml in your project root
#   - ~/.config/apidiff/apidiff.yaml for global config
#
# CLI arguments always override file settings.

# What is compared
comparison:
  # Least accessible members compared: public, protected, package, private
  access: protected
  # Compare raw doc comments
  compare_doc_comments: false
  # Compare rendered API descriptions
  compare_api_descriptions: false

# Module and package selection
selection:
  # Patterns: m, m/**, m/p.*, m/p.**, */p.*, p.*
  # e.g. include: [java.base]
  include: []
  # e.g. exclude: [java.base/jdk.internal.**]
  exclude: []

# Notes attached to reported entities
notes:
  # e.g. files: [api-notes.txt]
  files: []

# Output configuration
output:
  # Format: summary, json
  format: summary
  # Output file path (omit for stdout)
  # file: report.json
  # Disable colored output
  no_color: false

# Behavior flags
behavior:
  # Exit with code 1 if the APIs differ
  fail_on_difference: false
  # Suppress the report on stdout
  quiet: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".apidiff.yaml");
        std::fs::write(&config_path, "behavior:\n  quiet: true\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
comparison:
  access: public
  compare_doc_comments: true
selection:
  exclude:
    - '*/internal.**'
output:
  format: json
behavior:
  fail_on_difference: true
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.comparison.access, AccessKind::Public);
        assert!(config.comparison.compare_doc_comments);
        assert_eq!(config.selection.exclude, vec!["*/internal.**".to_string()]);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.behavior.fail_on_difference);
    }

    #[test]
    fn test_load_empty_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("empty.yaml");
        std::fs::write(&config_path, "\n").unwrap();

        assert_eq!(load_config_file(&config_path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        assert!(load_or_default(Some(Path::new("/nonexistent/config.yaml"))).is_err());
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder().include("java.base").no_color(true).build();
        let overrides = AppConfig::builder()
            .access(AccessKind::Public)
            .include("java.sql")
            .output_format(ReportFormat::Json)
            .fail_on_difference(true)
            .build();

        base.merge(&overrides);

        assert_eq!(base.comparison.access, AccessKind::Public);
        assert_eq!(base.selection.include, vec!["java.base", "java.sql"]);
        assert_eq!(base.output.format, ReportFormat::Json);
        assert!(base.output.no_color);
        assert!(base.behavior.fail_on_difference);
    }

    #[test]
    fn test_generated_examples_parse() {
        let example = generate_example_config();
        assert!(example.contains("comparison:"));
        let parsed: AppConfig = serde_yaml_ng::from_str(&example).unwrap();
        assert_eq!(parsed, AppConfig::default());

        let full: AppConfig = serde_yaml_ng::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(full, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "output:\n  no_color: true\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
