//! Configuration types for api-diff operations.

use crate::api::AccessKind;
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// What is compared
    pub comparison: ComparisonConfig,
    /// Module and package selection
    pub selection: SelectionConfig,
    /// Notes files attached to reports
    pub notes: NotesConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the minimum access level compared.
    pub const fn access(mut self, access: AccessKind) -> Self {
        self.config.comparison.access = access;
        self
    }

    /// Compare raw doc comments.
    pub const fn compare_doc_comments(mut self, enabled: bool) -> Self {
        self.config.comparison.compare_doc_comments = enabled;
        self
    }

    /// Compare rendered API descriptions.
    pub const fn compare_api_descriptions(mut self, enabled: bool) -> Self {
        self.config.comparison.compare_api_descriptions = enabled;
        self
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.config.selection.include.push(pattern.into());
        self
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.config.selection.exclude.push(pattern.into());
        self
    }

    /// Add a notes file.
    pub fn notes_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.notes.files.push(path.into());
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Exit non-zero when differences are found.
    pub const fn fail_on_difference(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_difference = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the `AppConfig`.
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section types
// ============================================================================

/// Which attributes and members are compared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Least accessible members still compared: public, protected, package, private
    pub access: AccessKind,
    /// Compare raw doc comments
    pub compare_doc_comments: bool,
    /// Compare rendered API descriptions
    pub compare_api_descriptions: bool,
}

/// Include/exclude patterns for modules and packages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SelectionConfig {
    /// Patterns selecting what is compared; empty selects everything
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    /// Patterns removed from the selection
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

/// Notes files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NotesConfig {
    /// Files read in order; later files add to earlier ones
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<PathBuf>,
}

/// Output-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Behavior flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if the APIs differ
    pub fail_on_difference: bool,
    /// Suppress the report on stdout
    pub quiet: bool,
}

// ============================================================================
// Command configuration
// ============================================================================

/// One snapshot named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSource {
    /// Explicit display name; the snapshot's own name or file stem otherwise
    pub name: Option<String>,
    pub path: PathBuf,
}

/// Configuration for the compare command.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Snapshots in comparison order
    pub apis: Vec<ApiSource>,
    pub app: AppConfig,
    /// Mirror engine events to the log
    pub verbose: bool,
}
