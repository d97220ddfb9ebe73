//! Configuration module for api-diff.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use api_diff::api::AccessKind;
//! use api_diff::config::{AppConfig, ConfigPreset};
//!
//! // Use defaults
//! let config = AppConfig::default();
//!
//! // Use a preset
//! let config = AppConfig::from_preset(ConfigPreset::Docs);
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .access(AccessKind::Public)
//!     .exclude("java.base/jdk.internal.**")
//!     .fail_on_difference(true)
//!     .build();
//!
//! // Load from file
//! use api_diff::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None)?;
//! # Ok::<(), api_diff::config::ConfigFileError>(())
//! ```
//!
//! # Configuration File
//!
//! Place a `.apidiff.yaml` file in your project root or `~/.config/apidiff/`:
//!
//! ```yaml
//! comparison:
//!   access: public
//!   compare_doc_comments: true
//! selection:
//!   exclude:
//!     - java.base/jdk.internal.**
//! behavior:
//!   fail_on_difference: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

// Re-export main types
pub use defaults::ConfigPreset;
pub use types::{
    ApiSource, AppConfig, AppConfigBuilder, BehaviorConfig, CompareConfig, ComparisonConfig, NotesConfig,
    OutputConfig, SelectionConfig,
};
pub use validation::{ConfigError, Validatable};

// Re-export file utilities
pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, user_config_dir, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.apidiff.yaml` config files. It can be used by editors for
/// validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).expect("schema serialization should not fail")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_names_sections() {
        let schema: serde_json::Value = serde_json::from_str(&generate_json_schema()).unwrap();
        let properties = &schema["properties"];
        for section in ["comparison", "selection", "notes", "output", "behavior"] {
            assert!(properties.get(section).is_some(), "missing {section}");
        }
    }
}
