//! Configuration validation for api-diff.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BehaviorConfig, CompareConfig, NotesConfig, OutputConfig, SelectionConfig};
use crate::compare::Selector;
use std::collections::HashSet;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.selection.validate());
        errors.extend(self.notes.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for SelectionConfig {
    fn validate(&self) -> Vec<ConfigError> {
        match Selector::new(&self.include, &self.exclude) {
            Ok(_) => Vec::new(),
            Err(e) => vec![ConfigError::new("selection", e.to_string())],
        }
    }
}

impl Validatable for NotesConfig {
    fn validate(&self) -> Vec<ConfigError> {
        self.files
            .iter()
            .filter(|path| !path.is_file())
            .map(|path| ConfigError::new("notes.files", format!("Notes file not found: {}", path.display())))
            .collect()
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file
            && let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            errors.push(ConfigError::new(
                "output.file",
                format!("Parent directory does not exist: {}", parent.display()),
            ));
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        // only boolean flags
        Vec::new()
    }
}

impl Validatable for CompareConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.app.validate();

        if self.apis.len() < 2 {
            errors.push(ConfigError::new(
                "apis",
                format!("At least two snapshots are required, got {}", self.apis.len()),
            ));
        }

        let mut seen = HashSet::new();
        for source in &self.apis {
            if !source.path.exists() {
                errors.push(ConfigError::new(
                    "apis",
                    format!("Snapshot file not found: {}", source.path.display()),
                ));
            }
            if let Some(name) = &source.name {
                if name.is_empty() {
                    errors.push(ConfigError::new("apis", "Snapshot names must not be empty"));
                } else if !seen.insert(name.as_str()) {
                    errors.push(ConfigError::new("apis", format!("Duplicate snapshot name '{name}'")));
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiSource;
    use std::path::PathBuf;

    #[test]
    fn test_selection_validation() {
        let valid = SelectionConfig {
            include: vec!["java.base".to_string()],
            exclude: vec!["*/sun.*".to_string()],
        };
        assert!(valid.is_valid());

        let invalid = SelectionConfig {
            include: vec!["/p.*".to_string()],
            exclude: vec![],
        };
        let errors = invalid.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "selection");
    }

    #[test]
    fn test_missing_notes_file() {
        let config = NotesConfig {
            files: vec![PathBuf::from("/nonexistent/notes.txt")],
        };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::new("apis", "Duplicate snapshot name 'a'");
        assert_eq!(error.to_string(), "apis: Duplicate snapshot name 'a'");
    }

    #[test]
    fn test_compare_config_validation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("a.json");
        std::fs::write(&path, "{}").expect("write");

        let source = |name: &str| ApiSource {
            name: Some(name.to_string()),
            path: path.clone(),
        };
        let config = CompareConfig {
            apis: vec![source("a"), source("a")],
            app: AppConfig::default(),
            verbose: false,
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Duplicate"));

        let single = CompareConfig {
            apis: vec![source("a")],
            ..config
        };
        assert!(single.validate()[0].message.contains("At least two"));
    }

    #[test]
    fn test_app_config_validation() {
        assert!(AppConfig::default().is_valid());
    }
}
