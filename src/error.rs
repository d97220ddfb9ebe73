//! Unified error types for api-diff.
//!
//! Contract violations ([`KeyError`]) and provider failures ([`ApiError`])
//! abort a comparison and surface here as [`ApiDiffError::Compare`].
//! Recoverable input problems (bad notes lines) are not errors at this level;
//! they are collected as diagnostics by the pipeline.

use crate::api::ApiError;
use crate::model::KeyError;
use crate::notes::NotesError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for api-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiDiffError {
    /// Errors while reading a snapshot
    #[error("Failed to load snapshot: {context}")]
    Load {
        context: String,
        #[source]
        source: LoadErrorKind,
    },

    /// Errors that abort a comparison
    #[error("Comparison aborted: {context}")]
    Compare {
        context: String,
        #[source]
        source: CompareErrorKind,
    },

    /// Errors that make a notes file unusable
    #[error("Failed to read notes: {context}")]
    Notes {
        context: String,
        #[source]
        source: NotesError,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific snapshot load error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Unknown snapshot format - expected JSON or YAML")]
    UnknownFormat,

    #[error("Snapshot file is {size_mb} MB, exceeding the {limit_mb} MB limit")]
    TooLarge { size_mb: u64, limit_mb: u64 },

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Specific comparison error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CompareErrorKind {
    #[error("contract violation: {0}")]
    Contract(#[from] KeyError),

    #[error(transparent)]
    Provider(#[from] ApiError),

    #[error("at least two APIs are required, got {0}")]
    TooFewApis(usize),

    #[error("API name '{0}' is used more than once")]
    DuplicateApiName(String),
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("Output format not supported for this operation: {0}")]
    UnsupportedFormat(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for api-diff operations
pub type Result<T> = std::result::Result<T, ApiDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ApiDiffError {
    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create a load error for unknown format
    pub fn unknown_format(path: impl Into<String>) -> Self {
        Self::load(format!("at {}", path.into()), LoadErrorKind::UnknownFormat)
    }

    /// Create a comparison error
    pub fn compare(context: impl Into<String>, source: CompareErrorKind) -> Self {
        Self::Compare {
            context: context.into(),
            source,
        }
    }

    /// Create a notes error
    pub fn notes(context: impl Into<String>, source: NotesError) -> Self {
        Self::Notes {
            context: context.into(),
            source,
        }
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// True for errors raised by a contract violation in snapshot data.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::Compare {
                source: CompareErrorKind::Contract(_),
                ..
            }
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for ApiDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ApiDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::load("JSON deserialization", LoadErrorKind::InvalidJson(err.to_string()))
    }
}

impl From<serde_yaml_ng::Error> for ApiDiffError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::load("YAML deserialization", LoadErrorKind::InvalidYaml(err.to_string()))
    }
}

impl From<KeyError> for ApiDiffError {
    fn from(err: KeyError) -> Self {
        Self::compare("", CompareErrorKind::Contract(err))
    }
}

impl From<ApiError> for ApiDiffError {
    fn from(err: ApiError) -> Self {
        Self::compare("", CompareErrorKind::Provider(err))
    }
}

impl From<NotesError> for ApiDiffError {
    fn from(err: NotesError) -> Self {
        Self::notes("", err)
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outward, so an error raised deep in the engine reads
/// `comparing module m: package p: contract violation: ...`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ApiDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: ApiDiffError, new_ctx: &str) -> ApiDiffError {
    match err {
        ApiDiffError::Load {
            context: existing,
            source,
        } => ApiDiffError::Load {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ApiDiffError::Compare {
            context: existing,
            source,
        } => ApiDiffError::Compare {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ApiDiffError::Notes {
            context: existing,
            source,
        } => ApiDiffError::Notes {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ApiDiffError::Report {
            context: existing,
            source,
        } => ApiDiffError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ApiDiffError::Io {
            path,
            message,
            source,
        } => ApiDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        ApiDiffError::Config(msg) => ApiDiffError::Config(chain_context(new_ctx, &msg)),
        ApiDiffError::Validation(msg) => ApiDiffError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| ApiDiffError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| ApiDiffError::Validation(f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ElementKind;

    #[test]
    fn test_error_display() {
        let err = ApiDiffError::unknown_format("api.txt");
        let display = err.to_string();
        assert!(display.contains("api.txt"), "{display}");

        let err = ApiDiffError::compare("root", CompareErrorKind::TooFewApis(1));
        assert!(err.to_string().contains("Comparison aborted"));
    }

    #[test]
    fn test_error_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ApiDiffError::io("/path/to/api.json", io_err);

        assert!(err.to_string().contains("/path/to/api.json"));
    }

    #[test]
    fn test_key_error_is_contract_violation() {
        let err: ApiDiffError = KeyError::UnsupportedKind(ElementKind::StaticInit).into();
        assert!(err.is_contract_violation());

        let err: ApiDiffError = ApiError::Provider("boom".into()).into();
        assert!(!err.is_contract_violation());
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(KeyError::UnsupportedType("union").into())
        }

        fn middle() -> Result<()> {
            inner().context("package p")
        }

        fn outer() -> Result<()> {
            middle().context("module m")
        }

        match outer() {
            Err(ApiDiffError::Compare { context, source }) => {
                assert_eq!(context, "module m: package p");
                assert!(matches!(source, CompareErrorKind::Contract(_)));
            }
            other => panic!("Expected Compare error, got {other:?}"),
        }
    }

    #[test]
    fn test_option_context() {
        let none: Option<u32> = None;
        let err = none.context_none("missing API name").unwrap_err();
        assert!(matches!(err, ApiDiffError::Validation(_)));
        assert_eq!(Some(3).context_none("unused").ok(), Some(3));
    }
}
