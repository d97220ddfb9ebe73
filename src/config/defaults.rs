//! Default values and presets for api-diff configuration.

use super::types::{AppConfig, ComparisonConfig};
use crate::api::AccessKind;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Public and protected signatures, no documentation
    #[default]
    Default,
    /// Signatures plus doc comments and API descriptions
    Docs,
    /// Everything down to private members, including documentation
    Full,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Docs => "docs",
            Self::Full => "full",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "signatures" => Some(Self::Default),
            "docs" | "documentation" => Some(Self::Docs),
            "full" | "all" => Some(Self::Full),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Public and protected signatures, annotations and directives",
            Self::Docs => "Default comparison plus doc comments and API descriptions",
            Self::Full => "Every member regardless of access, with documentation",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Docs, Self::Full]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Docs => Self::docs_preset(),
            ConfigPreset::Full => Self::full_preset(),
        }
    }

    fn docs_preset() -> Self {
        Self {
            comparison: ComparisonConfig {
                access: AccessKind::Protected,
                compare_doc_comments: true,
                compare_api_descriptions: true,
            },
            ..Self::default()
        }
    }

    fn full_preset() -> Self {
        Self {
            comparison: ComparisonConfig {
                access: AccessKind::Private,
                compare_doc_comments: true,
                compare_api_descriptions: true,
            },
            ..Self::default()
        }
    }
}
