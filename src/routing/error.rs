//! Route configuration errors.

use std::fmt;

use thiserror::Error;

/// The prefab property that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    /// The prefab itself was missing.
    Prefab,
    Path,
    Component,
    Meta,
    Redirect,
    Props,
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigField::Prefab => "prefab",
            ConfigField::Path => "path",
            ConfigField::Component => "component",
            ConfigField::Meta => "meta",
            ConfigField::Redirect => "redirect",
            ConfigField::Props => "props",
        };
        f.write_str(name)
    }
}

/// A route declaration could not be turned into a config.
///
/// Raised only at construction time; the declaration must be fixed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid route config: `{field}` {reason}")]
pub struct InvalidConfig {
    pub field: ConfigField,
    pub reason: String,
}

impl InvalidConfig {
    pub fn new(field: ConfigField, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InvalidConfig::new(ConfigField::Path, "must be a string, got number");
        assert_eq!(
            err.to_string(),
            "invalid route config: `path` must be a string, got number"
        );
    }
}
