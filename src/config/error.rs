//! Error types and result aliases.
//!
//! Defines the core `ConfigError` enumeration and common `Result` type.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, resolving or validating a declaration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The declaration file could not be read or written.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension does not map to a known format.
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Serializing a declaration back to text failed.
    #[error("serialization failed: {0}")]
    Serialize(String),

    /// A referenced environment variable is unset and has no fallback.
    #[error("environment variable {var} referenced by {field} is not set")]
    MissingEnv { var: String, field: String },

    /// An endpoint string could not be parsed.
    #[error("invalid endpoint at {field}: {reason}")]
    InvalidEndpoint { field: String, reason: String },

    /// A structural rule was violated.
    #[error("invalid configuration at {path}: {reason}")]
    Invalid { path: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

/// Result type alias for `ConfigError`.
pub type Result<T> = std::result::Result<T, ConfigError>;
