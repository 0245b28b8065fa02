//! Declaration file loading.
//!
//! Picks a format from the file extension and parses YAML, JSON or TOML into a
//! `RouterConfig`.

use super::error::{ConfigError, Result};
use super::interpolate::EnvSource;
use super::resolve::ResolvedConfig;
use super::settings::RouterConfig;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Supported declaration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Detects the format of `path` from its extension.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for missing or unknown extensions.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        ext.parse::<Self>().map_err(|()| {
            ConfigError::UnsupportedFormat(format!(
                "{} (expected .yaml, .yml, .json or .toml)",
                path.display()
            ))
        })
    }
}

impl FromStr for ConfigFormat {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        })
    }
}

/// Parses a declaration from text.
///
/// # Errors
///
/// Returns the format-specific parse error.
pub fn load_str(text: &str, format: ConfigFormat) -> Result<RouterConfig> {
    let config = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(text)?,
        ConfigFormat::Json => serde_json::from_str(text)?,
        ConfigFormat::Toml => toml::from_str(text)?,
    };
    Ok(config)
}

/// Reads and parses a declaration file.
///
/// # Errors
///
/// Returns `Io` when the file cannot be read, `UnsupportedFormat` for an
/// unknown extension, or the parse error.
pub fn load_path(path: &Path) -> Result<RouterConfig> {
    let format = ConfigFormat::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), %format, bytes = text.len(), "Read configuration file");
    load_str(&text, format)
}

/// Serializes any value in the given format.
///
/// # Errors
///
/// Returns `Serialize` if the encoder rejects the value.
pub fn render<T: Serialize + ?Sized>(value: &T, format: ConfigFormat) -> Result<String> {
    let text = match format {
        ConfigFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| ConfigError::Serialize(e.to_string()))?
        }
        ConfigFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        ConfigFormat::Toml => toml::to_string_pretty(value)?,
    };
    Ok(text)
}

/// Serializes a declaration in the given format.
///
/// # Errors
///
/// Returns `Serialize` if the encoder rejects the value.
pub fn to_string(config: &RouterConfig, format: ConfigFormat) -> Result<String> {
    render(config, format)
}

/// Loads, validates and resolves a declaration file.
///
/// # Errors
///
/// Returns any loading or resolution error.
pub fn load_and_resolve(path: &Path, env: &dyn EnvSource) -> Result<ResolvedConfig> {
    let config = load_path(path)?;
    let resolved = config.resolve(env)?;
    info!(
        path = %path.display(),
        projects = resolved.projects.len(),
        upstreams = resolved.upstream_count(),
        "Configuration loaded"
    );
    Ok(resolved)
}
