//! Environment variable interpolation.
//!
//! Expands `${NAME}` and `${NAME:-fallback}` references inside declaration
//! strings. `$$` produces a literal `$`.

use super::error::{ConfigError, Result};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::env;
use std::sync::OnceLock;

static REFERENCE: OnceLock<Regex> = OnceLock::new();

fn reference_pattern() -> &'static Regex {
    REFERENCE.get_or_init(|| {
        Regex::new(r"\$(?:\$|\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\})")
            .expect("interpolation pattern is valid")
    })
}

/// Source of variable values.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Expands every reference in `input`.
///
/// `field` names the declaration path and is used only in error messages.
///
/// # Errors
///
/// Returns `MissingEnv` when a variable without fallback is unset, or
/// `Invalid` when a `${` is never closed.
pub fn interpolate(input: &str, field: &str, env: &dyn EnvSource) -> Result<String> {
    if !input.contains('$') {
        return Ok(input.to_string());
    }

    let mut out = String::with_capacity(input.len());
    let mut last = 0;

    for caps in reference_pattern().captures_iter(input) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        check_unterminated(&input[last..whole.start()], field)?;
        out.push_str(&input[last..whole.start()]);
        out.push_str(&expand(&caps, field, env)?);
        last = whole.end();
    }

    check_unterminated(&input[last..], field)?;
    out.push_str(&input[last..]);
    Ok(out)
}

fn expand(caps: &Captures<'_>, field: &str, env: &dyn EnvSource) -> Result<String> {
    let Some(name) = caps.get(1) else {
        return Ok("$".to_string());
    };
    let name = name.as_str();

    if caps.get(2).is_some_and(|fallback| fallback.as_str().contains('$')) {
        return Err(ConfigError::invalid(
            field,
            format!("fallback for '{name}' cannot contain another reference"),
        ));
    }

    match (env.var(name), caps.get(2)) {
        (Some(value), Some(fallback)) if value.is_empty() => Ok(fallback.as_str().to_string()),
        (Some(value), _) => Ok(value),
        (None, Some(fallback)) => Ok(fallback.as_str().to_string()),
        (None, None) => Err(ConfigError::MissingEnv {
            var: name.to_string(),
            field: field.to_string(),
        }),
    }
}

fn check_unterminated(segment: &str, field: &str) -> Result<()> {
    if segment.contains("${") {
        return Err(ConfigError::invalid(
            field,
            "unterminated or malformed ${...} reference",
        ));
    }
    Ok(())
}
