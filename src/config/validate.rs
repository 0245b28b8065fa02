//! Structural validation of a declaration.
//!
//! Runs before interpolation so that shape errors are reported even when
//! credentials are not available.

use super::declaration::MAX_BATCH_MAX_WAIT;
use super::error::{ConfigError, Result};
use super::settings::{JsonRpcConfig, RouterConfig};
use http::HeaderName;
use std::collections::HashSet;
use std::time::Duration;

/// Headers the router owns and a declaration may not override.
const RESERVED_HEADERS: [&str; 4] = ["connection", "content-length", "host", "transfer-encoding"];

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Checks a declaration and reports the first violation.
///
/// # Errors
///
/// Returns `ConfigError::Invalid` naming the offending path.
pub fn validate(config: &RouterConfig) -> Result<()> {
    if config.projects.is_empty() {
        return Err(ConfigError::invalid(
            "projects",
            "at least one project is required",
        ));
    }

    let mut project_ids = HashSet::new();
    for (pi, project) in config.projects.iter().enumerate() {
        let path = format!("projects[{pi}]");

        if !is_valid_id(&project.id) {
            return Err(ConfigError::invalid(
                format!("{path}.id"),
                format!(
                    "'{}' must be non-empty and contain only letters, digits, '-' or '_'",
                    project.id
                ),
            ));
        }
        if !project_ids.insert(project.id.as_str()) {
            return Err(ConfigError::invalid(
                format!("{path}.id"),
                format!("duplicate project id '{}'", project.id),
            ));
        }
        if project.upstreams.is_empty() {
            return Err(ConfigError::invalid(
                format!("{path}.upstreams"),
                "at least one upstream is required",
            ));
        }

        let mut upstream_ids = HashSet::new();
        for (ui, upstream) in project.upstreams.iter().enumerate() {
            let path = format!("{path}.upstreams[{ui}]");

            if let Some(id) = &upstream.id {
                if !is_valid_id(id) {
                    return Err(ConfigError::invalid(
                        format!("{path}.id"),
                        format!(
                            "'{id}' must be non-empty and contain only letters, digits, '-' or '_'"
                        ),
                    ));
                }
                if !upstream_ids.insert(id.as_str()) {
                    return Err(ConfigError::invalid(
                        format!("{path}.id"),
                        format!("duplicate upstream id '{id}' in project '{}'", project.id),
                    ));
                }
            }

            if upstream.endpoint.trim().is_empty() {
                return Err(ConfigError::invalid(
                    format!("{path}.endpoint"),
                    "endpoint is required",
                ));
            }

            validate_json_rpc(&upstream.json_rpc, &format!("{path}.jsonRpc"))?;
        }
    }

    Ok(())
}

fn validate_json_rpc(rpc: &JsonRpcConfig, path: &str) -> Result<()> {
    if rpc.batch_max_size == Some(0) {
        return Err(ConfigError::invalid(
            format!("{path}.batchMaxSize"),
            "must be at least 1",
        ));
    }
    match rpc.batch_max_wait {
        Some(Duration::ZERO) => {
            return Err(ConfigError::invalid(
                format!("{path}.batchMaxWait"),
                "must be greater than zero",
            ));
        }
        Some(wait) if wait > MAX_BATCH_MAX_WAIT => {
            return Err(ConfigError::invalid(
                format!("{path}.batchMaxWait"),
                format!(
                    "must not exceed {}",
                    humantime::format_duration(MAX_BATCH_MAX_WAIT)
                ),
            ));
        }
        _ => {}
    }

    let mut seen = HashSet::new();
    for name in rpc.headers.keys() {
        let header = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            ConfigError::invalid(
                format!("{path}.headers"),
                format!("'{name}' is not a valid header name"),
            )
        })?;
        if RESERVED_HEADERS.contains(&header.as_str()) {
            return Err(ConfigError::invalid(
                format!("{path}.headers"),
                format!("'{name}' is managed by the router and cannot be overridden"),
            ));
        }
        if !seen.insert(header) {
            return Err(ConfigError::invalid(
                format!("{path}.headers"),
                format!("'{name}' is declared more than once"),
            ));
        }
    }

    Ok(())
}
