//! Declaration resolution.
//!
//! Turns a `RouterConfig` into the typed `ResolvedConfig` handed to the router:
//! variables are expanded, endpoints parsed, ids assigned and batching
//! defaults applied.

use super::declaration::{DEFAULT_BATCH_MAX_SIZE, DEFAULT_BATCH_MAX_WAIT};
use super::endpoint::Endpoint;
use super::error::{ConfigError, Result};
use super::interpolate::{EnvSource, interpolate};
use super::settings::{LogLevel, RouterConfig, UpstreamConfig};
use super::validate::validate;
use crate::transport::{BatchPolicy, TransportPolicy};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Fully resolved router configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub log_level: LogLevel,
    pub projects: Vec<ResolvedProject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedProject {
    pub id: String,
    pub upstreams: Vec<ResolvedUpstream>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedUpstream {
    pub id: String,
    pub endpoint: Endpoint,
    #[serde(rename = "jsonRpc")]
    pub transport: TransportPolicy,
}

impl ResolvedConfig {
    #[must_use]
    pub fn project(&self, id: &str) -> Option<&ResolvedProject> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Total number of upstreams across all projects.
    #[must_use]
    pub fn upstream_count(&self) -> usize {
        self.projects.iter().map(|p| p.upstreams.len()).sum()
    }
}

impl ResolvedProject {
    #[must_use]
    pub fn upstream(&self, id: &str) -> Option<&ResolvedUpstream> {
        self.upstreams.iter().find(|u| u.id == id)
    }
}

impl RouterConfig {
    /// Validates the declaration and resolves it against `env`.
    ///
    /// # Errors
    ///
    /// Returns the first validation, interpolation or endpoint error.
    pub fn resolve(&self, env: &dyn EnvSource) -> Result<ResolvedConfig> {
        validate(self)?;

        let mut projects = Vec::with_capacity(self.projects.len());
        for (pi, project) in self.projects.iter().enumerate() {
            let mut upstreams = Vec::with_capacity(project.upstreams.len());
            let mut taken: HashMap<String, usize> = project
                .upstreams
                .iter()
                .filter_map(|u| u.id.clone())
                .map(|id| (id, 1))
                .collect();

            for (ui, upstream) in project.upstreams.iter().enumerate() {
                let path = format!("projects[{pi}].upstreams[{ui}]");
                let (endpoint, transport) = resolve_upstream(upstream, &path, env)?;
                let id = match &upstream.id {
                    Some(id) => id.clone(),
                    None => unique_id(endpoint.default_id(), &mut taken),
                };

                debug!(
                    project = %project.id,
                    upstream = %id,
                    endpoint = %endpoint,
                    batch = transport.supports_batch(),
                    "Resolved upstream"
                );

                upstreams.push(ResolvedUpstream {
                    id,
                    endpoint,
                    transport,
                });
            }

            projects.push(ResolvedProject {
                id: project.id.clone(),
                upstreams,
            });
        }

        Ok(ResolvedConfig {
            log_level: self.log_level,
            projects,
        })
    }
}

fn resolve_upstream(
    upstream: &UpstreamConfig,
    path: &str,
    env: &dyn EnvSource,
) -> Result<(Endpoint, TransportPolicy)> {
    let field = format!("{path}.endpoint");
    let raw = interpolate(&upstream.endpoint, &field, env)?;
    let endpoint =
        Endpoint::parse(&raw).map_err(|reason| ConfigError::InvalidEndpoint { field, reason })?;

    let rpc = &upstream.json_rpc;
    let mut headers = BTreeMap::new();
    let mut from_env = Vec::new();
    for (name, value) in &rpc.headers {
        let field = format!("{path}.jsonRpc.headers.{name}");
        let expanded = interpolate(value, &field, env)?;
        if expanded != *value {
            from_env.push(name);
        }
        headers.insert(name.clone(), expanded);
    }
    let mut headers = TransportPolicy::build_headers(&headers).map_err(|name| {
        ConfigError::invalid(
            format!("{path}.jsonRpc.headers.{name}"),
            "value is not a valid HTTP header value",
        )
    })?;
    // Values pulled from the environment are treated as secrets.
    for name in from_env {
        if let Some(value) = headers.get_mut(name) {
            value.set_sensitive(true);
        }
    }

    let batch = if rpc.supports_batch == Some(true) {
        Some(BatchPolicy::new(
            rpc.batch_max_size.unwrap_or(DEFAULT_BATCH_MAX_SIZE),
            rpc.batch_max_wait.unwrap_or(DEFAULT_BATCH_MAX_WAIT),
        ))
    } else {
        if rpc.has_batch_tuning() {
            warn!(
                upstream = %path,
                "batchMaxSize/batchMaxWait ignored because supportsBatch is not enabled"
            );
        }
        None
    };

    Ok((endpoint, TransportPolicy { batch, headers }))
}

fn unique_id(base: String, taken: &mut HashMap<String, usize>) -> String {
    let count = taken.entry(base.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        return base;
    }
    let mut n = *count;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken.contains_key(&candidate) {
            taken.insert(candidate.clone(), 1);
            return candidate;
        }
        n += 1;
    }
}
