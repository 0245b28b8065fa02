//! Built-in router declaration.
//!
//! Used when no configuration file is supplied, and written out by `maverpc init`.

use super::settings::{JsonRpcConfig, LogLevel, ProjectConfig, RouterConfig, UpstreamConfig};
use std::collections::BTreeMap;
use std::time::Duration;

/// Environment variable holding the Alchemy API key.
pub const ALCHEMY_API_KEY_VAR: &str = "ALCHEMY_API_KEY";

/// Id of the default project.
pub const DEFAULT_PROJECT_ID: &str = "main";

/// Batch size applied when batching is enabled without an explicit size.
pub const DEFAULT_BATCH_MAX_SIZE: u32 = 10;

/// Batch window applied when batching is enabled without an explicit wait.
pub const DEFAULT_BATCH_MAX_WAIT: Duration = Duration::from_millis(100);

/// Longest accepted batch window.
pub const MAX_BATCH_MAX_WAIT: Duration = Duration::from_secs(60 * 60);

/// Returns the default declaration: one `main` project backed by Alchemy, with
/// JSON-RPC batching of up to 10 requests inside a 100ms window.
#[must_use]
pub fn default_declaration() -> RouterConfig {
    RouterConfig {
        log_level: LogLevel::Info,
        projects: vec![ProjectConfig {
            id: DEFAULT_PROJECT_ID.to_string(),
            upstreams: vec![UpstreamConfig {
                id: None,
                endpoint: format!("alchemy://${{{ALCHEMY_API_KEY_VAR}}}"),
                json_rpc: JsonRpcConfig {
                    supports_batch: Some(true),
                    batch_max_size: Some(DEFAULT_BATCH_MAX_SIZE),
                    batch_max_wait: Some(DEFAULT_BATCH_MAX_WAIT),
                    headers: BTreeMap::new(),
                },
            }],
        }],
    }
}
