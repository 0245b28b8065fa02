//! Test utilities and shared configuration.
//!
//! This module provides common helpers for unit and integration tests,
//! reducing duplication across the codebase.

#[cfg(any(test, feature = "testing"))]
use crate::config::{JsonRpcConfig, LogLevel, ProjectConfig, RouterConfig, UpstreamConfig};
#[cfg(any(test, feature = "testing"))]
use std::collections::{BTreeMap, HashMap};
#[cfg(any(test, feature = "testing"))]
use std::time::Duration;

/// Credential used by [`test_env`].
#[cfg(any(test, feature = "testing"))]
pub const TEST_API_KEY: &str = "test-alchemy-key";

/// Creates a declaration with two projects for testing purposes.
///
/// This configuration has:
/// - A `main` project with a batching Alchemy upstream and a plain HTTPS upstream
/// - A `fallback` project with a single WebSocket upstream and no batching
/// - Debug log level
#[cfg(any(test, feature = "testing"))]
#[must_use]
pub fn create_test_config() -> RouterConfig {
    RouterConfig {
        log_level: LogLevel::Debug,
        projects: vec![
            ProjectConfig {
                id: "main".to_string(),
                upstreams: vec![
                    UpstreamConfig {
                        id: None,
                        endpoint: "alchemy://${ALCHEMY_API_KEY}".to_string(),
                        json_rpc: JsonRpcConfig {
                            supports_batch: Some(true),
                            batch_max_size: Some(10),
                            batch_max_wait: Some(Duration::from_millis(100)),
                            headers: BTreeMap::new(),
                        },
                    },
                    UpstreamConfig {
                        id: Some("public".to_string()),
                        endpoint: "https://rpc.example.com".to_string(),
                        json_rpc: JsonRpcConfig {
                            headers: BTreeMap::from([(
                                "X-Client".to_string(),
                                "maverpc".to_string(),
                            )]),
                            ..JsonRpcConfig::default()
                        },
                    },
                ],
            },
            ProjectConfig {
                id: "fallback".to_string(),
                upstreams: vec![UpstreamConfig {
                    id: None,
                    endpoint: "wss://ws.example.com/socket".to_string(),
                    json_rpc: JsonRpcConfig::default(),
                }],
            },
        ],
    }
}

/// An upstream with only an endpoint set.
#[cfg(any(test, feature = "testing"))]
#[must_use]
pub fn upstream(endpoint: &str) -> UpstreamConfig {
    UpstreamConfig {
        id: None,
        endpoint: endpoint.to_string(),
        json_rpc: JsonRpcConfig::default(),
    }
}

/// Variables satisfying every reference in [`create_test_config`].
#[cfg(any(test, feature = "testing"))]
#[must_use]
pub fn test_env() -> HashMap<String, String> {
    HashMap::from([("ALCHEMY_API_KEY".to_string(), TEST_API_KEY.to_string())])
}
