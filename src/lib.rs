//! Library definitions.
//!
//! Exports the router declaration model, its loader and resolver, and the
//! per-upstream transport policy consumed by the JSON-RPC router.

pub mod config;
pub mod logging;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;
pub use config::{
    ConfigError, ConfigFormat, Endpoint, EnvSource, LogLevel, ProcessEnv, Provider,
    ResolvedConfig, Result, RouterConfig, default_declaration, load_and_resolve,
};
pub use transport::{BatchPolicy, TransportPolicy};
