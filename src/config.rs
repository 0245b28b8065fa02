//! Configuration management.
//!
//! Loads the router declaration from YAML, JSON or TOML, expands `${VAR}`
//! references from the environment and resolves it into typed upstream
//! settings. A built-in declaration is used when no file is given.

mod declaration;
mod endpoint;
mod error;
mod interpolate;
mod loader;
mod resolve;
mod settings;
mod validate;

pub use declaration::{
    ALCHEMY_API_KEY_VAR, DEFAULT_BATCH_MAX_SIZE, DEFAULT_BATCH_MAX_WAIT, DEFAULT_PROJECT_ID,
    MAX_BATCH_MAX_WAIT, default_declaration,
};
pub use endpoint::{Endpoint, Provider};
pub use error::{ConfigError, Result};
pub use interpolate::{EnvSource, ProcessEnv, interpolate};
pub use loader::{ConfigFormat, load_and_resolve, load_path, load_str, render, to_string};
pub use resolve::{ResolvedConfig, ResolvedProject, ResolvedUpstream};
pub use settings::{JsonRpcConfig, LogLevel, ProjectConfig, RouterConfig, UpstreamConfig};
pub use validate::validate;
