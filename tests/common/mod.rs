use maverpc::config::{JsonRpcConfig, LogLevel, ProjectConfig, RouterConfig, UpstreamConfig};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::process::{Command, Output};
use std::time::Duration;

pub const API_KEY: &str = "integration-secret-key";

pub fn env_with_key() -> HashMap<String, String> {
    HashMap::from([("ALCHEMY_API_KEY".to_string(), API_KEY.to_string())])
}

pub fn archive_config() -> RouterConfig {
    RouterConfig {
        log_level: LogLevel::Info,
        projects: vec![
            ProjectConfig {
                id: "main".to_string(),
                upstreams: vec![UpstreamConfig {
                    id: None,
                    endpoint: "alchemy://${ALCHEMY_API_KEY}".to_string(),
                    json_rpc: JsonRpcConfig {
                        supports_batch: Some(true),
                        batch_max_size: Some(25),
                        batch_max_wait: Some(Duration::from_millis(50)),
                        headers: BTreeMap::from([(
                            "Authorization".to_string(),
                            "Bearer ${AUTH_TOKEN:-anonymous}".to_string(),
                        )]),
                    },
                }],
            },
            ProjectConfig {
                id: "archive".to_string(),
                upstreams: vec![UpstreamConfig {
                    id: Some("archive-node".to_string()),
                    endpoint: "https://archive.example.com/rpc".to_string(),
                    json_rpc: JsonRpcConfig::default(),
                }],
            },
        ],
    }
}

/// Runs the `maverpc` binary inside `dir` with a clean environment.
pub fn run_cli(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_maverpc"));
    cmd.current_dir(dir)
        .args(args)
        .env_remove("ALCHEMY_API_KEY")
        .env_remove("MAVERPC_CONFIG")
        .env_remove("RUST_LOG")
        .env("LOG_FORMAT", "pretty");
    for (k, v) in env {
        cmd.env(k, v);
    }
    cmd.output().expect("failed to run maverpc")
}
