use crate::common::{API_KEY, run_cli};
use maverpc::config::{default_declaration, load_path};
use std::fs;

#[test]
fn test_check_builtin_declaration() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli(dir.path(), &["check"], &[("ALCHEMY_API_KEY", API_KEY)]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("main/alchemy\talchemy://****\tbatch=10@100ms"));
    assert!(stdout.trim_end().ends_with("ok"));
    assert!(!stdout.contains(API_KEY));
    assert!(!String::from_utf8_lossy(&output.stderr).contains(API_KEY));
}

#[test]
fn test_check_fails_without_credential() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli(dir.path(), &["check"], &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ALCHEMY_API_KEY"));
}

#[test]
fn test_show_json_is_redacted() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli(
        dir.path(),
        &["show", "--format", "json"],
        &[("ALCHEMY_API_KEY", API_KEY)],
    );
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["logLevel"], "info");
    let upstream = &value["projects"][0]["upstreams"][0];
    assert_eq!(value["projects"][0]["id"], "main");
    assert_eq!(upstream["endpoint"], "alchemy://****");
    assert_eq!(upstream["jsonRpc"]["supportsBatch"], true);
    assert_eq!(upstream["jsonRpc"]["batchMaxSize"], 10);
    assert_eq!(upstream["jsonRpc"]["batchMaxWait"], "100ms");
}

#[test]
fn test_init_writes_builtin_declaration() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_cli(dir.path(), &["init", "--output", "router.toml"], &[]);
    assert!(output.status.success());
    let written = load_path(&dir.path().join("router.toml")).unwrap();
    assert_eq!(written, default_declaration());

    let again = run_cli(dir.path(), &["init", "--output", "router.toml"], &[]);
    assert!(!again.status.success());
    assert!(String::from_utf8_lossy(&again.stderr).contains("--force"));

    let forced = run_cli(dir.path(), &["init", "--output", "router.toml", "--force"], &[]);
    assert!(forced.status.success());
}

#[test]
fn test_config_flag_and_env() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("custom.json"),
        r#"{ "logLevel": "warn", "projects": [{ "id": "edge", "upstreams": [{ "endpoint": "wss://ws.example.com" }] }] }"#,
    )
    .unwrap();

    let by_flag = run_cli(dir.path(), &["--config", "custom.json", "check"], &[]);
    assert!(by_flag.status.success());
    let stdout = String::from_utf8_lossy(&by_flag.stdout);
    assert!(stdout.contains("edge/ws.example.com\twss://ws.example.com\tbatch=off"));

    let by_env = run_cli(dir.path(), &["check"], &[("MAVERPC_CONFIG", "custom.json")]);
    assert!(by_env.status.success());
}

#[test]
fn test_default_file_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("maverpc.yaml"),
        "projects:\n  - id: local\n    upstreams:\n      - endpoint: http://127.0.0.1:8545\n",
    )
    .unwrap();

    let output = run_cli(dir.path(), &["check"], &[]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("local/127.0.0.1"));
}

#[test]
fn test_show_hides_header_values() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("maverpc.yaml"),
        "projects:\n  - id: main\n    upstreams:\n      - endpoint: https://rpc.example.com\n        jsonRpc:\n          headers:\n            X-Alchemy-Token: ${TOKEN}\n",
    )
    .unwrap();

    let output = run_cli(
        dir.path(),
        &["show", "--format", "json"],
        &[("TOKEN", "TOPSECRET")],
    );
    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("TOPSECRET"));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let headers = &value["projects"][0]["upstreams"][0]["jsonRpc"]["headers"];
    assert_eq!(headers["x-alchemy-token"], "****");
}
