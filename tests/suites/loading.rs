use crate::common::{API_KEY, archive_config, env_with_key};
use maverpc::config::{
    ConfigError, ConfigFormat, default_declaration, load_and_resolve, load_path, to_string,
};
use std::fs;

#[test]
fn test_files_in_every_format_load_identically() {
    let dir = tempfile::tempdir().unwrap();
    let expected = archive_config();

    for (name, format) in [
        ("router.yaml", ConfigFormat::Yaml),
        ("router.json", ConfigFormat::Json),
        ("router.toml", ConfigFormat::Toml),
    ] {
        let path = dir.path().join(name);
        fs::write(&path, to_string(&expected, format).unwrap()).unwrap();
        assert_eq!(load_path(&path).unwrap(), expected, "{name}");
    }
}

#[test]
fn test_load_and_resolve_hand_written_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("maverpc.yml");
    fs::write(
        &path,
        r#"
logLevel: debug
projects:
  - id: main
    upstreams:
      - endpoint: alchemy://${ALCHEMY_API_KEY}
        jsonRpc:
          supportsBatch: true
          batchMaxSize: 10
          batchMaxWait: 100ms
      - id: backup
        endpoint: https://eth.example.org
"#,
    )
    .unwrap();

    let resolved = load_and_resolve(&path, &env_with_key()).unwrap();
    let main = resolved.project("main").unwrap();
    assert_eq!(main.upstreams.len(), 2);
    assert_eq!(main.upstreams[0].endpoint.expose(), format!("alchemy://{API_KEY}"));
    assert!(main.upstream("backup").is_some());
}

#[test]
fn test_validation_errors_surface_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{ "projects": [{ "id": "main", "upstreams": [{ "endpoint": "alchemy://k", "jsonRpc": { "batchMaxSize": 0 } }] }] }"#,
    )
    .unwrap();

    match load_and_resolve(&path, &env_with_key()).unwrap_err() {
        ConfigError::Invalid { path, .. } => {
            assert_eq!(path, "projects[0].upstreams[0].jsonRpc.batchMaxSize");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_scheme_rejected() {
    let mut config = default_declaration();
    config.projects[0].upstreams[0].endpoint = "gopher://${ALCHEMY_API_KEY}".to_string();
    assert!(matches!(
        config.resolve(&env_with_key()),
        Err(ConfigError::InvalidEndpoint { .. })
    ));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("erpc.ts");
    fs::write(&path, "export default {}").unwrap();
    assert!(matches!(
        load_path(&path),
        Err(ConfigError::UnsupportedFormat(_))
    ));
}
