use crate::common::{API_KEY, archive_config, env_with_key};
use maverpc::config::{ConfigError, Provider, default_declaration};
use std::collections::HashMap;
use std::time::Duration;

#[test]
fn test_builtin_declaration_has_single_main_project() {
    let resolved = default_declaration().resolve(&env_with_key()).unwrap();

    assert_eq!(resolved.projects.len(), 1);
    assert_eq!(resolved.projects[0].id, "main");
}

#[test]
fn test_builtin_upstream_is_alchemy_with_credential() {
    let resolved = default_declaration().resolve(&env_with_key()).unwrap();
    let upstreams = &resolved.project("main").unwrap().upstreams;
    assert_eq!(upstreams.len(), 1);

    let endpoint = upstreams[0].endpoint.expose();
    assert!(endpoint.starts_with("alchemy://"));
    assert_eq!(&endpoint["alchemy://".len()..], API_KEY);
    assert_eq!(upstreams[0].endpoint.provider(), Some(Provider::Alchemy));
}

#[test]
fn test_builtin_batching_policy() {
    let resolved = default_declaration().resolve(&env_with_key()).unwrap();
    let transport = &resolved.projects[0].upstreams[0].transport;

    assert!(transport.supports_batch());
    let batch = transport.batch.unwrap();
    assert_eq!(batch.max_size, 10);
    assert_eq!(batch.max_wait, Duration::from_millis(100));
}

#[test]
fn test_builtin_requires_credential() {
    let err = default_declaration().resolve(&HashMap::new()).unwrap_err();
    match err {
        ConfigError::MissingEnv { var, field } => {
            assert_eq!(var, "ALCHEMY_API_KEY");
            assert_eq!(field, "projects[0].upstreams[0].endpoint");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_header_fallback_and_override() {
    let config = archive_config();

    let resolved = config.resolve(&env_with_key()).unwrap();
    let headers = &resolved.projects[0].upstreams[0].transport.headers;
    assert_eq!(headers["authorization"], "Bearer anonymous");

    let mut env = env_with_key();
    env.insert("AUTH_TOKEN".to_string(), "t0k3n".to_string());
    let resolved = config.resolve(&env).unwrap();
    let transport = &resolved.projects[0].upstreams[0].transport;

    let mut request = http::HeaderMap::new();
    transport.inject_headers(&mut request);
    assert_eq!(request["authorization"], "Bearer t0k3n");
}

#[test]
fn test_projects_keep_declaration_order() {
    let resolved = archive_config().resolve(&env_with_key()).unwrap();
    let ids: Vec<&str> = resolved.projects.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["main", "archive"]);

    let archive = resolved.project("archive").unwrap();
    let node = archive.upstream("archive-node").unwrap();
    assert!(!node.transport.supports_batch());
    assert_eq!(node.endpoint.to_string(), "https://archive.example.com/…");
}
