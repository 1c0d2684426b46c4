mod support;

use serde_json::json;
use spybase::{Class, LogScope, SpyBase, SpyConfig, SpyError, args, load_config};
use std::fs;
use support::my_test_class;
use tempfile::tempdir;

#[test]
fn test_missing_config_file_means_defaults() {
    let tmp = tempdir().unwrap();
    let config = load_config(tmp.path()).unwrap();
    assert_eq!(config, SpyConfig::default());
    assert_eq!(config.log_scope, LogScope::Shared);
}

#[test]
fn test_config_file_loaded_from_dir() {
    let tmp = tempdir().unwrap();
    fs::write(
        tmp.path().join("spybase.toml"),
        "log_scope = \"per_type\"\nreserved_patterns = [\"^_internal_\"]\n",
    )
    .unwrap();

    let config = load_config(tmp.path()).unwrap();
    assert_eq!(config.log_scope, LogScope::PerType);
    assert_eq!(config.reserved_patterns, vec!["^_internal_".to_string()]);
}

#[test]
fn test_malformed_config_file_is_config_error() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("spybase.toml"), "log_scope = 3").unwrap();
    let err = load_config(tmp.path()).unwrap_err();
    assert!(matches!(err, SpyError::Config(_)));
}

#[test]
fn test_invalid_pattern_rejected_by_capability() {
    let config = SpyConfig {
        reserved_patterns: vec!["[".to_string()],
        ..SpyConfig::default()
    };
    assert!(matches!(
        SpyBase::with_config(config),
        Err(SpyError::Pattern(_))
    ));
}

#[test]
fn test_per_type_scope_from_config() {
    let config = SpyConfig {
        log_scope: LogScope::PerType,
        ..SpyConfig::default()
    };
    let base = SpyBase::with_config(config).unwrap();
    let spy = base.spy("Isolated").wraps(&my_test_class()).build().unwrap();

    spy.instantiate()
        .unwrap()
        .call("instance_method_normal", &args![1])
        .unwrap();

    assert!(base.get_calls().is_empty());
    assert_eq!(spy.get_calls().len(), 1);
}

#[test]
fn test_reserved_patterns_skip_interception() {
    let real = Class::builder("Service")
        .method("_internal_flush", |_, _, _| Ok(json!("flushed")))
        .method("serve", |_, _, _| Ok(json!("served")))
        .build();
    let config = SpyConfig::from_toml_str("reserved_patterns = [\"^_internal_\"]").unwrap();
    let base = SpyBase::with_config(config).unwrap();
    let spy = base.spy("ServiceSpy").wraps(&real).build().unwrap();

    let mut s = spy.instantiate().unwrap();
    assert_eq!(s.call("_internal_flush", &[]).unwrap(), json!("flushed"));
    assert_eq!(s.call("serve", &[]).unwrap(), json!("served"));

    let calls = base.get_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].member(), "serve");
}
