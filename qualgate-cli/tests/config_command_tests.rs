//! Integration tests for `qualgate config` and configuration loading.
//!
//! Tests config loading and engine construction with real TOML files.

use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use qualgate_cli::commands::{Engine, load_config};

fn write_config(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("should write config");
    path
}

#[tokio::test]
#[serial]
async fn test_load_valid_config_builds_engine() {
    // Given: A valid config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = write_config(
        &temp_dir,
        "qualgate.toml",
        r#"
[general]
log_level = "debug"
log_format = "pretty"

[admission]
domain = "a.b.c.d.e.f:5000"
operations = ["create", "update"]
"#,
    );

    // When: Loading the config and building the engine
    let config = load_config(Some(&path)).await.expect("valid config should load");
    let engine = Engine::from_config(&config).expect("domain should be valid");

    // Then: The configured domain is used
    assert_eq!(engine.domain().as_str(), "a.b.c.d.e.f:5000");
    assert_eq!(config.general.log_format, "pretty");
}

#[tokio::test]
#[serial]
async fn test_load_without_path_uses_defaults() {
    let config = load_config(None).await.expect("defaults should load");
    assert_eq!(config.admission.domain, "localhost:5000");
    assert_eq!(config.admission.operations, vec!["create"]);
}

#[tokio::test]
#[serial]
async fn test_load_malformed_toml() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = write_config(&temp_dir, "bad.toml", "[admission\ndomain = \"test.io\"\n");

    let err = load_config(Some(&path)).await.expect_err("malformed TOML should fail");
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
#[serial]
async fn test_load_missing_file() {
    let path = std::path::PathBuf::from("/nonexistent/qualgate.toml");
    let err = load_config(Some(&path)).await.expect_err("missing file should fail");
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("/nonexistent/qualgate.toml"));
}

#[tokio::test]
#[serial]
async fn test_invalid_domain_is_fatal_config_error() {
    // Given: A config whose domain cannot prefix an image
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = write_config(
        &temp_dir,
        "qualgate.toml",
        "[admission]\ndomain = \"Test.io/foo\"\n",
    );

    // When: The engine is built
    let config = load_config(Some(&path)).await.expect("file itself is well-formed");
    let err = Engine::from_config(&config).expect_err("domain must be rejected");

    // Then: Exit code is the configuration error code
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
#[serial]
async fn test_unknown_operation_rejected() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = write_config(
        &temp_dir,
        "qualgate.toml",
        "[admission]\noperations = [\"patch\"]\n",
    );

    let err = load_config(Some(&path)).await.expect_err("unknown operation should fail");
    assert!(err.to_string().contains("admission.operations"));
}

#[tokio::test]
#[serial]
async fn test_env_override_domain() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = write_config(&temp_dir, "qualgate.toml", "[admission]\ndomain = \"test.io\"\n");

    // SAFETY: serialized test, no other thread reads the environment
    unsafe { std::env::set_var("QUALGATE_ADMISSION_DOMAIN", "localhost") };
    let result = load_config(Some(&path)).await;
    unsafe { std::env::remove_var("QUALGATE_ADMISSION_DOMAIN") };

    let config = result.expect("config should load");
    assert_eq!(config.admission.domain, "localhost");
}
