//! qualgate.toml 통합 설정 테스트
//!
//! - qualgate.toml.example 파싱 테스트
//! - 부분 설정 (일부 섹션만) 로딩 테스트
//! - 환경변수 우선순위 테스트
//! - 빈 파일 / 잘못된 형식 에러 테스트

use qualgate_core::config::QualgateConfig;
use qualgate_core::error::{ConfigError, QualgateError};
use serial_test::serial;
use tempfile::TempDir;

// =============================================================================
// qualgate.toml.example 파싱 테스트
// =============================================================================

#[test]
fn example_config_parses_successfully() {
    let content = include_str!("../../../qualgate.toml.example");
    let config = QualgateConfig::parse(content).expect("example config should parse");

    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.general.log_format, "json");
    assert_eq!(config.admission.domain, "localhost:5000");
    assert_eq!(config.admission.operations, vec!["create"]);
}

#[test]
fn example_config_passes_validation() {
    let content = include_str!("../../../qualgate.toml.example");
    let config = QualgateConfig::parse(content).expect("should parse");
    config
        .validate()
        .expect("example config should pass validation");
}

// =============================================================================
// 부분 설정 / 에러 테스트
// =============================================================================

#[test]
fn general_only_config_keeps_admission_defaults() {
    let config = QualgateConfig::parse(
        r#"
[general]
log_level = "debug"
log_format = "pretty"
"#,
    )
    .expect("should parse");

    assert_eq!(config.general.log_level, "debug");
    assert_eq!(config.admission.domain, "localhost:5000");
}

#[test]
fn wrong_type_for_domain_is_parse_error() {
    let err = QualgateConfig::parse("[admission]\ndomain = 5000\n").unwrap_err();
    assert!(matches!(
        err,
        QualgateError::Config(ConfigError::ParseFailed { .. })
    ));
}

#[tokio::test]
async fn from_file_rejects_invalid_values() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join("qualgate.toml");
    std::fs::write(&path, "[general]\nlog_format = \"xml\"\n").expect("should write");

    let err = QualgateConfig::from_file(&path).await.unwrap_err();
    assert!(matches!(
        err,
        QualgateError::Config(ConfigError::InvalidValue { .. })
    ));
}

#[tokio::test]
async fn from_file_empty_file_uses_defaults() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join("qualgate.toml");
    std::fs::write(&path, "").expect("should write");

    let config = QualgateConfig::from_file(&path).await.expect("should load");
    assert_eq!(config.admission.domain, "localhost:5000");
}

// =============================================================================
// 환경변수 우선순위 테스트
// =============================================================================

#[tokio::test]
#[serial]
async fn env_overrides_take_precedence_over_file() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join("qualgate.toml");
    std::fs::write(
        &path,
        "[admission]\ndomain = \"file.example.com\"\noperations = [\"create\"]\n",
    )
    .expect("should write");

    // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var("QUALGATE_ADMISSION_DOMAIN", "env.example.com:5000");
        std::env::set_var("QUALGATE_ADMISSION_OPERATIONS", "create,update");
    }

    let result = QualgateConfig::load(&path).await;

    unsafe {
        std::env::remove_var("QUALGATE_ADMISSION_DOMAIN");
        std::env::remove_var("QUALGATE_ADMISSION_OPERATIONS");
    }

    let config = result.expect("should load");
    assert_eq!(config.admission.domain, "env.example.com:5000");
    assert_eq!(config.admission.operations, vec!["create", "update"]);
}

#[tokio::test]
#[serial]
async fn invalid_env_override_fails_validation() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join("qualgate.toml");
    std::fs::write(&path, "").expect("should write");

    // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
    unsafe { std::env::set_var("QUALGATE_GENERAL_LOG_LEVEL", "loud") };
    let result = QualgateConfig::load(&path).await;
    unsafe { std::env::remove_var("QUALGATE_GENERAL_LOG_LEVEL") };

    let err = result.unwrap_err();
    assert!(err.to_string().contains("log_level"));
}
