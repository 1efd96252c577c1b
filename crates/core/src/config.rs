//! 설정 관리 — qualgate.toml 파싱 및 런타임 설정
//!
//! [`QualgateConfig`]는 모든 섹션의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`QUALGATE_ADMISSION_DOMAIN=registry.example.com` 형식)
//! 3. 설정 파일 (`qualgate.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! 도메인 문자열의 형식 검증은 여기서 하지 않습니다. 도메인은
//! `qualgate-admission`의 도메인 검증기를 통해서만 만들어집니다.
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), qualgate_core::error::QualgateError> {
//! use qualgate_core::config::QualgateConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = QualgateConfig::load("qualgate.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = QualgateConfig::parse("[admission]\ndomain = \"registry.example.com\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::admission::Operation;
use crate::error::{ConfigError, QualgateError};

/// 기본 한정 도메인
pub const DEFAULT_DOMAIN: &str = "localhost:5000";

/// qualgate 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualgateConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 어드미션 설정
    #[serde(default)]
    pub admission: AdmissionConfig,
}

impl QualgateConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, QualgateError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, QualgateError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                QualgateError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                QualgateError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, QualgateError> {
        toml::from_str(toml_str).map_err(|e| {
            QualgateError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `QUALGATE_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "QUALGATE_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "QUALGATE_GENERAL_LOG_FORMAT");

        // Admission
        override_string(&mut self.admission.domain, "QUALGATE_ADMISSION_DOMAIN");
        override_csv(
            &mut self.admission.operations,
            "QUALGATE_ADMISSION_OPERATIONS",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), QualgateError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.admission.domain.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "admission.domain".to_owned(),
                reason: "domain must not be empty".to_owned(),
            }
            .into());
        }

        if self.admission.operations.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "admission.operations".to_owned(),
                reason: "at least one operation is required".to_owned(),
            }
            .into());
        }

        self.admission.parsed_operations().map_err(|e| match e {
            QualgateError::Config(ConfigError::InvalidValue { reason, .. }) => {
                ConfigError::InvalidValue {
                    field: "admission.operations".to_owned(),
                    reason,
                }
                .into()
            }
            other => other,
        })?;

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// 어드미션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionConfig {
    /// 한정되지 않은 이미지 앞에 붙일 레지스트리 도메인
    pub domain: String,
    /// 적용할 연산 (create, update, delete, connect)
    pub operations: Vec<String>,
}

impl AdmissionConfig {
    /// 연산 문자열을 [`Operation`]으로 변환합니다.
    pub fn parsed_operations(&self) -> Result<Vec<Operation>, QualgateError> {
        self.operations.iter().map(|op| op.parse()).collect()
    }
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_owned(),
            operations: vec!["create".to_owned()],
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        let items: Vec<String> = val
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
        if items.is_empty() {
            warn!(env_key, "empty list in env var, ignoring");
            return;
        }
        *target = items;
    }
}
