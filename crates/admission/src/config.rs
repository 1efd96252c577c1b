//! 이미지 한정 컴포넌트 설정
//!
//! [`AlwaysQualifyImagesConfig`]는 core의 [`AdmissionConfig`]를 기반으로
//! 타입이 지정된 컴포넌트 설정을 제공합니다.
//!
//! # 사용 예시
//! ```ignore
//! use qualgate_core::config::QualgateConfig;
//! use qualgate_admission::config::AlwaysQualifyImagesConfig;
//!
//! let core_config = QualgateConfig::default();
//! let config = AlwaysQualifyImagesConfig::from_core(&core_config.admission)?;
//! ```

use qualgate_core::admission::Operation;
use qualgate_core::config::{AdmissionConfig, DEFAULT_DOMAIN};
use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::error::QualifyError;

/// 이미지 한정 컴포넌트 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlwaysQualifyImagesConfig {
    /// 한정되지 않은 이미지 앞에 붙일 레지스트리 도메인
    pub domain: String,
    /// 처리할 연산
    pub operations: Vec<Operation>,
}

impl Default for AlwaysQualifyImagesConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_owned(),
            operations: vec![Operation::Create],
        }
    }
}

impl AlwaysQualifyImagesConfig {
    /// core의 `AdmissionConfig`에서 컴포넌트 설정을 생성합니다.
    ///
    /// 연산 이름을 해석할 수 없으면 에러를 반환합니다.
    pub fn from_core(core: &AdmissionConfig) -> Result<Self, QualifyError> {
        let operations = core
            .operations
            .iter()
            .map(|op| {
                op.parse::<Operation>().map_err(|e| QualifyError::Config {
                    field: "operations".to_owned(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            domain: core.domain.clone(),
            operations,
        })
    }

    /// 설정값의 유효성을 검증합니다.
    ///
    /// 도메인은 [`Domain::new`]와 같은 규칙으로 검증합니다.
    pub fn validate(&self) -> Result<(), QualifyError> {
        Domain::new(self.domain.as_str())?;

        if self.operations.is_empty() {
            return Err(QualifyError::Config {
                field: "operations".to_owned(),
                reason: "at least one operation is required".to_owned(),
            });
        }

        Ok(())
    }
}

/// 이미지 한정 컴포넌트 설정 빌더
#[derive(Default)]
pub struct AlwaysQualifyImagesConfigBuilder {
    config: AlwaysQualifyImagesConfig,
}

impl AlwaysQualifyImagesConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 레지스트리 도메인을 설정합니다.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.config.domain = domain.into();
        self
    }

    /// 처리할 연산을 설정합니다.
    pub fn operations(mut self, operations: impl IntoIterator<Item = Operation>) -> Self {
        self.config.operations = operations.into_iter().collect();
        self
    }

    /// 설정을 검증하고 `AlwaysQualifyImagesConfig`를 생성합니다.
    pub fn build(self) -> Result<AlwaysQualifyImagesConfig, QualifyError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AlwaysQualifyImagesConfig::default();
        config.validate().unwrap();
        assert_eq!(config.domain, "localhost:5000");
        assert_eq!(config.operations, vec![Operation::Create]);
    }

    #[test]
    fn from_core_preserves_values() {
        let core = AdmissionConfig {
            domain: "registry.example.com".to_owned(),
            operations: vec!["create".to_owned(), "UPDATE".to_owned()],
        };
        let config = AlwaysQualifyImagesConfig::from_core(&core).unwrap();
        assert_eq!(config.domain, "registry.example.com");
        assert_eq!(config.operations, vec![Operation::Create, Operation::Update]);
    }

    #[test]
    fn from_core_rejects_unknown_operation() {
        let core = AdmissionConfig {
            domain: "test.io".to_owned(),
            operations: vec!["patch".to_owned()],
        };
        let err = AlwaysQualifyImagesConfig::from_core(&core).unwrap_err();
        assert!(matches!(err, QualifyError::Config { ref field, .. } if field == "operations"));
    }

    #[test]
    fn validate_rejects_invalid_domain() {
        let config = AlwaysQualifyImagesConfig {
            domain: "bad domain".to_owned(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            QualifyError::InvalidDomain { .. }
        ));
    }

    #[test]
    fn validate_rejects_empty_operations() {
        let config = AlwaysQualifyImagesConfig {
            operations: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn builder_validates() {
        let config = AlwaysQualifyImagesConfigBuilder::new()
            .domain("test.io")
            .operations([Operation::Create, Operation::Update])
            .build()
            .unwrap();
        assert_eq!(config.domain, "test.io");
        assert_eq!(config.operations.len(), 2);

        assert!(
            AlwaysQualifyImagesConfigBuilder::new()
                .domain("foo")
                .build()
                .is_err()
        );
    }
}
