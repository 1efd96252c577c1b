//! 에러 타입 — 도메인별 에러 정의
//!
//! 각 크레이트는 자체 에러 타입을 가지며, `From` 변환을 통해
//! [`QualgateError`]로 전파됩니다.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::admission::StatusError;

/// qualgate 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum QualgateError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 이미지 참조 / 도메인 한정 에러
    #[error("image error: {0}")]
    Image(#[from] ImageError),

    /// 어드미션 체인 구성 에러
    #[error("plugin error: {0}")]
    Plugin(#[from] PluginError),

    /// 어드미션 요청 거부
    #[error("admission rejected: {0}")]
    Admission(#[from] StatusError),

    /// 요청 객체 디코딩 에러
    #[error("object decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl QualgateError {
    /// 이미지 한정 엔진 관점의 에러 종류를 반환합니다.
    ///
    /// 설정, I/O 등 엔진 외부 에러는 `None`입니다.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Image(err) => Some(err.kind()),
            Self::Admission(status) => status.kind,
            _ => None,
        }
    }
}

/// 이미지 한정 엔진의 에러 종류
///
/// 어떤 종류도 일시적이지 않으므로 재시도 대상이 아닙니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// 이미지 참조 문법 위반
    InvalidReference,
    /// 설정된 도메인이 라운드트립 검증에 실패
    InvalidDomain,
    /// 도메인을 붙인 이미지가 다시 파싱되지 않음
    QualificationFailure,
    /// 어드미션 객체가 기대한 워크로드 타입이 아님
    ObjectTypeMismatch,
}

impl ErrorKind {
    /// snake_case 문자열 표현 (메트릭 레이블용)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidReference => "invalid_reference",
            Self::InvalidDomain => "invalid_domain",
            Self::QualificationFailure => "qualification_failure",
            Self::ObjectTypeMismatch => "object_type_mismatch",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 이미지 참조 / 도메인 한정 에러
///
/// 하위 크레이트의 상세 에러가 문자열 사유로 축약되어 담깁니다.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// 참조 문법 위반
    #[error("invalid reference: {reason}")]
    InvalidReference { reason: String },

    /// 도메인 검증 실패
    #[error("invalid domain '{domain}': {reason}")]
    InvalidDomain { domain: String, reason: String },

    /// 한정된 이미지 재검증 실패
    #[error("invalid image name \"{image}\": {reason}")]
    QualificationFailure { image: String, reason: String },

    /// 객체 타입 불일치
    #[error("expected object of kind {expected}, got {actual}")]
    ObjectTypeMismatch { expected: String, actual: String },
}

impl ImageError {
    /// 에러 종류를 반환합니다.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidReference { .. } => ErrorKind::InvalidReference,
            Self::InvalidDomain { .. } => ErrorKind::InvalidDomain,
            Self::QualificationFailure { .. } => ErrorKind::QualificationFailure,
            Self::ObjectTypeMismatch { .. } => ErrorKind::ObjectTypeMismatch,
        }
    }
}

/// 어드미션 체인 에러
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// 같은 이름의 컴포넌트가 이미 등록됨
    #[error("admission plugin already registered: {name}")]
    AlreadyRegistered { name: String },

    /// 컴포넌트를 찾을 수 없음
    #[error("admission plugin not found: {name}")]
    NotFound { name: String },
}
