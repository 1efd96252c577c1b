//! 참조 파서 에러 타입
//!
//! [`ReferenceError`]의 모든 변형은 [`ErrorKind::InvalidReference`] 종류이며,
//! `From<ReferenceError> for QualgateError` 변환으로 상위 레이어에 전파됩니다.

use qualgate_core::error::{ErrorKind, ImageError, QualgateError};

/// 이미지 참조 문법 위반
///
/// 메시지는 레지스트리 도구들이 쓰는 문구를 그대로 따릅니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    /// 문법 불일치
    #[error("invalid reference format")]
    InvalidFormat,

    /// 소문자로 바꾸면 유효한 참조
    #[error("invalid reference format: repository name must be lowercase")]
    NameContainsUppercase,

    /// 빈 문자열
    #[error("repository name must have at least one component")]
    NameEmpty,

    /// 이름(도메인 + 경로)이 최대 길이를 초과
    #[error("repository name must not be more than {max} characters")]
    NameTooLong {
        /// 허용 최대 길이
        max: usize,
    },

    /// 다이제스트 형식 위반 (구분자 누락, 대문자 hex 등)
    #[error("invalid checksum digest format")]
    DigestInvalidFormat,

    /// 알고리즘에 맞지 않는 hex 길이
    #[error("invalid checksum digest length")]
    DigestInvalidLength,

    /// 지원하지 않는 다이제스트 알고리즘
    #[error("unsupported digest algorithm")]
    DigestUnsupported(String),

    /// 64자 hex 식별자는 저장소 이름으로 쓸 수 없음
    #[error("invalid repository name ({0}), cannot specify 64-byte hexadecimal strings")]
    IdentifierNotAllowed(String),
}

impl ReferenceError {
    /// 에러 종류 (항상 [`ErrorKind::InvalidReference`])
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidReference
    }
}

impl From<ReferenceError> for QualgateError {
    fn from(err: ReferenceError) -> Self {
        QualgateError::Image(ImageError::InvalidReference {
            reason: err.to_string(),
        })
    }
}
