//! 이미지 한정 에러 타입
//!
//! [`QualifyError`]는 도메인 검증, 이미지 한정, 요청 객체 확인 과정의 에러를 표현합니다.
//! `QualgateError`와 `StatusError`로의 `From` 변환이 구현되어 있어
//! 호스트에서는 `?`로, 어드미션 경로에서는 거부 응답으로 전파됩니다.

use qualgate_core::admission::StatusError;
use qualgate_core::error::{ConfigError, ErrorKind, ImageError, QualgateError};
use qualgate_reference::ReferenceError;

/// 이미지 한정 도메인 에러
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QualifyError {
    /// 설정된 도메인을 그대로 접두어로 쓸 수 없음
    #[error("invalid domain '{domain}': {reason}")]
    InvalidDomain {
        /// 검증 대상 문자열
        domain: String,
        /// 실패 사유
        reason: String,
    },

    /// 도메인을 붙인 후보 이미지가 파싱되지 않음
    #[error("invalid image name \"{image}\": couldn't parse image name: {source}")]
    QualificationFailure {
        /// 도메인을 붙인 후보 이미지
        image: String,
        /// 파서 에러
        source: ReferenceError,
    },

    /// 요청 객체가 기대한 종류로 변환되지 않음
    #[error("Resource was marked with kind {expected} but was unable to be converted")]
    ObjectTypeMismatch {
        /// 기대한 종류
        expected: String,
        /// 실제 객체 종류 (객체가 없으면 빈 문자열)
        actual: String,
    },

    /// 컴포넌트 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl QualifyError {
    /// 엔진 에러 종류 (설정 에러는 `None`)
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::InvalidDomain { .. } => Some(ErrorKind::InvalidDomain),
            Self::QualificationFailure { .. } => Some(ErrorKind::QualificationFailure),
            Self::ObjectTypeMismatch { .. } => Some(ErrorKind::ObjectTypeMismatch),
            Self::Config { .. } => None,
        }
    }
}

impl From<QualifyError> for QualgateError {
    fn from(err: QualifyError) -> Self {
        match err {
            QualifyError::InvalidDomain { domain, reason } => {
                QualgateError::Image(ImageError::InvalidDomain { domain, reason })
            }
            QualifyError::QualificationFailure { image, source } => {
                QualgateError::Image(ImageError::QualificationFailure {
                    image,
                    reason: format!("couldn't parse image name: {source}"),
                })
            }
            QualifyError::ObjectTypeMismatch { expected, actual } => {
                QualgateError::Image(ImageError::ObjectTypeMismatch { expected, actual })
            }
            QualifyError::Config { field, reason } => {
                QualgateError::Config(ConfigError::InvalidValue { field, reason })
            }
        }
    }
}

impl From<QualifyError> for StatusError {
    fn from(err: QualifyError) -> Self {
        let status = StatusError::bad_request(err.to_string());
        match err.kind() {
            Some(kind) => status.with_kind(kind),
            None => status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualification_failure_display() {
        let err = QualifyError::QualificationFailure {
            image: "test.io/Busybox".to_owned(),
            source: ReferenceError::NameContainsUppercase,
        };
        assert_eq!(
            err.to_string(),
            "invalid image name \"test.io/Busybox\": couldn't parse image name: \
             invalid reference format: repository name must be lowercase"
        );
    }

    #[test]
    fn object_type_mismatch_display() {
        let err = QualifyError::ObjectTypeMismatch {
            expected: "Pod".to_owned(),
            actual: "Deployment".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "Resource was marked with kind Pod but was unable to be converted"
        );
    }

    #[test]
    fn converts_to_qualgate_error() {
        let err: QualgateError = QualifyError::InvalidDomain {
            domain: "bad domain".to_owned(),
            reason: "invalid reference format".to_owned(),
        }
        .into();
        assert!(matches!(
            err,
            QualgateError::Image(ImageError::InvalidDomain { .. })
        ));
        assert_eq!(err.kind(), Some(ErrorKind::InvalidDomain));

        let err: QualgateError = QualifyError::Config {
            field: "operations".to_owned(),
            reason: "empty".to_owned(),
        }
        .into();
        assert!(matches!(err, QualgateError::Config(_)));

        let err: QualgateError = QualifyError::QualificationFailure {
            image: "test.io/Busybox".to_owned(),
            source: ReferenceError::NameContainsUppercase,
        }
        .into();
        assert!(err.to_string().ends_with(
            "invalid image name \"test.io/Busybox\": couldn't parse image name: \
             invalid reference format: repository name must be lowercase"
        ));
    }

    #[test]
    fn converts_to_bad_request_status() {
        let status: StatusError = QualifyError::QualificationFailure {
            image: "test.io/Busybox".to_owned(),
            source: ReferenceError::NameContainsUppercase,
        }
        .into();
        assert_eq!(status.code(), 400);
        assert_eq!(status.kind, Some(ErrorKind::QualificationFailure));
        assert!(status.message.starts_with("invalid image name \"test.io/Busybox\""));
    }
}
