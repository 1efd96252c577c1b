//! 참조 문법 정규식
//!
//! 조각 패턴을 조합해 한 번만 컴파일합니다. 모든 문자 클래스는 ASCII로 한정합니다.

use std::sync::LazyLock;

use regex::Regex;
use tracing::error;

use crate::error::ReferenceError;

/// 이름(도메인 + 경로)의 최대 길이
pub const NAME_TOTAL_LENGTH_MAX: usize = 255;

const ALPHA_NUMERIC: &str = "[a-z0-9]+";
const SEPARATOR: &str = "(?:[._]|__|[-]*)";
const DOMAIN_COMPONENT: &str = "(?:[a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9-]*[a-zA-Z0-9])";
const TAG: &str = "[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}";
const DIGEST: &str = "[A-Za-z][A-Za-z0-9]*(?:[-_+.][A-Za-z][A-Za-z0-9]*)*:[0-9a-fA-F]{32,}";

fn path_component() -> String {
    format!("{ALPHA_NUMERIC}(?:{SEPARATOR}{ALPHA_NUMERIC})*")
}

fn domain() -> String {
    format!(r"{DOMAIN_COMPONENT}(?:\.{DOMAIN_COMPONENT})*(?::[0-9]+)?")
}

type Compiled = LazyLock<Result<Regex, regex::Error>>;

/// 전체 참조: 캡처 1 = 이름, 2 = 태그, 3 = 다이제스트
static REFERENCE: Compiled = LazyLock::new(|| {
    let path = path_component();
    Regex::new(&format!(
        "^((?:{domain}/)?{path}(?:/{path})*)(?::({TAG}))?(?:@({DIGEST}))?$",
        domain = domain(),
    ))
});

/// 이름만: 캡처 1 = 도메인, 2 = 경로
static ANCHORED_NAME: Compiled = LazyLock::new(|| {
    let path = path_component();
    Regex::new(&format!(
        "^(?:({domain})/)?({path}(?:/{path})*)$",
        domain = domain(),
    ))
});

/// 64자 소문자 hex 식별자
static ANCHORED_IDENTIFIER: Compiled = LazyLock::new(|| Regex::new("^[a-f0-9]{64}$"));

fn get(compiled: &'static Compiled) -> Result<&'static Regex, ReferenceError> {
    compiled.as_ref().map_err(|e| {
        error!(error = %e, "reference grammar failed to compile");
        ReferenceError::InvalidFormat
    })
}

pub(crate) fn reference() -> Result<&'static Regex, ReferenceError> {
    get(&REFERENCE)
}

pub(crate) fn anchored_name() -> Result<&'static Regex, ReferenceError> {
    get(&ANCHORED_NAME)
}

pub(crate) fn anchored_identifier() -> Result<&'static Regex, ReferenceError> {
    get(&ANCHORED_IDENTIFIER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_captures_parts() {
        let caps = reference()
            .unwrap()
            .captures("test.io/foo/bar:v1@sha256:0123456789abcdef0123456789abcdef")
            .unwrap();
        assert_eq!(&caps[1], "test.io/foo/bar");
        assert_eq!(&caps[2], "v1");
        assert_eq!(&caps[3], "sha256:0123456789abcdef0123456789abcdef");
    }

    #[test]
    fn separators() {
        for ok in ["a.b", "a_b", "a__b", "a-b", "a---b"] {
            assert!(reference().unwrap().is_match(ok), "{ok}");
        }
        for bad in ["a___b", "a..b", "-a", "a-", "_a"] {
            assert!(!reference().unwrap().is_match(bad), "{bad}");
        }
    }

    #[test]
    fn domain_may_carry_uppercase_and_port() {
        let caps = anchored_name().unwrap().captures("Test.IO:5000/foo").unwrap();
        assert_eq!(&caps[1], "Test.IO:5000");
        assert_eq!(&caps[2], "foo");
    }

    #[test]
    fn tag_is_ascii_only() {
        assert!(reference().unwrap().is_match("busybox:v1.2.3"));
        assert!(!reference().unwrap().is_match("busybox:vé"));
        assert!(!reference().unwrap().is_match(&format!("busybox:{}", "a".repeat(129))));
    }

    #[test]
    fn identifier() {
        assert!(anchored_identifier().unwrap().is_match(&"f".repeat(64)));
        assert!(!anchored_identifier().unwrap().is_match(&"F".repeat(64)));
        assert!(!anchored_identifier().unwrap().is_match(&"f".repeat(63)));
    }
}
