//! 구조적 참조 파싱
//!
//! [`parse`]는 문법만 검사하고 아무것도 채우지 않습니다.
//! [`parse_normalized`]는 기본 레지스트리와 `library/` 접두어를 채운 뒤 파싱합니다.

use std::fmt;
use std::str::FromStr;

use crate::digest::Digest;
use crate::error::ReferenceError;
use crate::grammar::{self, NAME_TOTAL_LENGTH_MAX};

/// 기본 레지스트리 도메인
pub const DEFAULT_DOMAIN: &str = "docker.io";

/// 기본 레지스트리의 레거시 이름
pub const LEGACY_DEFAULT_DOMAIN: &str = "index.docker.io";

/// 기본 레지스트리에서 단일 구성요소 저장소에 붙는 접두어
pub const OFFICIAL_REPO_PREFIX: &str = "library";

/// 파싱된 이미지 참조
///
/// `[domain/]path[:tag][@digest]` 형태로 다시 출력됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    domain: Option<String>,
    path: String,
    tag: Option<String>,
    digest: Option<Digest>,
}

impl Reference {
    /// 레지스트리 도메인 (명시된 경우)
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// 저장소 경로
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn digest(&self) -> Option<&Digest> {
        self.digest.as_ref()
    }

    /// 저장소 이름 (`domain/path`, 도메인이 없으면 `path`)
    pub fn name(&self) -> String {
        match &self.domain {
            Some(domain) => format!("{domain}/{}", self.path),
            None => self.path.clone(),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(domain) = &self.domain {
            write!(f, "{domain}/")?;
        }
        f.write_str(&self.path)?;
        if let Some(tag) = &self.tag {
            write!(f, ":{tag}")?;
        }
        if let Some(digest) = &self.digest {
            write!(f, "@{digest}")?;
        }
        Ok(())
    }
}

impl FromStr for Reference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// 첫 번째 `/` 앞 구성요소가 레지스트리 도메인처럼 보이는지 판단합니다.
///
/// `.` 또는 `:`를 포함하거나 정확히 `localhost`이면 도메인입니다.
pub fn looks_like_domain(segment: &str) -> bool {
    segment.contains(['.', ':']) || segment == "localhost"
}

/// 참조를 정규화 없이 파싱합니다.
///
/// 도메인이 없으면 도메인 없이, 태그가 없으면 태그 없이 반환합니다.
pub fn parse(s: &str) -> Result<Reference, ReferenceError> {
    let re = grammar::reference()?;
    let Some(caps) = re.captures(s) else {
        if s.is_empty() {
            return Err(ReferenceError::NameEmpty);
        }
        if re.is_match(&s.to_lowercase()) {
            return Err(ReferenceError::NameContainsUppercase);
        }
        return Err(ReferenceError::InvalidFormat);
    };

    let name = caps.get(1).map_or("", |m| m.as_str());
    if name.len() > NAME_TOTAL_LENGTH_MAX {
        return Err(ReferenceError::NameTooLong {
            max: NAME_TOTAL_LENGTH_MAX,
        });
    }

    let (domain, path) = match grammar::anchored_name()?.captures(name) {
        Some(name_caps) => (
            name_caps.get(1).map(|m| m.as_str().to_owned()),
            name_caps.get(2).map_or(name, |m| m.as_str()).to_owned(),
        ),
        None => (None, name.to_owned()),
    };

    let tag = caps.get(2).map(|m| m.as_str().to_owned());
    let digest = caps.get(3).map(|m| Digest::parse(m.as_str())).transpose()?;

    Ok(Reference {
        domain,
        path,
        tag,
        digest,
    })
}

/// 참조를 정규화하여 파싱합니다.
///
/// 도메인이 없으면 [`DEFAULT_DOMAIN`]을 채우고, 기본 레지스트리의 단일 구성요소
/// 저장소에는 `library/`를 붙입니다. 결과에는 항상 도메인이 있습니다.
pub fn parse_normalized(s: &str) -> Result<Reference, ReferenceError> {
    if grammar::anchored_identifier()?.is_match(s) {
        return Err(ReferenceError::IdentifierNotAllowed(s.to_owned()));
    }

    let (domain, remainder) = split_docker_domain(s);
    let remote_name = remainder
        .split_once(':')
        .map_or(remainder.as_str(), |(name, _)| name);
    if remote_name.to_lowercase() != remote_name {
        return Err(ReferenceError::NameContainsUppercase);
    }

    parse(&format!("{domain}/{remainder}"))
}

/// 참조를 (도메인, 나머지)로 나누고 기본 레지스트리 규칙을 적용합니다.
fn split_docker_domain(name: &str) -> (&str, String) {
    let (mut domain, mut remainder) = match name.split_once('/') {
        Some((first, rest)) if looks_like_domain(first) => (first, rest.to_owned()),
        _ => (DEFAULT_DOMAIN, name.to_owned()),
    };

    if domain == LEGACY_DEFAULT_DOMAIN {
        domain = DEFAULT_DOMAIN;
    }
    if domain == DEFAULT_DOMAIN && !remainder.contains('/') {
        remainder = format!("{OFFICIAL_REPO_PREFIX}/{remainder}");
    }
    (domain, remainder)
}
