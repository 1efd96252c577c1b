//! 검증된 레지스트리 도메인
//!
//! [`Domain`]은 [`Domain::new`]를 통해서만 만들 수 있으며, 만들어진 값은
//! 어떤 저장소 이름 앞에 붙여도 그대로 도메인으로 다시 읽힙니다.

use std::fmt;
use std::str::FromStr;

use qualgate_reference::split_image_name;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::QualifyError;

/// 도메인 검증에 쓰는 고정 저장소
pub const SANITY_REPO: &str = "foo/bar:latest";

/// 검증된 레지스트리 도메인 (예: `registry.example.com:5000`, `localhost`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain(String);

impl Domain {
    /// 도메인을 검증합니다.
    ///
    /// `{input}/foo/bar:latest`를 분리했을 때 도메인이 `input`과, 나머지가
    /// [`SANITY_REPO`]와 정확히 같아야 합니다.
    pub fn new(input: impl Into<String>) -> Result<Self, QualifyError> {
        let input = input.into();
        let candidate = format!("{input}/{SANITY_REPO}");

        let (domain, remainder) =
            split_image_name(&candidate).map_err(|e| QualifyError::InvalidDomain {
                domain: input.clone(),
                reason: e.to_string(),
            })?;

        if domain != input {
            return Err(QualifyError::InvalidDomain {
                reason: format!("domain parsed as \"{domain}\""),
                domain: input,
            });
        }
        if remainder != SANITY_REPO {
            return Err(QualifyError::InvalidDomain {
                reason: format!("repository parsed as \"{remainder}\""),
                domain: input,
            });
        }

        Ok(Self(input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Domain {
    type Err = QualifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Domain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Domain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
