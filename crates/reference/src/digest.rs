//! 콘텐츠 다이제스트 검증

use std::fmt;
use std::str::FromStr;

use crate::error::ReferenceError;

/// 지원하는 다이제스트 알고리즘
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    /// 알고리즘 식별자
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// hex 인코딩된 다이제스트 길이
    pub fn hex_len(&self) -> usize {
        match self {
            Self::Sha256 => 64,
            Self::Sha384 => 96,
            Self::Sha512 => 128,
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            other => Err(ReferenceError::DigestUnsupported(other.to_owned())),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 검증된 `algorithm:hex` 다이제스트
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    algorithm: DigestAlgorithm,
    hex: String,
}

impl Digest {
    /// 다이제스트 문자열을 검증합니다.
    ///
    /// 알고리즘은 sha256/sha384/sha512 중 하나여야 하고, hex는 알고리즘 길이와
    /// 정확히 같은 소문자 16진수여야 합니다.
    pub fn parse(s: &str) -> Result<Self, ReferenceError> {
        let (algorithm, hex) = match s.split_once(':') {
            Some((a, h)) if !a.is_empty() && !h.is_empty() => (a, h),
            _ => return Err(ReferenceError::DigestInvalidFormat),
        };

        let algorithm: DigestAlgorithm = algorithm.parse()?;
        if hex.len() != algorithm.hex_len() {
            return Err(ReferenceError::DigestInvalidLength);
        }
        if !hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(ReferenceError::DigestInvalidFormat);
        }

        Ok(Self {
            algorithm,
            hex: hex.to_owned(),
        })
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }
}

impl FromStr for Digest {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.hex)
    }
}
