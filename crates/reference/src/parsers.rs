//! 어드미션 경로에서 쓰는 이미지 이름 파서
//!
//! - [`parse_image_name`]: 정규화 후 저장소 / 태그 / 다이제스트로 분해
//! - [`split_image_name`]: 정규화 없이 도메인 구성요소만 분리

use serde::{Deserialize, Serialize};

use crate::error::ReferenceError;
use crate::reference::{self, looks_like_domain};

/// 태그와 다이제스트가 모두 없을 때 쓰는 태그
pub const DEFAULT_IMAGE_TAG: &str = "latest";

/// 정규화된 이미지 이름
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    /// `domain/path` (항상 도메인 포함)
    pub repository: String,
    /// 태그 (없으면 빈 문자열)
    pub tag: String,
    /// `algorithm:hex` 다이제스트 (없으면 빈 문자열)
    pub digest: String,
}

/// 이미지 이름을 정규화하여 분해합니다.
///
/// 태그와 다이제스트가 모두 없으면 태그를 [`DEFAULT_IMAGE_TAG`]로 채웁니다.
pub fn parse_image_name(image: &str) -> Result<ImageReference, ReferenceError> {
    let named = reference::parse_normalized(image)?;

    let mut tag = named.tag().unwrap_or_default().to_owned();
    let digest = named.digest().map(ToString::to_string).unwrap_or_default();
    if tag.is_empty() && digest.is_empty() {
        tag = DEFAULT_IMAGE_TAG.to_owned();
    }

    Ok(ImageReference {
        repository: named.name(),
        tag,
        digest,
    })
}

/// 이미지 이름을 (도메인, 나머지)로 나눕니다.
///
/// 문법 검증만 하고 기본 도메인이나 태그는 채우지 않습니다. 첫 번째 `/` 앞
/// 구성요소가 도메인처럼 보이지 않으면 도메인은 빈 문자열이고 나머지는 입력 전체입니다.
pub fn split_image_name(image: &str) -> Result<(&str, &str), ReferenceError> {
    reference::parse(image)?;

    match image.split_once('/') {
        Some((domain, remainder)) if looks_like_domain(domain) => Ok((domain, remainder)),
        _ => Ok(("", image)),
    }
}
