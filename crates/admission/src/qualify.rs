//! 이미지 한정
//!
//! 도메인이 없는 이미지 앞에 [`Domain`]을 붙이고, 결과가 여전히 유효한 참조인지
//! 정규화 파서로 다시 확인합니다.

use metrics::counter;
use qualgate_core::metrics as m;
use qualgate_core::types::Container;
use qualgate_reference::{parse_image_name, split_image_name};
use tracing::debug;

use crate::domain::Domain;
use crate::error::QualifyError;

/// 이미지가 이미 레지스트리 도메인을 가지고 있는지 판단합니다.
///
/// 파싱할 수 없는 이미지는 도메인이 없는 것으로 봅니다.
pub fn has_domain(image: &str) -> bool {
    matches!(split_image_name(image), Ok((domain, _)) if !domain.is_empty())
}

/// 이미지 하나를 한정합니다.
///
/// 이미 도메인이 있으면 `None`, 아니면 도메인을 붙인 이미지를 반환합니다.
pub fn qualify_image(domain: &Domain, image: &str) -> Result<Option<String>, QualifyError> {
    if has_domain(image) {
        return Ok(None);
    }

    let candidate = format!("{domain}/{image}");
    match parse_image_name(&candidate) {
        Ok(_) => Ok(Some(candidate)),
        Err(source) => Err(QualifyError::QualificationFailure {
            image: candidate,
            source,
        }),
    }
}

/// 컨테이너 목록의 이미지를 순서대로 한정하고, 다시 쓴 이미지 수를 반환합니다.
///
/// 첫 실패에서 즉시 반환하며, 그 전에 다시 쓴 이미지는 되돌리지 않습니다.
pub fn qualify_container_images(
    domain: &Domain,
    containers: &mut [Container],
) -> Result<usize, QualifyError> {
    let mut rewritten = 0;

    for container in containers.iter_mut() {
        match qualify_image(domain, &container.image) {
            Ok(Some(qualified)) => {
                debug!(
                    container = %container.name,
                    from = %container.image,
                    to = %qualified,
                    "image qualified"
                );
                counter!(m::IMAGES_QUALIFIED_TOTAL).increment(1);
                container.image = qualified;
                rewritten += 1;
            }
            Ok(None) => {
                debug!(
                    container = %container.name,
                    image = %container.image,
                    "image already has a domain"
                );
                counter!(m::IMAGES_SKIPPED_TOTAL).increment(1);
            }
            Err(e) => {
                debug!(container = %container.name, error = %e, "image qualification failed");
                counter!(m::QUALIFICATION_FAILURES_TOTAL).increment(1);
                return Err(e);
            }
        }
    }

    Ok(rewritten)
}
