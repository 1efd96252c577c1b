#![doc = include_str!("../README.md")]
//!
//! # 모듈 구조
//!
//! - [`error`]: 참조 문법 에러 (`ReferenceError`)
//! - [`grammar`]: 참조 문법 정규식과 길이 제한
//! - [`digest`]: 다이제스트 검증 (`Digest`, `DigestAlgorithm`)
//! - [`reference`]: 구조적 파싱 (`Reference`, `parse`, `parse_normalized`)
//! - [`parsers`]: 어드미션용 파서 (`ImageReference`, `parse_image_name`, `split_image_name`)

pub mod digest;
pub mod error;
pub mod grammar;
pub mod parsers;
pub mod reference;

pub use digest::{Digest, DigestAlgorithm};
pub use error::ReferenceError;
pub use grammar::NAME_TOTAL_LENGTH_MAX;
pub use parsers::{DEFAULT_IMAGE_TAG, ImageReference, parse_image_name, split_image_name};
pub use reference::{DEFAULT_DOMAIN, Reference, looks_like_domain, parse, parse_normalized};
