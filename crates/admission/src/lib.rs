#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: 한정 에러 (`QualifyError`)
//! - [`domain`]: 검증된 도메인 (`Domain`, `SANITY_REPO`)
//! - [`qualify`]: 이미지 한정 (`has_domain`, `qualify_container_images`, `qualify_image`)
//! - [`config`]: 컴포넌트 설정 (`AlwaysQualifyImagesConfig`, builder)
//! - [`plugin`]: 어드미션 컴포넌트 (`AlwaysQualifyImages`)

pub mod config;
pub mod domain;
pub mod error;
pub mod plugin;
pub mod qualify;

// --- Public API Re-exports ---

pub use config::{AlwaysQualifyImagesConfig, AlwaysQualifyImagesConfigBuilder};
pub use domain::{Domain, SANITY_REPO};
pub use error::QualifyError;
pub use plugin::{AlwaysQualifyImages, PLUGIN_NAME, SkipReason};
pub use qualify::{has_domain, qualify_container_images, qualify_image};
