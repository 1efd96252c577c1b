#![doc = include_str!("../README.md")]

pub mod admission;
pub mod config;
pub mod error;
pub mod metrics;
pub mod plugin;
pub mod types;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{ConfigError, ErrorKind, ImageError, PluginError, QualgateError};

// 설정
pub use config::QualgateConfig;

// 어드미션 요청 모델
pub use admission::{
    AdmissionObject, Attributes, AttributesRecord, GroupResource, GroupVersionKind,
    GroupVersionResource, Handler, Operation, StatusError, StatusReason,
};

// 어드미션 컴포넌트
pub use plugin::{AdmissionChain, MutationInterface};

// 워크로드 타입
pub use types::{Container, ObjectMeta, Pod, PodSpec};
