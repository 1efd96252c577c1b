//! 워크로드 타입 — 어드미션 대상 Pod 구조
//!
//! 한정 엔진이 읽고 쓰는 필드(`image`)만 타입으로 모델링하고,
//! 나머지 필드는 `extra`에 그대로 보존하여 매니페스트 왕복 시 손실이 없도록 합니다.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Pod 종류 이름
pub const POD_KIND: &str = "Pod";

/// 객체 메타데이터
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// 객체 이름
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// 네임스페이스
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    /// 라벨
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// 모델링하지 않은 나머지 필드
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 컨테이너 엔트리
///
/// `image`가 한정 엔진이 변경하는 유일한 필드입니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// 컨테이너 이름
    pub name: String,
    /// 이미지 참조
    #[serde(default)]
    pub image: String,
    /// 모델링하지 않은 나머지 필드
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Container {
    /// 이름과 이미지로 컨테이너를 생성합니다.
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            extra: Map::new(),
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.image)
    }
}

/// Pod 스펙
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    /// init 컨테이너 (메인 컨테이너보다 먼저 처리)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub init_containers: Vec<Container>,
    /// 메인 컨테이너
    #[serde(default)]
    pub containers: Vec<Container>,
    /// 모델링하지 않은 나머지 필드
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PodSpec {
    /// init 컨테이너와 메인 컨테이너의 이미지를 순서대로 반환합니다.
    pub fn images(&self) -> impl Iterator<Item = &str> {
        self.init_containers
            .iter()
            .chain(self.containers.iter())
            .map(|c| c.image.as_str())
    }
}

/// Pod
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pod {
    /// API 버전
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// 종류 (항상 `Pod`)
    #[serde(default = "default_pod_kind")]
    pub kind: String,
    /// 메타데이터
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// 스펙
    #[serde(default)]
    pub spec: PodSpec,
    /// 모델링하지 않은 나머지 필드 (status 등)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Pod {
    /// 네임스페이스, 이름, 스펙으로 Pod를 생성합니다.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, spec: PodSpec) -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_pod_kind(),
            metadata: ObjectMeta {
                name: name.into(),
                namespace: namespace.into(),
                ..ObjectMeta::default()
            },
            spec,
            extra: Map::new(),
        }
    }
}

fn default_api_version() -> String {
    "v1".to_owned()
}

fn default_pod_kind() -> String {
    POD_KIND.to_owned()
}
