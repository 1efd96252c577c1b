//! 어드미션 요청 모델 — 요청 속성, 연산, 대상 리소스, 거부 응답
//!
//! [`Attributes`]는 어드미션 컴포넌트가 보는 요청의 불투명한 뷰입니다.
//! [`AttributesRecord`]는 이를 구현하는 기본 값 타입입니다.
//!
//! [`Handler`]는 컴포넌트가 처리할 연산 집합을 데이터로만 표현합니다.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, ErrorKind, QualgateError};
use crate::types::{POD_KIND, Pod};

// ─── Operation ───────────────────────────────────────────────────────

/// 어드미션 연산 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    /// 생성
    Create,
    /// 갱신
    Update,
    /// 삭제
    Delete,
    /// 연결 (exec, attach, port-forward 등)
    Connect,
}

impl Operation {
    /// 모든 연산
    pub const ALL: [Operation; 4] = [
        Operation::Create,
        Operation::Update,
        Operation::Delete,
        Operation::Connect,
    ];

    /// 대문자 문자열 표현
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Connect => "CONNECT",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = QualgateError;

    /// 대소문자를 구분하지 않고 파싱합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ConfigError::InvalidValue {
                    field: "operation".to_owned(),
                    reason: format!(
                        "unknown operation '{s}', expected one of: create, update, delete, connect"
                    ),
                }
                .into()
            })
    }
}

// ─── Resource / Kind ─────────────────────────────────────────────────

/// API 그룹 + 리소스 이름
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupResource {
    /// API 그룹 (core 그룹은 빈 문자열)
    pub group: String,
    /// 리소스 이름 (복수형, 예: `pods`)
    pub resource: String,
}

impl GroupResource {
    /// core 그룹의 리소스를 생성합니다.
    pub fn core(resource: impl Into<String>) -> Self {
        Self {
            group: String::new(),
            resource: resource.into(),
        }
    }

    /// core 그룹의 `pods` 리소스
    pub fn pods() -> Self {
        Self::core("pods")
    }
}

impl fmt::Display for GroupResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.resource)
        } else {
            write!(f, "{}.{}", self.resource, self.group)
        }
    }
}

/// API 그룹 + 버전 + 리소스 이름
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupVersionResource {
    pub group: String,
    pub version: String,
    pub resource: String,
}

impl GroupVersionResource {
    /// core 그룹의 리소스를 지정한 버전으로 생성합니다.
    pub fn core(resource: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: String::new(),
            version: version.into(),
            resource: resource.into(),
        }
    }

    /// 버전을 제외한 그룹/리소스
    pub fn group_resource(&self) -> GroupResource {
        GroupResource {
            group: self.group.clone(),
            resource: self.resource.clone(),
        }
    }
}

/// API 그룹 + 버전 + 종류
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    /// core 그룹의 종류를 지정한 버전으로 생성합니다.
    pub fn core(kind: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: String::new(),
            version: version.into(),
            kind: kind.into(),
        }
    }
}

// ─── AdmissionObject ─────────────────────────────────────────────────

/// 어드미션 요청의 객체 페이로드
///
/// `Pod`만 타입으로 디코딩하며, 그 외 종류는 원본 JSON으로 보관합니다.
#[derive(Debug, Clone, PartialEq)]
pub enum AdmissionObject {
    /// Pod
    Pod(Pod),
    /// 타입으로 모델링하지 않은 객체
    Unstructured {
        /// 객체의 `kind` 필드
        kind: String,
        /// 원본 JSON
        value: Value,
    },
}

impl AdmissionObject {
    /// JSON 값을 디코딩합니다.
    ///
    /// `kind`가 `Pod`이면 [`Pod`]로 디코딩하며, 그 외에는 원본을 보관합니다.
    pub fn from_json(value: Value) -> Result<Self, QualgateError> {
        let kind = value
            .get("kind")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        if kind == POD_KIND {
            let pod: Pod = serde_json::from_value(value)?;
            Ok(Self::Pod(pod))
        } else {
            Ok(Self::Unstructured { kind, value })
        }
    }

    /// JSON 값으로 인코딩합니다.
    pub fn to_json(&self) -> Result<Value, QualgateError> {
        match self {
            Self::Pod(pod) => Ok(serde_json::to_value(pod)?),
            Self::Unstructured { value, .. } => Ok(value.clone()),
        }
    }

    /// 객체의 종류 이름
    pub fn kind(&self) -> &str {
        match self {
            Self::Pod(_) => POD_KIND,
            Self::Unstructured { kind, .. } => kind,
        }
    }

    /// Pod이면 참조를 반환합니다.
    pub fn as_pod(&self) -> Option<&Pod> {
        match self {
            Self::Pod(pod) => Some(pod),
            Self::Unstructured { .. } => None,
        }
    }

    /// Pod이면 가변 참조를 반환합니다.
    pub fn as_pod_mut(&mut self) -> Option<&mut Pod> {
        match self {
            Self::Pod(pod) => Some(pod),
            Self::Unstructured { .. } => None,
        }
    }
}

impl From<Pod> for AdmissionObject {
    fn from(pod: Pod) -> Self {
        Self::Pod(pod)
    }
}

// ─── Attributes ──────────────────────────────────────────────────────

/// 어드미션 요청 속성
///
/// 호스트 프레임워크가 요청마다 생성하여 컴포넌트에 빌려줍니다.
/// 컴포넌트는 호출이 끝난 뒤 객체에 대한 참조를 보관하지 않습니다.
pub trait Attributes {
    /// 요청 연산
    fn operation(&self) -> Operation;

    /// 객체 종류
    fn kind(&self) -> &GroupVersionKind;

    /// 대상 리소스
    fn resource(&self) -> &GroupVersionResource;

    /// 서브리소스 이름 (없으면 빈 문자열)
    fn subresource(&self) -> &str;

    /// 네임스페이스
    fn namespace(&self) -> &str;

    /// 객체 이름
    fn name(&self) -> &str;

    /// 요청 객체
    fn object(&self) -> Option<&AdmissionObject>;

    /// 요청 객체 (가변)
    fn object_mut(&mut self) -> Option<&mut AdmissionObject>;
}

/// [`Attributes`]의 기본 구현
#[derive(Debug, Clone, PartialEq)]
pub struct AttributesRecord {
    pub operation: Operation,
    pub kind: GroupVersionKind,
    pub resource: GroupVersionResource,
    pub subresource: String,
    pub namespace: String,
    pub name: String,
    pub object: Option<AdmissionObject>,
}

impl AttributesRecord {
    /// 연산, 리소스, 객체로 속성을 생성합니다.
    ///
    /// 종류와 네임스페이스/이름은 Pod 객체이면 객체에서 채웁니다.
    pub fn new(
        operation: Operation,
        resource: GroupVersionResource,
        object: Option<AdmissionObject>,
    ) -> Self {
        let (kind, namespace, name) = match &object {
            Some(AdmissionObject::Pod(pod)) => (
                GroupVersionKind::core(POD_KIND, resource.version.clone()),
                pod.metadata.namespace.clone(),
                pod.metadata.name.clone(),
            ),
            Some(other) => (
                GroupVersionKind::core(other.kind(), resource.version.clone()),
                String::new(),
                String::new(),
            ),
            None => (
                GroupVersionKind::core("", resource.version.clone()),
                String::new(),
                String::new(),
            ),
        };

        Self {
            operation,
            kind,
            resource,
            subresource: String::new(),
            namespace,
            name,
            object,
        }
    }

    /// 서브리소스를 설정합니다.
    pub fn with_subresource(mut self, subresource: impl Into<String>) -> Self {
        self.subresource = subresource.into();
        self
    }

    /// 객체 종류를 설정합니다.
    pub fn with_kind(mut self, kind: GroupVersionKind) -> Self {
        self.kind = kind;
        self
    }

    /// 요청 객체의 소유권을 가져옵니다.
    pub fn into_object(self) -> Option<AdmissionObject> {
        self.object
    }
}

impl Attributes for AttributesRecord {
    fn operation(&self) -> Operation {
        self.operation
    }

    fn kind(&self) -> &GroupVersionKind {
        &self.kind
    }

    fn resource(&self) -> &GroupVersionResource {
        &self.resource
    }

    fn subresource(&self) -> &str {
        &self.subresource
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn object(&self) -> Option<&AdmissionObject> {
        self.object.as_ref()
    }

    fn object_mut(&mut self) -> Option<&mut AdmissionObject> {
        self.object.as_mut()
    }
}

// ─── Handler ─────────────────────────────────────────────────────────

/// 컴포넌트가 처리할 연산 집합
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handler {
    operations: BTreeSet<Operation>,
}

impl Handler {
    /// 주어진 연산들을 처리하는 핸들러를 생성합니다.
    pub fn new(operations: impl IntoIterator<Item = Operation>) -> Self {
        Self {
            operations: operations.into_iter().collect(),
        }
    }

    /// 연산을 처리하는지 여부
    pub fn handles(&self, operation: Operation) -> bool {
        self.operations.contains(&operation)
    }

    /// 처리하는 연산 목록 (정렬됨)
    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.operations.iter().copied()
    }
}

// ─── StatusError ─────────────────────────────────────────────────────

/// 거부 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusReason {
    /// 요청 자체가 잘못됨 (HTTP 400)
    BadRequest,
}

impl StatusReason {
    /// 대응하는 HTTP 상태 코드
    pub fn code(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
        }
    }
}

/// 어드미션 거부 응답
///
/// 호스트 프레임워크가 사용자에게 보여줄 메시지를 그대로 담습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct StatusError {
    /// 거부 사유
    pub reason: StatusReason,
    /// 사람이 읽을 메시지
    pub message: String,
    /// 엔진 에러 종류 (알 수 있는 경우)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl StatusError {
    /// BadRequest 응답을 생성합니다.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            reason: StatusReason::BadRequest,
            message: message.into(),
            kind: None,
        }
    }

    /// 엔진 에러 종류를 설정합니다.
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// HTTP 상태 코드
    pub fn code(&self) -> u16 {
        self.reason.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Container, PodSpec};

    fn test_pod() -> Pod {
        Pod::new(
            "test",
            "123",
            PodSpec {
                containers: vec![Container::new("ctrl1", "busybox")],
                ..PodSpec::default()
            },
        )
    }

    #[test]
    fn operation_parses_case_insensitively() {
        assert_eq!("create".parse::<Operation>().unwrap(), Operation::Create);
        assert_eq!("UPDATE".parse::<Operation>().unwrap(), Operation::Update);
        assert_eq!(" Delete ".parse::<Operation>().unwrap(), Operation::Delete);
        assert!("patch".parse::<Operation>().is_err());
    }

    #[test]
    fn operation_serializes_uppercase() {
        let json = serde_json::to_string(&Operation::Connect).unwrap();
        assert_eq!(json, "\"CONNECT\"");
    }

    #[test]
    fn group_resource_display() {
        assert_eq!(GroupResource::pods().to_string(), "pods");
        let gr = GroupResource {
            group: "apps".to_owned(),
            resource: "deployments".to_owned(),
        };
        assert_eq!(gr.to_string(), "deployments.apps");
    }

    #[test]
    fn group_version_resource_drops_version() {
        let gvr = GroupVersionResource::core("pods", "v1");
        assert_eq!(gvr.group_resource(), GroupResource::pods());
    }

    #[test]
    fn record_takes_metadata_from_pod() {
        let attrs = AttributesRecord::new(
            Operation::Create,
            GroupVersionResource::core("pods", "v1"),
            Some(test_pod().into()),
        );
        assert_eq!(attrs.namespace(), "test");
        assert_eq!(attrs.name(), "123");
        assert_eq!(attrs.kind().kind, "Pod");
        assert_eq!(attrs.subresource(), "");
    }

    #[test]
    fn record_with_subresource() {
        let attrs = AttributesRecord::new(
            Operation::Create,
            GroupVersionResource::core("pods", "v1"),
            None,
        )
        .with_subresource("status");
        assert_eq!(attrs.subresource(), "status");
        assert!(attrs.object().is_none());
    }

    #[test]
    fn admission_object_decodes_pod_by_kind() {
        let value = serde_json::to_value(test_pod()).unwrap();
        let object = AdmissionObject::from_json(value).unwrap();
        assert!(object.as_pod().is_some());
        assert_eq!(object.kind(), "Pod");
    }

    #[test]
    fn admission_object_keeps_other_kinds_unstructured() {
        let value = serde_json::json!({"kind": "ReplicationController", "spec": {}});
        let mut object = AdmissionObject::from_json(value.clone()).unwrap();
        assert_eq!(object.kind(), "ReplicationController");
        assert!(object.as_pod_mut().is_none());
        assert_eq!(object.to_json().unwrap(), value);
    }

    #[test]
    fn admission_object_rejects_malformed_pod() {
        let value = serde_json::json!({"kind": "Pod", "spec": {"containers": "nope"}});
        let err = AdmissionObject::from_json(value).unwrap_err();
        assert!(matches!(err, QualgateError::Decode(_)));
    }

    #[test]
    fn handler_filters_operations() {
        let handler = Handler::new([Operation::Create]);
        assert!(handler.handles(Operation::Create));
        assert!(!handler.handles(Operation::Update));
        assert_eq!(handler.operations().collect::<Vec<_>>(), vec![Operation::Create]);
    }

    #[test]
    fn status_error_displays_message_only() {
        let err = StatusError::bad_request("invalid image name \"x\"");
        assert_eq!(err.to_string(), "invalid image name \"x\"");
        assert_eq!(err.code(), 400);
        assert!(err.kind.is_none());
    }
}
