//! `AlwaysQualifyImages` 어드미션 컴포넌트
//!
//! Pod 생성 요청에서 도메인이 없는 컨테이너 이미지 앞에 설정된 도메인을 붙입니다.
//!
//! # 적용 조건 (순서대로, 하나라도 해당하면 건너뜀)
//! 1. 서브리소스 요청
//! 2. core 그룹의 `pods`가 아닌 리소스
//! 3. [`Handler`]가 처리하지 않는 연산 (기본: `CREATE`만)

use std::io::Read;

use metrics::counter;
use qualgate_core::admission::{
    AdmissionObject, Attributes, GroupResource, Handler, Operation, StatusError,
};
use qualgate_core::config::{AdmissionConfig, DEFAULT_DOMAIN};
use qualgate_core::metrics as m;
use qualgate_core::plugin::MutationInterface;
use qualgate_core::types::POD_KIND;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::AlwaysQualifyImagesConfig;
use crate::domain::Domain;
use crate::error::QualifyError;
use crate::qualify::qualify_container_images;

/// 어드미션 체인에 등록되는 컴포넌트 이름
pub const PLUGIN_NAME: &str = "AlwaysQualifyImages";

/// 건너뛴 사유 (메트릭 레이블 값)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Subresource,
    Resource,
    Operation,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subresource => "subresource",
            Self::Resource => "resource",
            Self::Operation => m::SKIP_REASON_OPERATION,
        }
    }
}

/// 도메인이 없는 Pod 컨테이너 이미지를 한정하는 컴포넌트
///
/// 요청 사이에 상태를 갖지 않으며, 불변 [`Domain`]만 보관합니다.
#[derive(Debug, Clone)]
pub struct AlwaysQualifyImages {
    handler: Handler,
    domain: Domain,
}

/// `from_reader`가 읽는 TOML 설정
#[derive(Debug, Deserialize)]
#[serde(default)]
struct PluginFile {
    domain: String,
    operations: Vec<String>,
}

impl Default for PluginFile {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_owned(),
            operations: vec!["create".to_owned()],
        }
    }
}

impl AlwaysQualifyImages {
    /// `CREATE`만 처리하는 컴포넌트를 생성합니다.
    pub fn new(domain: Domain) -> Self {
        Self::with_handler(domain, Handler::new([Operation::Create]))
    }

    /// 처리할 연산을 지정하여 생성합니다.
    pub fn with_handler(domain: Domain, handler: Handler) -> Self {
        Self { handler, domain }
    }

    /// 설정을 검증하고 컴포넌트를 생성합니다.
    pub fn from_config(config: &AlwaysQualifyImagesConfig) -> Result<Self, QualifyError> {
        config.validate()?;
        let domain = Domain::new(config.domain.as_str())?;
        let handler = Handler::new(config.operations.iter().copied());
        info!(%domain, "image qualification enabled");
        Ok(Self::with_handler(domain, handler))
    }

    /// TOML 설정 리더에서 컴포넌트를 생성합니다.
    ///
    /// 리더가 없으면 기본 도메인(`localhost:5000`)을 사용합니다.
    ///
    /// ```toml
    /// domain = "registry.example.com:5000"
    /// operations = ["create"]   # 선택
    /// ```
    pub fn from_reader(reader: Option<impl Read>) -> Result<Self, QualifyError> {
        let file = match reader {
            Some(mut reader) => {
                let mut content = String::new();
                reader
                    .read_to_string(&mut content)
                    .map_err(|e| QualifyError::Config {
                        field: "reader".to_owned(),
                        reason: e.to_string(),
                    })?;
                toml::from_str::<PluginFile>(&content).map_err(|e| QualifyError::Config {
                    field: "plugin config".to_owned(),
                    reason: e.to_string(),
                })?
            }
            None => PluginFile::default(),
        };

        let config = AlwaysQualifyImagesConfig::from_core(&AdmissionConfig {
            domain: file.domain,
            operations: file.operations,
        })?;
        Self::from_config(&config)
    }

    /// 한정에 쓰는 도메인
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// 요청이 적용 대상이 아니면 그 사유를 반환합니다.
    pub fn should_ignore(&self, attributes: &dyn Attributes) -> Option<SkipReason> {
        if !attributes.subresource().is_empty() {
            return Some(SkipReason::Subresource);
        }
        if attributes.resource().group_resource() != GroupResource::pods() {
            return Some(SkipReason::Resource);
        }
        if !self.handler.handles(attributes.operation()) {
            return Some(SkipReason::Operation);
        }
        None
    }

    fn reject(&self, err: QualifyError, attributes: &dyn Attributes) -> StatusError {
        let kind = err.kind().map_or("unknown", |k| k.as_str());
        info!(
            namespace = attributes.namespace(),
            name = attributes.name(),
            error = %err,
            "pod rejected"
        );
        counter!(m::ADMISSION_REJECTED_TOTAL, m::LABEL_KIND => kind).increment(1);
        err.into()
    }
}

impl MutationInterface for AlwaysQualifyImages {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn handles(&self, operation: Operation) -> bool {
        self.handler.handles(operation)
    }

    fn admit(&self, attributes: &mut dyn Attributes) -> Result<(), StatusError> {
        if let Some(reason) = self.should_ignore(attributes) {
            debug!(
                reason = reason.as_str(),
                resource = %attributes.resource().group_resource(),
                operation = %attributes.operation(),
                "request not applicable"
            );
            counter!(m::ADMISSION_SKIPPED_TOTAL, m::LABEL_REASON => reason.as_str()).increment(1);
            return Ok(());
        }

        let Some(pod) = attributes
            .object_mut()
            .and_then(AdmissionObject::as_pod_mut)
        else {
            let actual = attributes
                .object()
                .map_or_else(String::new, |o| o.kind().to_owned());
            let err = QualifyError::ObjectTypeMismatch {
                expected: POD_KIND.to_owned(),
                actual,
            };
            return Err(self.reject(err, attributes));
        };

        let result = qualify_container_images(&self.domain, &mut pod.spec.init_containers)
            .and_then(|init| {
                qualify_container_images(&self.domain, &mut pod.spec.containers)
                    .map(|regular| init + regular)
            });

        match result {
            Ok(rewritten) => {
                debug!(
                    namespace = attributes.namespace(),
                    name = attributes.name(),
                    rewritten,
                    "pod admitted"
                );
                Ok(())
            }
            Err(err) => Err(self.reject(err, attributes)),
        }
    }
}
