//! 어드미션 컴포넌트 — 변경(mutation) trait과 체인
//!
//! [`MutationInterface`]는 요청 객체를 제자리에서 변경할 수 있는 어드미션 컴포넌트입니다.
//!
//! [`AdmissionChain`]은 호스트가 설정으로부터 만든 컴포넌트들을 등록 순서대로 보관하고 실행합니다.
//! 전역 이름 테이블 없이 호스트가 직접 소유합니다.
//!
//! # 실행 순서
//! ```text
//! register(a) → register(b) → admit(): a.handles(op)? a.admit() → b.handles(op)? b.admit()
//! ```

use metrics::counter;
use tracing::debug;

use crate::admission::{Attributes, StatusError};
use crate::error::{PluginError, QualgateError};
use crate::metrics as m;

/// 요청 객체를 변경하는 어드미션 컴포넌트
///
/// 구현체는 호출 사이에 상태를 갖지 않아야 하며, 여러 요청 처리 스레드에서
/// 동시에 호출될 수 있습니다.
///
/// # 구현 예시
/// ```ignore
/// struct Noop;
///
/// impl MutationInterface for Noop {
///     fn name(&self) -> &str { "Noop" }
///     fn handles(&self, _op: Operation) -> bool { true }
///     fn admit(&self, _attributes: &mut dyn Attributes) -> Result<(), StatusError> { Ok(()) }
/// }
/// ```
pub trait MutationInterface: Send + Sync {
    /// 컴포넌트 고유 이름 (예: `"AlwaysQualifyImages"`)
    fn name(&self) -> &str;

    /// 주어진 연산을 처리하는지 여부
    fn handles(&self, operation: crate::admission::Operation) -> bool;

    /// 어드미션 결정을 내리고, 필요하면 요청 객체를 변경합니다.
    ///
    /// 에러를 반환하면 요청은 거부됩니다. 이미 적용된 변경은 되돌리지 않습니다.
    fn admit(&self, attributes: &mut dyn Attributes) -> Result<(), StatusError>;
}

/// 어드미션 체인
///
/// 등록 순서가 보존되며, 실행도 등록 순서를 따릅니다.
///
/// # 사용 예시
/// ```ignore
/// let mut chain = AdmissionChain::new();
/// chain.register(Box::new(AlwaysQualifyImages::new(domain)))?;
///
/// chain.admit(&mut attributes)?;
/// ```
#[derive(Default)]
pub struct AdmissionChain {
    plugins: Vec<Box<dyn MutationInterface>>,
}

impl AdmissionChain {
    /// 빈 체인을 생성합니다.
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// 컴포넌트를 등록합니다.
    ///
    /// 동일한 이름의 컴포넌트가 이미 등록되어 있으면 에러를 반환합니다.
    pub fn register(&mut self, plugin: Box<dyn MutationInterface>) -> Result<(), QualgateError> {
        let name = plugin.name().to_owned();
        if self.plugins.iter().any(|p| p.name() == name) {
            return Err(PluginError::AlreadyRegistered { name }.into());
        }
        debug!(plugin = %name, "admission plugin registered");
        self.plugins.push(plugin);
        Ok(())
    }

    /// 컴포넌트를 해제하고 소유권을 반환합니다.
    pub fn unregister(&mut self, name: &str) -> Result<Box<dyn MutationInterface>, QualgateError> {
        match self.plugins.iter().position(|p| p.name() == name) {
            Some(idx) => Ok(self.plugins.remove(idx)),
            None => Err(PluginError::NotFound {
                name: name.to_owned(),
            }
            .into()),
        }
    }

    /// 이름으로 컴포넌트를 조회합니다.
    pub fn get(&self, name: &str) -> Option<&dyn MutationInterface> {
        self.plugins
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    /// 등록된 컴포넌트 이름 목록 (등록 순서)
    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// 등록된 컴포넌트 수
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// 등록된 컴포넌트가 없는지 여부
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// 요청에 대해 모든 컴포넌트를 등록 순서대로 실행합니다.
    ///
    /// 요청 연산을 처리하지 않는 컴포넌트는 건너뛰고 `reason="operation"`으로 집계합니다.
    /// 첫 번째 거부에서 즉시 반환합니다 (fail-fast).
    pub fn admit(&self, attributes: &mut dyn Attributes) -> Result<(), StatusError> {
        let operation = attributes.operation();
        for plugin in &self.plugins {
            if !plugin.handles(operation) {
                debug!(plugin = plugin.name(), %operation, "plugin does not handle operation");
                counter!(m::ADMISSION_SKIPPED_TOTAL, m::LABEL_REASON => m::SKIP_REASON_OPERATION)
                    .increment(1);
                continue;
            }
            if let Err(status) = plugin.admit(attributes) {
                counter!(m::ADMISSION_REQUESTS_TOTAL, m::LABEL_RESULT => "rejected").increment(1);
                return Err(status);
            }
        }
        counter!(m::ADMISSION_REQUESTS_TOTAL, m::LABEL_RESULT => "admitted").increment(1);
        Ok(())
    }
}
