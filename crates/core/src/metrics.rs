//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 크레이트는 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//! 레코더(exporter)는 호스트가 설치하며, 설치되지 않으면 기록은 무시됩니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `qualgate_`
//! - 접미어: `_total` (counter)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(qualgate_core::metrics::IMAGES_QUALIFIED_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 결과 레이블 키 (admitted, rejected)
pub const LABEL_RESULT: &str = "result";

/// 건너뛴 사유 레이블 키 (subresource, resource, operation)
pub const LABEL_REASON: &str = "reason";

/// 에러 종류 레이블 키 (`ErrorKind::as_str`)
pub const LABEL_KIND: &str = "kind";

/// 연산 불일치로 건너뛴 사유 값 (체인과 컴포넌트가 공유)
pub const SKIP_REASON_OPERATION: &str = "operation";

// ─── 어드미션 메트릭 ───────────────────────────────────────────────

/// 어드미션 체인을 통과한 요청 수 (counter, label: result)
pub const ADMISSION_REQUESTS_TOTAL: &str = "qualgate_admission_requests_total";

/// 적용 대상이 아니어서 건너뛴 요청 수 (counter, label: reason)
pub const ADMISSION_SKIPPED_TOTAL: &str = "qualgate_admission_skipped_total";

/// 거부된 요청 수 (counter, label: kind)
pub const ADMISSION_REJECTED_TOTAL: &str = "qualgate_admission_rejected_total";

// ─── 한정 엔진 메트릭 ──────────────────────────────────────────────

/// 도메인을 붙여 다시 쓴 이미지 수 (counter)
pub const IMAGES_QUALIFIED_TOTAL: &str = "qualgate_images_qualified_total";

/// 이미 도메인이 있어 그대로 둔 이미지 수 (counter)
pub const IMAGES_SKIPPED_TOTAL: &str = "qualgate_images_skipped_total";

/// 도메인을 붙인 결과가 유효하지 않았던 이미지 수 (counter)
pub const QUALIFICATION_FAILURES_TOTAL: &str = "qualgate_qualification_failures_total";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더 설치 후 한 번만 호출해야 합니다.
pub fn describe_all() {
    use metrics::describe_counter;

    describe_counter!(
        ADMISSION_REQUESTS_TOTAL,
        "Total number of admission requests evaluated by the chain"
    );
    describe_counter!(
        ADMISSION_SKIPPED_TOTAL,
        "Admission requests ignored as not applicable (subresource, resource, operation)"
    );
    describe_counter!(
        ADMISSION_REJECTED_TOTAL,
        "Admission requests rejected by the image qualifier"
    );
    describe_counter!(
        IMAGES_QUALIFIED_TOTAL,
        "Container images rewritten with the configured registry domain"
    );
    describe_counter!(
        IMAGES_SKIPPED_TOTAL,
        "Container images left unchanged because they already name a domain"
    );
    describe_counter!(
        QUALIFICATION_FAILURES_TOTAL,
        "Container images whose qualified form failed to parse"
    );
}
