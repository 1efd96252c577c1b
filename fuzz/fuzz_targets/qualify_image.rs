#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use qualgate_admission::{Domain, has_domain, qualify_image};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    domain: String,
    image: String,
}

fuzz_target!(|input: FuzzInput| {
    let Ok(domain) = Domain::new(input.domain) else {
        return;
    };

    if let Ok(Some(qualified)) = qualify_image(&domain, &input.image) {
        // 한정된 이미지는 도메인을 가지며 다시 한정해도 바뀌지 않는다
        assert!(has_domain(&qualified));
        assert_eq!(qualify_image(&domain, &qualified), Ok(None));
    }
});
