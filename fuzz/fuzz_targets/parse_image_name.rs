#![no_main]

use libfuzzer_sys::fuzz_target;
use qualgate_reference::parse_image_name;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(image) = parse_image_name(input) {
        // 정규화 결과는 항상 도메인을 포함한다
        assert!(image.repository.contains('/'));
        assert!(!image.tag.is_empty() || !image.digest.is_empty());
    }
});
