#![no_main]

use libfuzzer_sys::fuzz_target;
use qualgate_reference::split_image_name;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok((domain, remainder)) = split_image_name(input) {
        if domain.is_empty() {
            assert_eq!(remainder, input);
        } else {
            assert_eq!(format!("{domain}/{remainder}"), input);
        }
    }
});
