#![no_main]

use libfuzzer_sys::fuzz_target;
use lychee_verdict::error_codes::ErrorCodeSpec;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing must not panic, and a parsed spec must render back to
        // tokens that parse to the same membership
        if let Ok(spec) = input.parse::<ErrorCodeSpec>() {
            let reparsed: ErrorCodeSpec = spec.to_string().parse().unwrap();
            for code in [0u16, 200, 404, 503, u16::MAX] {
                assert_eq!(spec.contains(code), reparsed.contains(code));
            }
        }
    }
});
