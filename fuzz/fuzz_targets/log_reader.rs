#![no_main]

use libfuzzer_sys::fuzz_target;
use lychee_verdict::classify::{evaluate, EvaluationPolicy};
use lychee_verdict::error_codes::ErrorCodeSpec;
use lychee_verdict::lychee_log::LycheeLog;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(log) = LycheeLog::from_json_str(input) {
            let spec = ErrorCodeSpec::empty();
            let verdict = evaluate(&spec, &EvaluationPolicy::default(), &log.records);
            assert_eq!(verdict.tally.total, log.records.len());
        }
    }
});
