#![no_main]
use covdiag::model::ConditionCoverage;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(coverage) = s.parse::<ConditionCoverage>() {
            assert!(coverage.covered <= coverage.total);
        }
    }
});
