#![no_main]

use libfuzzer_sys::fuzz_target;
use profload::config::WorkloadConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Malformed or out-of-range sizes must come back as errors
        let _ = WorkloadConfig::from_toml_str(input);
    }
});
