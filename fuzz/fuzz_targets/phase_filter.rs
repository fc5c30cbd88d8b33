#![no_main]

use libfuzzer_sys::fuzz_target;
use profload::filter::PhaseFilter;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing must never panic, whatever the expression
        let _ = PhaseFilter::from_expr(input);
    }
});
