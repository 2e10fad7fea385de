#![no_main]

use libfuzzer_sys::fuzz_target;
use primeshare::ShamirScheme;

// Fuzzing target for the combine pipeline
//
// Arbitrary newline-separated share lines must produce either a secret or a
// typed error: malformed lines, damaged checksums, mixed thresholds, short
// sets and foreign payloads all surface as Err, never as a panic.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let scheme = ShamirScheme::default();
    let inputs: Vec<&str> = text.split('\n').collect();
    let _ = scheme.combine(inputs);
});
