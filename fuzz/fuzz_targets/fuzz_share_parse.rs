#![no_main]

use libfuzzer_sys::fuzz_target;
use primeshare::Share;

// Fuzzing target for share deserialization
//
// Both the colon string form and the structured JSON form must reject
// malformed input with a typed error and never panic. Round-trips of
// successfully parsed shares must be stable.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(share) = text.parse::<Share>() {
        // A parsed share must re-serialize to a parseable string
        let round_trip: Share = share.to_string().parse().unwrap();
        assert_eq!(round_trip, share);
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(text) {
        if let Ok(share) = Share::from_record(&value) {
            let round_trip = Share::from_record(&share.to_record()).unwrap();
            assert_eq!(round_trip, share);
        }
    }
});
