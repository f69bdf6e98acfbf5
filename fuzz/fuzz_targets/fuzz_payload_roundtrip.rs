#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // decode → validate → encode → decode must not panic, and a bill
        // that validated must survive the second decode unchanged.
        if let Some(bill) = zahlteil::payload::decode(s) {
            if let (Some(validated), _) = zahlteil::validate(&bill) {
                let text = zahlteil::payload::encode(&validated);
                let again = zahlteil::payload::decode(&text);
                assert_eq!(again.as_ref(), Some(validated.bill()));
            }
        }
    }
});
