#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Some(info) = zahlteil::swico::decode(s) {
            let _ = zahlteil::swico::encode(&info);
            let _ = info.due_date();
        }
    }
});
