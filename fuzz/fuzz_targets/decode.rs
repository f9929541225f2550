#![no_main]
use libfuzzer_sys::fuzz_target;

use cc_json::{decode, Value};

fuzz_target!(|data: &[u8]| {
    // Only valid UTF-8 reaches the decoder.
    if let Ok(s) = std::str::from_utf8(data) {
        // Looking for panics; a successful decode must yield a container root.
        if let Ok(value) = decode(s) {
            assert!(matches!(value, Value::Object(_) | Value::Array(_)));
        }
    }
});
