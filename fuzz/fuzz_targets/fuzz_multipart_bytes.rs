#![no_main]

use libfuzzer_sys::fuzz_target;
use multipart_upload::{parse_multipart, Multipart};

const CONTENT_TYPE: &str = "multipart/form-data; boundary=X-BOUNDARY";

fuzz_target!(|data: &[u8]| {
    let _ = parse_multipart(Some(CONTENT_TYPE), data, false);
    let _ = parse_multipart(Some(CONTENT_TYPE), data, true);

    if let Ok(content_type) = std::str::from_utf8(data) {
        let _ = parse_multipart(Some(content_type), b"--X-BOUNDARY--", false);
    }

    for part in Multipart::new(data.to_vec(), "X-BOUNDARY") {
        match part {
            Ok(part) => {
                let _ = part.text();
            }
            Err(_) => break,
        }
    }
});
