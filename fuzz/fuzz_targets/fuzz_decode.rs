#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decode and header reading must never panic
    let _ = zenplain::decode(data, enough::Unstoppable);
    let _ = zenplain::ImageInfo::from_bytes(data);
});
