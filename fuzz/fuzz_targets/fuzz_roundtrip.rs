#![no_main]
use libfuzzer_sys::fuzz_target;
use zenplain::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce an identical grid
    let Ok(decoded) = decode(data, enough::Unstoppable) else {
        return;
    };

    let Ok(reencoded) = encode_ppm(decoded.grid(), decoded.maxval(), enough::Unstoppable) else {
        panic!("decoded grid failed to encode");
    };
    let Ok(decoded2) = decode(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.grid(), decoded2.grid(), "roundtrip pixel mismatch");
    assert_eq!(decoded.maxval(), decoded2.maxval());

    // Every transform keeps samples within maxval
    for t in [
        Transform::Invert,
        Transform::Greyscale,
        Transform::RemoveChannel(Channel::Red),
        Transform::Brightness(150),
        Transform::Brightness(-150),
        Transform::Reveal,
    ] {
        let out = t
            .apply_grid(decoded.grid(), decoded.maxval(), enough::Unstoppable)
            .expect("transform of a decoded grid");
        assert!(
            out.pixels()
                .iter()
                .all(|p| p.channels().iter().all(|&c| c <= decoded.maxval()))
        );
    }
});
