#![no_main]

use libfuzzer_sys::fuzz_target;
use batchframe_decoder::decode;
use batchframe_encoder::encode_frames;

// Fuzz target: encode→decode roundtrip.
//
// Input format: the input is split on 0x00 bytes and each piece becomes
// one frame, so empty frames show up naturally.
fuzz_target!(|data: &[u8]| {
    let payloads: Vec<&[u8]> = data.split(|&b| b == 0).collect();
    let wire = encode_frames(&payloads).unwrap();
    let decoded = decode(&wire).unwrap();

    assert_eq!(decoded.len(), payloads.len());
    for (got, want) in decoded.iter().zip(&payloads) {
        assert_eq!(got.as_slice(), *want);
    }
});
