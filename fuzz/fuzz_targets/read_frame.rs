#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: single-frame parsing at every offset of the input.
fuzz_target!(|data: &[u8]| {
    for offset in 0..=data.len() {
        if let Ok((payload, next)) = batchframe_wire::read_frame(data, offset) {
            assert!(next <= data.len());
            assert_eq!(next - offset, batchframe_wire::PREFIX_SIZE + payload.len());
        }
    }
});
