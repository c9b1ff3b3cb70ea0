#![no_main]

use libfuzzer_sys::fuzz_target;
use batchframe_decoder::BatchDecoder;

// Fuzz target: BatchDecoder::decode on arbitrary input.
//
// Catches bugs in:
// - Offset arithmetic near the end of the buffer
// - Prefixes declaring lengths far beyond the input
// - Disagreement between the owned and borrowed decode paths
fuzz_target!(|data: &[u8]| {
    let decoder = BatchDecoder::new();
    let owned = decoder.decode(data);
    let borrowed: Result<Vec<_>, _> = decoder.frames(data).collect();

    match (owned, borrowed) {
        (Ok(batch), Ok(frames)) => {
            assert_eq!(batch.consumed, data.len());
            assert_eq!(batch.len(), frames.len());
        }
        (Err(a), Err(b)) => assert_eq!(a.offset(), b.offset()),
        _ => panic!("owned and borrowed decode disagree"),
    }
});
