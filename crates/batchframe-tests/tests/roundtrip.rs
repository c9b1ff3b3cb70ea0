//! Roundtrip integration tests for the encode → decode pipeline.
//!
//! Encoding any sequence of payloads and decoding the result must give
//! back exactly those payloads, in order, including zero-length frames
//! and the empty sequence. The property tests cover arbitrary payload
//! sets; the named tests pin down the cases called out by the format.

use batchframe_decoder::{BatchDecoder, decode};
use batchframe_encoder::{BatchEncoder, encode_frames};
use batchframe_wire::PREFIX_SIZE;
use proptest::prelude::*;

fn roundtrip(payloads: &[Vec<u8>]) -> Vec<Vec<u8>> {
    let bytes = encode_frames(payloads).expect("encode should succeed");
    decode(&bytes).expect("decode should succeed")
}

// ── Named cases ───────────────────────────────────────────────────────────────

#[test]
fn no_frames() {
    assert!(roundtrip(&[]).is_empty());
}

#[test]
fn only_empty_frames() {
    let payloads = vec![Vec::new(); 5];
    assert_eq!(roundtrip(&payloads), payloads);
}

#[test]
fn mixed_sizes_preserve_order() {
    let payloads = vec![
        b"first".to_vec(),
        Vec::new(),
        vec![0xAB; 1000],
        b"\x00\x00\x00\x00".to_vec(),
        b"last".to_vec(),
    ];
    assert_eq!(roundtrip(&payloads), payloads);
}

#[test]
fn payload_that_looks_like_a_prefix() {
    // A payload whose bytes are themselves a valid prefix must not confuse
    // the decoder: boundaries come only from the enclosing prefix.
    let payloads = vec![vec![0x00, 0x00, 0x00, 0x02], b"ok".to_vec()];
    assert_eq!(roundtrip(&payloads), payloads);
}

#[test]
fn builder_and_free_function_agree() {
    let payloads = vec![b"a".to_vec(), b"bc".to_vec()];
    let from_builder = BatchEncoder::new()
        .add_frame(b"a")
        .add_frame(b"bc")
        .encode()
        .unwrap();
    assert_eq!(from_builder, encode_frames(&payloads).unwrap());
}

// ── Properties ────────────────────────────────────────────────────────────────

proptest! {
    /// Property: encode then decode reproduces the payloads exactly.
    #[test]
    fn prop_roundtrip(payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 0..16)) {
        prop_assert_eq!(roundtrip(&payloads), payloads);
    }

    /// Property: every byte of the batch is accounted for by prefixes and payloads.
    #[test]
    fn prop_exact_coverage(payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 0..16)) {
        let bytes = encode_frames(&payloads).unwrap();
        let batch = BatchDecoder::new().decode(&bytes).unwrap();
        let accounted: usize = batch.payloads().map(|p| PREFIX_SIZE + p.len()).sum();
        prop_assert_eq!(accounted, bytes.len());
        prop_assert_eq!(batch.consumed, bytes.len());
    }

    /// Property: decoding is compositional over concatenation of batches.
    #[test]
    fn prop_concatenation(
        left in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 0..8),
        right in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 0..8),
    ) {
        let mut joined = encode_frames(&left).unwrap();
        joined.extend(encode_frames(&right).unwrap());

        let mut expected = left.clone();
        expected.extend(right.iter().cloned());
        prop_assert_eq!(decode(&joined).unwrap(), expected);
    }

    /// Property: any strict prefix of a non-empty batch that does not end on
    /// a frame boundary fails, and fails at or before the cut.
    #[test]
    fn prop_truncation_is_detected(
        payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 1..8),
        cut_seed in any::<usize>(),
    ) {
        let bytes = encode_frames(&payloads).unwrap();
        let cut = cut_seed % bytes.len();

        let mut boundaries = vec![0usize];
        for p in &payloads {
            let last = *boundaries.last().unwrap();
            boundaries.push(last + PREFIX_SIZE + p.len());
        }

        let result = decode(&bytes[..cut]);
        if boundaries.contains(&cut) {
            prop_assert!(result.is_ok());
        } else {
            let err = result.unwrap_err();
            prop_assert!(err.offset().unwrap() <= cut);
        }
    }
}
