//! Streaming decoder integration tests.
//!
//! The streaming decoder must agree with the in-memory decoder on every
//! golden fixture: same frames for valid batches, same error and offset
//! for truncated ones, regardless of how the bytes are chunked.

use std::path::Path;

use batchframe_decoder::{BatchDecoder, DecodeError, StreamingDecoder};

fn golden(subpath: &str) -> Vec<u8> {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let path = manifest_dir
        .join("tests/golden")
        .join(subpath)
        .join("payload.bin");
    std::fs::read(&path)
        .unwrap_or_else(|e| panic!("failed to read golden fixture {}: {e}", path.display()))
}

const FIXTURES: &[&str] = &[
    "ab_empty_z",
    "empty",
    "single_empty_frame",
    "text_lines",
    "edge_cases/large_frame",
    "edge_cases/binary_payloads",
    "edge_cases/truncated_header",
    "edge_cases/truncated_payload",
];

/// Drain a streaming decoder fed through a `BufReader` of `capacity` bytes.
async fn stream_all(bytes: Vec<u8>, capacity: usize) -> Result<Vec<Vec<u8>>, DecodeError> {
    let reader = tokio::io::BufReader::with_capacity(capacity, std::io::Cursor::new(bytes));
    let mut stream = StreamingDecoder::new(reader);
    let mut frames = Vec::new();
    while let Some(frame) = stream.next().await {
        frames.push(frame?);
    }
    Ok(frames)
}

#[tokio::test]
async fn streaming_matches_sync_on_all_fixtures() {
    for fixture in FIXTURES {
        let bytes = golden(fixture);
        let sync = BatchDecoder::new().decode(&bytes).map(|b| b.into_payloads());

        for capacity in [1, 3, 4, 5, 4096] {
            let streamed = stream_all(bytes.clone(), capacity).await;
            match (&sync, &streamed) {
                (Ok(a), Ok(b)) => assert_eq!(a, b, "{fixture} @ {capacity}"),
                (Err(a), Err(b)) => {
                    assert_eq!(a.to_string(), b.to_string(), "{fixture} @ {capacity}");
                    assert_eq!(a.offset(), b.offset(), "{fixture} @ {capacity}");
                }
                _ => panic!("{fixture} @ {capacity}: sync {sync:?} vs stream {streamed:?}"),
            }
        }
    }
}

#[tokio::test]
async fn stream_reports_consumed_offset() {
    let bytes = golden("text_lines");
    let total = bytes.len();
    let mut stream = StreamingDecoder::new(std::io::Cursor::new(bytes));

    let mut count = 0;
    while let Some(frame) = stream.next().await {
        frame.unwrap();
        count += 1;
    }

    assert_eq!(count, 3);
    assert_eq!(stream.offset(), total);
}
