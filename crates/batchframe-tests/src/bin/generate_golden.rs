//! Golden fixture generator for the batchframe test suite.
//!
//! Writes every fixture under `tests/golden/`. Run it after a deliberate
//! wire-format change and commit the regenerated files.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_golden -p batchframe-tests
//! ```
//!
//! # Generated fixtures
//!
//! | Directory                      | Contents                                  |
//! |--------------------------------|-------------------------------------------|
//! | ab_empty_z                     | "AB", "", "Z"                             |
//! | empty                          | zero-byte batch                           |
//! | single_empty_frame             | one zero-length frame                     |
//! | text_lines                     | three text frames                         |
//! | edge_cases/large_frame         | one 16 KiB frame of `x`                   |
//! | edge_cases/binary_payloads     | 0x00..=0xFF, a NUL, invalid UTF-8          |
//! | edge_cases/truncated_header    | Handcrafted: frame "A" + 2 stray bytes     |
//! | edge_cases/truncated_payload   | Handcrafted: prefix 10, 5 payload bytes    |

#![allow(clippy::pedantic)]

use std::path::Path;

use batchframe_encoder::encode_frames;
use batchframe_wire::write_prefix;

fn main() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let golden_dir = manifest_dir.join("tests/golden");

    generate_basic(&golden_dir);
    generate_edge_cases(&golden_dir);

    println!("All golden fixtures written to {}", golden_dir.display());
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_file(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create_dir_all");
    }
    std::fs::write(path, data).expect("write_file");
    println!("  wrote {} ({} bytes, {})", path.display(), data.len(), preview(data));
}

fn payload_path(dir: &Path, fixture: &str) -> std::path::PathBuf {
    dir.join(fixture).join("payload.bin")
}

fn preview(data: &[u8]) -> String {
    let head = &data[..data.len().min(8)];
    let ellipsis = if data.len() > 8 { "…" } else { "" };
    format!("{}{ellipsis}", hex::encode(head))
}

// ── Fixture generators ────────────────────────────────────────────────────────

fn generate_basic(dir: &Path) {
    let ab_empty_z: [&[u8]; 3] = [b"AB", b"", b"Z"];
    write_file(
        &payload_path(dir, "ab_empty_z"),
        &encode_frames(ab_empty_z).unwrap(),
    );

    write_file(&payload_path(dir, "empty"), &[]);

    let single: [&[u8]; 1] = [b""];
    write_file(
        &payload_path(dir, "single_empty_frame"),
        &encode_frames(single).unwrap(),
    );

    let lines: [&[u8]; 3] = [b"hello", b"world", b"go-dmux batch"];
    write_file(
        &payload_path(dir, "text_lines"),
        &encode_frames(lines).unwrap(),
    );
}

fn generate_edge_cases(dir: &Path) {
    write_file(
        &payload_path(dir, "edge_cases/large_frame"),
        &encode_frames([vec![b'x'; 16384]]).unwrap(),
    );

    let all_bytes: Vec<u8> = (0..=255u8).collect();
    let binary: [&[u8]; 3] = [&all_bytes, &[0x00], &[0xFF, 0xFE]];
    write_file(
        &payload_path(dir, "edge_cases/binary_payloads"),
        &encode_frames(binary).unwrap(),
    );

    // A complete frame followed by half a prefix.
    let mut truncated_header = encode_frames([b"A"]).unwrap();
    truncated_header.extend_from_slice(&[0x00, 0x00]);
    write_file(
        &payload_path(dir, "edge_cases/truncated_header"),
        &truncated_header,
    );

    // Prefix declares 10 bytes, only 5 follow.
    let mut truncated_payload = write_prefix(10).to_vec();
    truncated_payload.extend_from_slice(b"12345");
    write_file(
        &payload_path(dir, "edge_cases/truncated_payload"),
        &truncated_payload,
    );
}
