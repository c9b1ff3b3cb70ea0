/// Implementation of `batchframe inspect`.
///
/// # Output format
///
/// ```text
/// Batch: 15 bytes, 3 frames
/// Frame 0: offset=0 len=2
/// Frame 1: offset=6 len=0
/// Frame 2: offset=10 len=1
/// ---
/// End of batch at offset 15
/// ```
use std::fmt::Write as _;

use anyhow::{Context, Result, bail};
use batchframe_decoder::BatchDecoder;

use crate::InspectArgs;
use crate::input;

/// Run the `batchframe inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the batch is structurally
/// invalid, or `--frame` is out of range.
pub fn run(args: &InspectArgs) -> Result<()> {
    let bytes = input::read_batch(&args.file)?;

    let batch = BatchDecoder::new()
        .decode(&bytes)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    if let Some(target) = args.frame
        && target >= batch.len()
    {
        bail!(
            "frame index {target} out of range ({} frame{})",
            batch.len(),
            plural(batch.len())
        );
    }

    println!(
        "Batch: {} bytes, {} frame{}",
        bytes.len(),
        batch.len(),
        plural(batch.len())
    );

    for (idx, frame) in batch.frames.iter().enumerate() {
        if let Some(target) = args.frame
            && idx != target
        {
            continue;
        }

        println!(
            "Frame {idx}: offset={} len={}",
            frame.offset,
            frame.payload.len()
        );

        if args.show_body {
            println!("         Body:    {}", body_preview(&frame.payload));
        }

        if args.show_hex {
            println!("         Hex dump:");
            for line in hex_dump(&frame.payload) {
                println!("           {line}");
            }
        }
    }

    println!("---");
    println!("End of batch at offset {}", batch.consumed);

    Ok(())
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// First 80 characters of the payload as lossy UTF-8, with an ellipsis
/// when truncated.
fn body_preview(payload: &[u8]) -> String {
    let body = String::from_utf8_lossy(payload);
    let truncated: String = body.chars().take(80).collect();
    let ellipsis = if body.chars().count() > 80 { "…" } else { "" };
    format!("{truncated}{ellipsis}")
}

/// 16-bytes-per-line hex dump with an offset column and ASCII gutter.
fn hex_dump(payload: &[u8]) -> Vec<String> {
    payload
        .chunks(16)
        .enumerate()
        .map(|(i, chunk)| {
            let offset = i * 16;
            let hex = chunk
                .iter()
                .fold(String::with_capacity(chunk.len() * 3), |mut s, b| {
                    if !s.is_empty() {
                        s.push(' ');
                    }
                    let _ = write!(s, "{b:02x}");
                    s
                });
            let ascii: String = chunk
                .iter()
                .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
                .collect();
            format!("{offset:04x}  {hex:<47}  {ascii}")
        })
        .collect()
}
