/// Implementation of `batchframe stats`.
///
/// # Example output
///
/// ```text
/// File:     /tmp/dat1  (15 bytes)
/// Frames:   3 total, 1 empty
///
/// Payload bytes   3
/// Framing bytes  12  (80.0% of file)
/// Smallest        0
/// Largest         2
/// Mean          1.0
/// ```
use anyhow::{Context, Result};
use batchframe_decoder::{BatchDecoder, DecodedBatch};
use batchframe_wire::PREFIX_SIZE;

use crate::StatsArgs;
use crate::input;

/// Size summary of a decoded batch.
#[derive(Debug, Default, PartialEq)]
struct BatchStats {
    frames: usize,
    empty: usize,
    payload_bytes: usize,
    framing_bytes: usize,
    smallest: usize,
    largest: usize,
}

impl BatchStats {
    fn from_batch(batch: &DecodedBatch) -> Self {
        let sizes = || batch.payloads().map(<[u8]>::len);
        Self {
            frames: batch.len(),
            empty: sizes().filter(|&n| n == 0).count(),
            payload_bytes: sizes().sum(),
            framing_bytes: batch.len() * PREFIX_SIZE,
            smallest: sizes().min().unwrap_or(0),
            largest: sizes().max().unwrap_or(0),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean(&self) -> f64 {
        if self.frames == 0 {
            0.0
        } else {
            self.payload_bytes as f64 / self.frames as f64
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn overhead_percent(&self) -> f64 {
        let total = self.payload_bytes + self.framing_bytes;
        if total == 0 {
            0.0
        } else {
            self.framing_bytes as f64 * 100.0 / total as f64
        }
    }
}

/// Run the `batchframe stats` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the batch is
/// structurally invalid.
pub fn run(args: &StatsArgs) -> Result<()> {
    let bytes = input::read_batch(&args.file)?;
    let batch = BatchDecoder::new()
        .decode(&bytes)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    let stats = BatchStats::from_batch(&batch);

    println!("File:     {}  ({} bytes)", args.file.display(), bytes.len());
    println!("Frames:   {} total, {} empty", stats.frames, stats.empty);
    println!();
    println!("Payload bytes {:>5}", stats.payload_bytes);
    println!(
        "Framing bytes {:>5}  ({:.1}% of file)",
        stats.framing_bytes,
        stats.overhead_percent()
    );
    println!("Smallest      {:>5}", stats.smallest);
    println!("Largest       {:>5}", stats.largest);
    println!("Mean          {:>5.1}", stats.mean());

    Ok(())
}
