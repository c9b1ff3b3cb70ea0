/// Implementation of `batchframe validate`.
///
/// Runs a full decode and reports either success checkmarks (`✓`) or a
/// diagnostic failure line (`✗`). Exits with code 1 on any structural
/// problem (the dispatcher in `main.rs` converts `Err` to exit code 1).
///
/// # Success output
///
/// ```text
/// ✓ Frames: 3 frames parsed successfully
/// ✓ Coverage: all 15 bytes accounted for
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error at offset 4: truncated payload, expected 10 bytes but only 5 remain
/// ```
use anyhow::{Result, anyhow};
use batchframe_decoder::{BatchDecoder, DecodeError};

use crate::ValidateArgs;
use crate::input;

/// Run the `batchframe validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the batch fails
/// structural validation.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let bytes = input::read_batch(&args.file)?;

    let mut decoder = BatchDecoder::new();
    if let Some(limit) = args.max_frame_len {
        decoder = decoder.with_max_frame_len(limit);
    }

    match decoder.decode(&bytes) {
        Ok(batch) => {
            println!(
                "✓ Frames: {} frame{} parsed successfully",
                batch.len(),
                if batch.len() == 1 { "" } else { "s" }
            );
            println!("✓ Coverage: all {} bytes accounted for", batch.consumed);
            Ok(())
        }
        Err(e) => {
            println!("✗ {}", decode_error_diagnostic(&e));
            Err(anyhow!("validation failed"))
        }
    }
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// Converts a `DecodeError` into a human-readable diagnostic string.
///
/// ```text
/// ┌──────────────────┬─────────────────────────────────────────────────┐
/// │ DecodeError      │ Diagnostic                                      │
/// ├──────────────────┼─────────────────────────────────────────────────┤
/// │ TruncatedHeader  │ "Error at offset N: truncated length prefix..." │
/// │ TruncatedPayload │ "Error at offset N: truncated payload..."       │
/// │ FrameTooLarge    │ "Error at offset N: frame declares..."          │
/// │ Wire / Io        │ "Error: <error Display>"                        │
/// └──────────────────┴─────────────────────────────────────────────────┘
/// ```
fn decode_error_diagnostic(e: &DecodeError) -> String {
    match e {
        DecodeError::TruncatedHeader { offset, available } => format!(
            "Error at offset {offset}: truncated length prefix, {available} of 4 bytes present"
        ),
        DecodeError::TruncatedPayload {
            offset,
            expected,
            available,
        } => format!(
            "Error at offset {offset}: truncated payload, expected {expected} bytes but only {available} remain"
        ),
        DecodeError::FrameTooLarge { offset, len, limit } => format!(
            "Error at offset {offset}: frame declares {len} bytes, above the {limit}-byte limit"
        ),
        other => format!("Error: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_name_the_offset() {
        let err = DecodeError::TruncatedPayload {
            offset: 4,
            expected: 10,
            available: 5,
        };
        assert_eq!(
            decode_error_diagnostic(&err),
            "Error at offset 4: truncated payload, expected 10 bytes but only 5 remain"
        );

        let err = DecodeError::TruncatedHeader {
            offset: 0,
            available: 3,
        };
        assert_eq!(
            decode_error_diagnostic(&err),
            "Error at offset 0: truncated length prefix, 3 of 4 bytes present"
        );
    }
}
