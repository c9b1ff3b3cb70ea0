/// Implementation of `batchframe decode`.
///
/// Loads the batch file with chunked reads, decodes it with
/// [`BatchDecoder`], and prints one line per frame. With `--stream` the
/// file is instead fed through [`StreamingDecoder`] and each frame is
/// printed as soon as it is complete.
///
/// # Output
///
/// ```text
/// ┌──────────┬──────────────────────────────────────────────┐
/// │ Mode     │ Line per frame                               │
/// ├──────────┼──────────────────────────────────────────────┤
/// │ default  │ payload as UTF-8 (invalid bytes → U+FFFD)     │
/// │ --hex    │ payload as lowercase hex, empty line if empty │
/// └──────────┴──────────────────────────────────────────────┘
/// ```
///
/// Decoding is all-or-nothing in the buffered mode: nothing is printed
/// if the batch is malformed. In `--stream` mode frames before the
/// failure have already been printed when the error is reported.
use std::io::{self, Write};

use anyhow::{Context, Result};
use batchframe_decoder::{BatchDecoder, StreamingDecoder};

use crate::DecodeArgs;
use crate::input;

/// Run the `batchframe decode` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the batch is structurally
/// invalid, or stdout cannot be written.
pub fn run(args: &DecodeArgs) -> Result<()> {
    if args.stream {
        return run_streaming(args);
    }

    let bytes = input::read_chunked(&args.file, args.chunk_size)?;

    let mut decoder = BatchDecoder::new();
    if let Some(limit) = args.max_frame_len {
        decoder = decoder.with_max_frame_len(limit);
    }

    let batch = decoder
        .decode(&bytes)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for payload in batch.payloads() {
        write_frame_line(&mut out, payload, args.hex)?;
    }
    out.flush().context("cannot write to stdout")?;

    Ok(())
}

/// Decode with the async streaming decoder on a single-threaded runtime.
fn run_streaming(args: &DecodeArgs) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .build()
        .context("cannot start async runtime")?;

    runtime.block_on(async {
        let file = tokio::fs::File::open(&args.file)
            .await
            .with_context(|| format!("cannot open {}", args.file.display()))?;
        let reader = tokio::io::BufReader::with_capacity(args.chunk_size, file);

        let mut stream = StreamingDecoder::new(reader);
        if let Some(limit) = args.max_frame_len {
            stream = stream.with_max_frame_len(limit);
        }

        let stdout = io::stdout();
        let mut out = stdout.lock();
        while let Some(frame) = stream.next().await {
            let frame =
                frame.with_context(|| format!("failed to decode {}", args.file.display()))?;
            write_frame_line(&mut out, &frame, args.hex)?;
        }
        out.flush().context("cannot write to stdout")
    })
}

/// Write one frame followed by a newline.
fn write_frame_line(out: &mut impl Write, payload: &[u8], as_hex: bool) -> Result<()> {
    let line = format_frame(payload, as_hex);
    writeln!(out, "{line}").context("cannot write to stdout")
}

/// Render a payload for line-oriented output.
pub(crate) fn format_frame(payload: &[u8], as_hex: bool) -> String {
    if as_hex {
        hex::encode(payload)
    } else {
        String::from_utf8_lossy(payload).into_owned()
    }
}
