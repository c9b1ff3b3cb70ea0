/// Implementation of `batchframe encode`.
///
/// Builds a batch file from either a plain text file (one frame per line)
/// or a JSON manifest. Mainly used to produce fixtures that look like what
/// an external producer would write.
///
/// # JSON manifest
///
/// ```json
/// {
///   "frames": [
///     { "text": "AB" },
///     { "text": "" },
///     { "hex": "5a" }
///   ]
/// }
/// ```
///
/// Each entry carries exactly one of `text` (UTF-8, written verbatim) or
/// `hex` (decoded to raw bytes).
use std::fs;

use anyhow::{Context, Result};
use batchframe_encoder::BatchEncoder;
use serde::Deserialize;

use crate::{EncodeArgs, InputFormat};

/// Top-level JSON manifest.
#[derive(Debug, Deserialize)]
struct Manifest {
    frames: Vec<ManifestFrame>,
}

/// One frame in a manifest.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ManifestFrame {
    Text(String),
    Hex(String),
}

impl ManifestFrame {
    fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Self::Text(text) => Ok(text.into_bytes()),
            Self::Hex(digits) => {
                hex::decode(digits.trim()).with_context(|| format!("invalid hex {digits:?}"))
            }
        }
    }
}

/// Run the `batchframe encode` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or the output
/// cannot be written.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;

    let frames = match args.format {
        InputFormat::Lines => frames_from_lines(&raw),
        InputFormat::Json => frames_from_manifest(&raw)
            .with_context(|| format!("invalid manifest {}", args.input.display()))?,
    };

    let mut encoder = BatchEncoder::new();
    encoder.extend(&frames);
    let bytes = encoder.encode().context("failed to encode batch")?;

    fs::write(&args.output, &bytes)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    println!(
        "wrote {} frame{} ({} bytes) to {}",
        frames.len(),
        if frames.len() == 1 { "" } else { "s" },
        bytes.len(),
        args.output.display()
    );
    Ok(())
}

/// One frame per line; `\n` and `\r\n` terminators are stripped.
fn frames_from_lines(raw: &str) -> Vec<Vec<u8>> {
    raw.lines().map(|line| line.as_bytes().to_vec()).collect()
}

fn frames_from_manifest(raw: &str) -> Result<Vec<Vec<u8>>> {
    let manifest: Manifest = serde_json::from_str(raw)?;
    manifest
        .frames
        .into_iter()
        .enumerate()
        .map(|(i, frame)| frame.into_bytes().with_context(|| format!("frame {i}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_become_frames() {
        let frames = frames_from_lines("AB\n\r\nZ\n");
        assert_eq!(frames, vec![b"AB".to_vec(), Vec::new(), b"Z".to_vec()]);
    }

    #[test]
    fn manifest_mixes_text_and_hex() {
        let raw = r#"{"frames": [{"text": "AB"}, {"text": ""}, {"hex": "5a"}]}"#;
        let frames = frames_from_manifest(raw).unwrap();
        assert_eq!(frames, vec![b"AB".to_vec(), Vec::new(), b"Z".to_vec()]);
    }

    #[test]
    fn manifest_rejects_bad_hex() {
        let raw = r#"{"frames": [{"hex": "zz"}]}"#;
        let err = frames_from_manifest(raw).unwrap_err();
        assert!(format!("{err:#}").contains("frame 0"));
    }

    #[test]
    fn manifest_rejects_unknown_kind() {
        let raw = r#"{"frames": [{"base64": "QUI="}]}"#;
        assert!(frames_from_manifest(raw).is_err());
    }
}
