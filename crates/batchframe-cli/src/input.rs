/// Batch file loading shared by the subcommands.
///
/// Producers hand us a file and we have no say in how it was written, so
/// the loader makes no assumption about sizes: it issues `read()` calls of
/// a fixed chunk size until EOF and appends whatever each call returns.
/// The decoder only ever sees the fully assembled buffer.
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use anyhow::{Context, Result, ensure};

/// Default bytes requested per `read()` call.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Parse a `--chunk-size` value; zero is rejected up front so every decode
/// mode sees the same bound.
pub fn parse_chunk_size(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("chunk size must be at least 1 byte".to_owned()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Read `path` to EOF in `chunk_size` reads.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, or if
/// `chunk_size` is zero.
pub fn read_chunked(path: &Path, chunk_size: usize) -> Result<Vec<u8>> {
    ensure!(chunk_size > 0, "chunk size must be at least 1 byte");

    let mut file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let mut data = Vec::new();
    let mut chunk = vec![0u8; chunk_size];
    let mut reads = 0usize;

    loop {
        match file.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                data.extend_from_slice(&chunk[..n]);
                reads += 1;
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => {
                return Err(e).with_context(|| format!("cannot read {}", path.display()));
            }
        }
    }

    tracing::debug!(path = %path.display(), bytes = data.len(), reads, "read batch file");
    Ok(data)
}

/// Read `path` with the default chunk size.
///
/// # Errors
///
/// See [`read_chunked`].
pub fn read_batch(path: &Path) -> Result<Vec<u8>> {
    read_chunked(path, DEFAULT_CHUNK_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_size_does_not_change_contents() {
        let dir = std::env::temp_dir().join(format!("batchframe-input-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("data.bin");
        let contents: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        std::fs::write(&path, &contents).unwrap();

        for chunk in [1, 7, 4096, DEFAULT_CHUNK_SIZE] {
            assert_eq!(read_chunked(&path, chunk).unwrap(), contents, "chunk {chunk}");
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn chunk_size_flag_parsing() {
        assert_eq!(parse_chunk_size("4096"), Ok(4096));
        assert!(parse_chunk_size("0").is_err());
        assert!(parse_chunk_size("-1").is_err());
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        assert!(read_chunked(Path::new("unused"), 0).is_err());
    }
}
