use crate::error::WireError;
use crate::prefix::{PREFIX_SIZE, read_prefix, write_prefix};

/// Write one frame (prefix followed by payload) to the provided writer.
///
/// Wire layout written:
///   1. `payload.len()` as a 4-byte big-endian prefix
///   2. payload bytes
///
/// # Returns
///
/// Total number of bytes written (`PREFIX_SIZE + payload.len()`).
///
/// # Errors
///
/// - [`WireError::FrameTooLarge`] if the payload length exceeds `u32::MAX`.
/// - [`WireError::Io`] if the writer fails.
pub fn write_frame(w: &mut impl std::io::Write, payload: &[u8]) -> Result<usize, WireError> {
    let len = u32::try_from(payload.len()).map_err(|_| WireError::FrameTooLarge {
        size: payload.len(),
    })?;

    w.write_all(&write_prefix(len))?;
    w.write_all(payload)?;

    Ok(PREFIX_SIZE + payload.len())
}

/// Read the frame whose prefix starts at `offset`.
///
/// # Returns
///
/// The payload slice, borrowed from `buf`, and the offset at which the
/// next frame begins.
///
/// # Errors
///
/// - [`WireError::TruncatedHeader`] if fewer than 4 bytes remain at `offset`.
/// - [`WireError::TruncatedPayload`] if the declared length runs past the
///   end of `buf`. The error offset is the first payload byte.
pub fn read_frame(buf: &[u8], offset: usize) -> Result<(&[u8], usize), WireError> {
    let declared = read_prefix(buf, offset)?;
    let body_start = offset + PREFIX_SIZE;

    // u32 always fits usize on the 32/64-bit targets we build for, but a
    // failed conversion is still a payload that cannot be present.
    let expected = usize::try_from(declared).unwrap_or(usize::MAX);
    let available = buf.len() - body_start;

    if expected > available {
        return Err(WireError::TruncatedPayload {
            offset: body_start,
            expected,
            available,
        });
    }

    let body_end = body_start + expected;
    Ok((&buf[body_start..body_end], body_end))
}
