use crate::error::WireError;

/// Width of the length prefix that precedes every frame.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────────────┐
/// │ Offset │ Size    │ Description                          │
/// ├────────┼─────────┼──────────────────────────────────────┤
/// │ 0x00   │ 4 bytes │ Payload length, u32 big-endian       │
/// │ 0x04   │ N bytes │ Payload (N = value of the prefix)    │
/// └────────┴─────────┴──────────────────────────────────────┘
/// ```
///
/// The prefix counts payload bytes only; it does not include itself.
pub const PREFIX_SIZE: usize = 4;

/// Encode a payload length as a big-endian prefix.
#[must_use]
pub fn write_prefix(len: u32) -> [u8; PREFIX_SIZE] {
    len.to_be_bytes()
}

/// Read the length prefix starting at `offset`.
///
/// # Errors
///
/// Returns [`WireError::TruncatedHeader`] if fewer than [`PREFIX_SIZE`]
/// bytes remain at `offset`. The error's `offset` is the prefix start.
pub fn read_prefix(buf: &[u8], offset: usize) -> Result<u32, WireError> {
    let available = buf.len().saturating_sub(offset);
    let raw: [u8; PREFIX_SIZE] = buf
        .get(offset..)
        .and_then(|rest| rest.get(..PREFIX_SIZE))
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(WireError::TruncatedHeader { offset, available })?;
    Ok(u32::from_be_bytes(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_big_endian() {
        assert_eq!(write_prefix(1), [0x00, 0x00, 0x00, 0x01]);
        assert_eq!(write_prefix(0x0102_0304), [0x01, 0x02, 0x03, 0x04]);
        assert_eq!(write_prefix(u32::MAX), [0xFF; 4]);
    }

    #[test]
    fn read_prefix_at_offset() {
        let buf = [0xAA, 0x00, 0x00, 0x01, 0x00];
        assert_eq!(read_prefix(&buf, 1).unwrap(), 256);
    }

    #[test]
    fn read_prefix_short_buffer() {
        for len in 0..PREFIX_SIZE {
            let buf = vec![0u8; len];
            let err = read_prefix(&buf, 0).unwrap_err();
            assert!(
                matches!(err, WireError::TruncatedHeader { offset: 0, available } if available == len),
                "len {len}: got {err:?}"
            );
        }
    }

    #[test]
    fn read_prefix_offset_past_end() {
        let err = read_prefix(&[0u8; 2], 5).unwrap_err();
        assert!(matches!(
            err,
            WireError::TruncatedHeader {
                offset: 5,
                available: 0
            }
        ));
    }
}
