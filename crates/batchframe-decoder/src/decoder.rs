use crate::error::DecodeError;
use crate::frame_reader::{FrameReader, FrameRef};

/// One decoded frame.
///
/// `payload` is an owned copy of the frame's bytes. `offset` is the
/// position of the frame's length prefix in the batch buffer; it is kept
/// for diagnostics and plays no part in a frame's meaning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub offset: usize,
    pub payload: Vec<u8>,
}

/// The result of decoding a batch.
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │ DecodedBatch                                     │
/// │   frames:   Vec<Frame> ← in original encode order │
/// │   consumed: usize      ← always == input length   │
/// └──────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodedBatch {
    /// Ordered frames. Order matches the wire order.
    pub frames: Vec<Frame>,

    /// Bytes consumed from the input: every prefix plus every payload.
    pub consumed: usize,
}

impl DecodedBatch {
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterate payloads in order.
    pub fn payloads(&self) -> impl Iterator<Item = &[u8]> {
        self.frames.iter().map(|f| f.payload.as_slice())
    }

    /// Discard offsets and keep only the payloads.
    #[must_use]
    pub fn into_payloads(self) -> Vec<Vec<u8>> {
        self.frames.into_iter().map(|f| f.payload).collect()
    }
}

/// Batch decoder: splits a complete byte buffer into length-prefixed frames.
///
/// The decoder carries configuration only, no decoding state, so a single
/// value can be copied freely and shared across threads. Each call to
/// [`decode`](Self::decode) starts fresh on its own buffer.
///
/// Decoding steps, repeated until the buffer is exhausted:
///
///   1. **Length**: read a 4-byte big-endian prefix. Fewer than 4 bytes
///      left yields [`DecodeError::TruncatedHeader`] at the prefix offset.
///   2. **Limit**: if a maximum frame length is configured and the prefix
///      exceeds it, fail with [`DecodeError::FrameTooLarge`].
///   3. **Payload**: take the declared number of bytes. Too few left yields
///      [`DecodeError::TruncatedPayload`] at the first payload byte.
///
/// An empty buffer decodes to an empty batch. A prefix of zero is a valid,
/// empty frame. A well-formed batch has no leftover bytes, so any residue
/// after the last frame fails with one of the truncation errors.
///
/// # Example
///
/// ```rust
/// use batchframe_decoder::BatchDecoder;
///
/// let buf = [0, 0, 0, 2, b'A', b'B', 0, 0, 0, 0, 0, 0, 0, 1, b'Z'];
/// let batch = BatchDecoder::new().decode(&buf).unwrap();
///
/// let payloads: Vec<&[u8]> = batch.payloads().collect();
/// let expected: [&[u8]; 3] = [b"AB", b"", b"Z"];
/// assert_eq!(payloads, expected);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchDecoder {
    max_frame_len: Option<u32>,
}

impl BatchDecoder {
    /// Create a decoder with no frame length limit.
    #[must_use]
    pub const fn new() -> Self {
        Self { max_frame_len: None }
    }

    /// Reject any frame whose prefix declares more than `limit` bytes.
    ///
    /// Useful when the batch comes from an untrusted source and a single
    /// oversized frame should fail fast.
    #[must_use]
    pub const fn with_max_frame_len(mut self, limit: u32) -> Self {
        self.max_frame_len = Some(limit);
        self
    }

    #[must_use]
    pub const fn max_frame_len(&self) -> Option<u32> {
        self.max_frame_len
    }

    /// Lazily iterate the frames of `buf` without copying payloads.
    #[must_use]
    pub fn frames<'a>(&self, buf: &'a [u8]) -> FrameReader<'a> {
        FrameReader::with_limit(buf, self.max_frame_len)
    }

    /// Decode a complete batch.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::TruncatedHeader`] if a length prefix is cut short.
    /// - [`DecodeError::TruncatedPayload`] if a payload is cut short.
    /// - [`DecodeError::FrameTooLarge`] if a frame exceeds the configured
    ///   limit.
    ///
    /// No partial result is returned on error.
    pub fn decode(&self, buf: &[u8]) -> Result<DecodedBatch, DecodeError> {
        let frames = self
            .frames(buf)
            .map(|frame| frame.map(FrameRef::into_frame))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| {
                tracing::warn!(len = buf.len(), error = %e, "batch decode failed");
            })?;

        tracing::debug!(frames = frames.len(), bytes = buf.len(), "decoded batch");

        Ok(DecodedBatch {
            frames,
            consumed: buf.len(),
        })
    }
}

/// Decode a complete batch into its payloads, with default settings.
///
/// This is the plain `decode(bytes) -> frames` entry point; use
/// [`BatchDecoder`] for offsets or a frame length limit.
///
/// # Errors
///
/// See [`BatchDecoder::decode`].
pub fn decode(buf: &[u8]) -> Result<Vec<Vec<u8>>, DecodeError> {
    BatchDecoder::new().decode(buf).map(DecodedBatch::into_payloads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchframe_encoder::{BatchEncoder, encode_frames};

    #[test]
    fn empty_buffer_is_empty_batch() {
        let batch = BatchDecoder::new().decode(&[]).unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch.consumed, 0);
        assert!(decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn single_zero_prefix_is_one_empty_frame() {
        let frames = decode(&[0, 0, 0, 0]).unwrap();
        assert_eq!(frames, vec![Vec::<u8>::new()]);
    }

    #[test]
    fn short_buffers_fail_at_offset_zero() {
        for len in 1..=3 {
            let buf = vec![0xAB; len];
            let err = decode(&buf).unwrap_err();
            assert!(
                matches!(err, DecodeError::TruncatedHeader { offset: 0, available } if available == len),
                "len {len}: got {err:?}"
            );
        }
    }

    #[test]
    fn declared_ten_with_five_available() {
        let mut buf = vec![0, 0, 0, 10];
        buf.extend_from_slice(b"12345");
        let err = decode(&buf).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TruncatedPayload {
                offset: 4,
                expected: 10,
                available: 5
            }
        ));
        assert_eq!(err.offset(), Some(4));
    }

    #[test]
    fn ab_empty_z_scenario() {
        let buf = [
            0x00, 0x00, 0x00, 0x02, 0x41, 0x42, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
            0x5A,
        ];
        let batch = BatchDecoder::new().decode(&buf).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.consumed, buf.len());
        assert_eq!(
            batch.frames,
            vec![
                Frame { offset: 0, payload: b"AB".to_vec() },
                Frame { offset: 6, payload: Vec::new() },
                Frame { offset: 10, payload: b"Z".to_vec() },
            ]
        );
    }

    #[test]
    fn residue_after_last_frame_is_an_error() {
        let mut buf = encode_frames([b"complete"]).unwrap();
        let good_len = buf.len();
        buf.extend_from_slice(&[0x00, 0x00, 0x00, 0x09, b'p']);

        let err = decode(&buf).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TruncatedPayload { offset, expected: 9, available: 1 } if offset == good_len + 4
        ));
    }

    #[test]
    fn decode_is_repeatable() {
        let payloads: [&[u8]; 4] = [b"a", b"bb", b"", b"ccc"];
        let buf = encode_frames(payloads).unwrap();
        let decoder = BatchDecoder::new();
        assert_eq!(decoder.decode(&buf).unwrap(), decoder.decode(&buf).unwrap());

        let bad = &buf[..buf.len() - 1];
        let first = decoder.decode(bad).unwrap_err().to_string();
        let second = decoder.decode(bad).unwrap_err().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn limit_rejects_oversized_frame() {
        let buf = BatchEncoder::new()
            .add_frame(b"tiny")
            .add_frame(&[0u8; 64])
            .encode()
            .unwrap();
        let err = BatchDecoder::new()
            .with_max_frame_len(32)
            .decode(&buf)
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::FrameTooLarge {
                offset: 8,
                len: 64,
                limit: 32
            }
        ));

        // The default decoder has no limit.
        assert_eq!(BatchDecoder::default().decode(&buf).unwrap().len(), 2);
    }

    #[test]
    fn into_payloads_drops_offsets() {
        let buf = encode_frames([b"x", b"y"]).unwrap();
        let batch = BatchDecoder::new().decode(&buf).unwrap();
        assert_eq!(batch.into_payloads(), vec![b"x".to_vec(), b"y".to_vec()]);
    }
}
