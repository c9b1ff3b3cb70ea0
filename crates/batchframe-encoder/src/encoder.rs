use batchframe_wire::{PREFIX_SIZE, write_frame};

use crate::error::EncodeError;

/// Largest payload a 4-byte prefix can describe.
const MAX_FRAME_LEN: usize = u32::MAX as usize;

/// Batch encoder: accumulates payloads and serializes them as a batch.
///
/// This is the producer side of the format and the inverse of
/// `BatchDecoder::decode` from the `batchframe-decoder` crate. Frames are
/// written in the order they were added, each preceded by its 4-byte
/// big-endian length.
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────┐
/// │ [4 bytes]    │ Frame 0 length                       │
/// │ [N0 bytes]   │ Frame 0 payload                      │
/// │ [4 bytes]    │ Frame 1 length                       │
/// │ [N1 bytes]   │ Frame 1 payload                      │
/// │ ...          │                                      │
/// └──────────────┴──────────────────────────────────────┘
/// ```
///
/// There is no header or terminator: an encoder with no frames produces
/// an empty buffer, which decodes back to an empty batch.
///
/// # Usage
///
/// ```rust
/// use batchframe_encoder::BatchEncoder;
///
/// let batch = BatchEncoder::new()
///     .add_frame(b"AB")
///     .add_frame(b"")
///     .add_frame(b"Z")
///     .encode()
///     .unwrap();
///
/// assert_eq!(batch, [0, 0, 0, 2, b'A', b'B', 0, 0, 0, 0, 0, 0, 0, 1, b'Z']);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BatchEncoder {
    frames: Vec<Vec<u8>>,
}

impl BatchEncoder {
    /// Create an empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Append a frame.
    ///
    /// Size limits are checked at [`encode`](Self::encode) time so the
    /// builder chain stays infallible.
    pub fn add_frame(&mut self, payload: &[u8]) -> &mut Self {
        self.frames.push(payload.to_vec());
        self
    }

    /// Append every payload yielded by `payloads`, in order.
    pub fn extend<I, P>(&mut self, payloads: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        self.frames
            .extend(payloads.into_iter().map(|p| p.as_ref().to_vec()));
        self
    }

    /// Number of frames added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Size in bytes of the encoded batch: one prefix per frame plus payloads.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.frames.iter().map(|f| PREFIX_SIZE + f.len()).sum()
    }

    /// Serialize all frames into a fresh buffer.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::FrameTooLarge`] if any payload is longer than
    /// `u32::MAX` bytes.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        self.validate()?;
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.write_unchecked(&mut buf)?;
        Ok(buf)
    }

    /// Serialize all frames into `w`.
    ///
    /// Validation happens before the first byte is written, so a size
    /// violation never leaves a partial batch behind.
    ///
    /// # Returns
    ///
    /// Total number of bytes written.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::FrameTooLarge`] if any payload is too long.
    /// - [`EncodeError::Io`] if the writer fails.
    pub fn write_to(&self, w: &mut impl std::io::Write) -> Result<usize, EncodeError> {
        self.validate()?;
        self.write_unchecked(w)
    }

    fn validate(&self) -> Result<(), EncodeError> {
        match self
            .frames
            .iter()
            .position(|f| f.len() > MAX_FRAME_LEN)
        {
            Some(index) => Err(EncodeError::FrameTooLarge {
                index,
                size: self.frames[index].len(),
            }),
            None => Ok(()),
        }
    }

    fn write_unchecked(&self, w: &mut impl std::io::Write) -> Result<usize, EncodeError> {
        let mut written = 0;
        for frame in &self.frames {
            written += write_frame(w, frame)?;
        }
        tracing::debug!(frames = self.frames.len(), bytes = written, "encoded batch");
        Ok(written)
    }
}

/// Encode a sequence of payloads in one call.
///
/// # Errors
///
/// Same as [`BatchEncoder::encode`].
pub fn encode_frames<I, P>(payloads: I) -> Result<Vec<u8>, EncodeError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<[u8]>,
{
    BatchEncoder::new().extend(payloads).encode()
}
