use batchframe_wire::WireError;

/// Errors that can occur while decoding a batch.
///
/// Decoding is all-or-nothing: the first structural violation ends the
/// decode and is reported with the byte offset at which it was detected.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── TruncatedHeader    ← fewer than 4 bytes where a prefix was expected
///   ├── TruncatedPayload   ← prefix declares more bytes than remain
///   ├── FrameTooLarge      ← prefix exceeds the configured frame limit
///   ├── Wire(WireError)    ← not raised while reading; see the variant docs
///   └── Io(std::io::Error) ← from the underlying reader (streaming decoder)
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Fewer than 4 bytes remained where a length prefix was expected.
    ///
    /// `offset` is where the prefix would have started; `available` is
    /// how many bytes (0 to 3) were actually present there.
    #[error("truncated length prefix at offset {offset}: {available} of 4 bytes available")]
    TruncatedHeader { offset: usize, available: usize },

    /// A prefix declared more payload bytes than remain in the input.
    ///
    /// `offset` is the first payload byte, immediately after the prefix.
    #[error(
        "truncated payload at offset {offset}: expected {expected} bytes, {available} available"
    )]
    TruncatedPayload {
        offset: usize,
        expected: usize,
        available: usize,
    },

    /// A prefix declared a frame longer than the decoder's configured limit.
    ///
    /// Only raised when a limit was set with
    /// [`BatchDecoder::with_max_frame_len`](crate::BatchDecoder::with_max_frame_len).
    /// `offset` is the prefix start.
    #[error("frame at offset {offset} declares {len} bytes, limit is {limit}")]
    FrameTooLarge { offset: usize, len: u32, limit: u32 },

    /// A wire-level failure that is not one of the structural cases above.
    ///
    /// The read functions only raise the two truncation errors, which map
    /// to their own variants, so decoding never produces this. It keeps the
    /// conversion from [`WireError`] total.
    #[error(transparent)]
    Wire(WireError),

    /// An I/O error from the underlying reader (streaming decoder).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// Byte offset into the batch at which the violation was detected.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::TruncatedHeader { offset, .. }
            | Self::TruncatedPayload { offset, .. }
            | Self::FrameTooLarge { offset, .. } => Some(*offset),
            Self::Wire(inner) => inner.offset(),
            Self::Io(_) => None,
        }
    }
}

impl From<WireError> for DecodeError {
    fn from(err: WireError) -> Self {
        match err {
            WireError::TruncatedHeader { offset, available } => {
                Self::TruncatedHeader { offset, available }
            }
            WireError::TruncatedPayload {
                offset,
                expected,
                available,
            } => Self::TruncatedPayload {
                offset,
                expected,
                available,
            },
            WireError::Io(e) => Self::Io(e),
            other => Self::Wire(other),
        }
    }
}
