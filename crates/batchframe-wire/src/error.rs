/// Structural errors raised while reading or writing the batch framing.
///
/// Every read-side variant carries the byte offset into the batch buffer
/// where the violation was detected, so a caller can point at the exact
/// spot in a file that went wrong.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Fewer than 4 bytes remained where a length prefix was expected.
    #[error("truncated length prefix at offset {offset}: {available} of 4 bytes available")]
    TruncatedHeader { offset: usize, available: usize },

    /// A prefix declared more payload bytes than the buffer holds.
    ///
    /// `offset` is the first payload byte, i.e. immediately after the prefix.
    #[error(
        "truncated payload at offset {offset}: expected {expected} bytes, {available} available"
    )]
    TruncatedPayload {
        offset: usize,
        expected: usize,
        available: usize,
    },

    /// A payload is too long to be described by a 4-byte prefix.
    #[error("frame of {size} bytes does not fit a 32-bit length prefix")]
    FrameTooLarge { size: usize },

    /// I/O error during write.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WireError {
    /// Byte offset of a structural read error, if this is one.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::TruncatedHeader { offset, .. } | Self::TruncatedPayload { offset, .. } => {
                Some(*offset)
            }
            Self::FrameTooLarge { .. } | Self::Io(_) => None,
        }
    }
}
