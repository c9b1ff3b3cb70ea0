use batchframe_wire::WireError;

/// Errors that can occur while encoding a batch.
///
/// ```text
///   EncodeError
///   ├── FrameTooLarge     ← payload longer than a u32 prefix can describe
///   ├── Wire(WireError)   ← any other batchframe-wire failure
///   └── Io(std::io::Error)← from the destination writer
/// ```
///
/// Writer failures surface as `Io` even when they happen inside a
/// `batchframe-wire` call.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("frame {index} is {size} bytes, exceeding the 4-byte prefix limit of {limit}", limit = u32::MAX)]
    FrameTooLarge { index: usize, size: usize },

    /// A wire-level failure that is not a writer error.
    ///
    /// Frames are size-checked before anything is written, so the encoder
    /// itself does not produce this today.
    #[error(transparent)]
    Wire(WireError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<WireError> for EncodeError {
    fn from(err: WireError) -> Self {
        match err {
            WireError::Io(e) => Self::Io(e),
            other => Self::Wire(other),
        }
    }
}
