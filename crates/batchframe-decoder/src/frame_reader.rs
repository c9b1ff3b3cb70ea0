use batchframe_wire::{read_frame, read_prefix};

use crate::decoder::Frame;
use crate::error::DecodeError;

/// A frame borrowed from the batch buffer.
///
/// Produced by [`FrameReader`]. `offset` is the position of the frame's
/// length prefix within the batch; `payload` points into the original
/// buffer, so no bytes are copied until [`into_frame`](Self::into_frame).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRef<'a> {
  pub offset: usize,
  pub payload: &'a [u8],
}

impl FrameRef<'_> {
  /// Copy the payload out into an owned [`Frame`].
  #[must_use]
  pub fn into_frame(self) -> Frame {
    Frame {
      offset: self.offset,
      payload: self.payload.to_vec(),
    }
  }
}

/// Cursor-based, zero-copy frame reader over a complete batch buffer.
///
/// `FrameReader` walks the buffer one frame at a time and yields
/// `Result<FrameRef, DecodeError>`. It stops cleanly (`None`) when the
/// cursor lands exactly on the end of the buffer. On the first structural
/// error it yields that error once and then fuses: every later call
/// returns `None`, so the reader never resynchronizes past bad input.
///
/// ```text
///   Start ──► ReadingLength ──► ReadingPayload ──┐
///               ▲                                │
///               └────────────────────────────────┘
///   cursor == len ──► End        violation ──► Error
/// ```
///
/// # Usage pattern
///
/// ```text
///   let mut reader = BatchDecoder::new().frames(buf);
///   while let Some(frame) = reader.next() {
///       let frame = frame?;
///       handle(frame.payload);
///   }
/// ```
#[derive(Clone, Debug)]
pub struct FrameReader<'a> {
  buf: &'a [u8],
  pos: usize,
  max_frame_len: Option<u32>,
  failed: bool,
}

impl<'a> FrameReader<'a> {
  /// Create a reader over `buf` with no frame length limit.
  #[must_use]
  pub fn new(buf: &'a [u8]) -> Self {
    Self::with_limit(buf, None)
  }

  pub(crate) fn with_limit(buf: &'a [u8], max_frame_len: Option<u32>) -> Self {
    Self {
      buf,
      pos: 0,
      max_frame_len,
      failed: false,
    }
  }

  /// Return the number of bytes consumed so far.
  ///
  /// After a successful full pass this equals the buffer length.
  #[must_use]
  pub fn position(&self) -> usize {
    self.pos
  }

  /// Return the remaining unread bytes.
  #[must_use]
  pub fn remaining(&self) -> &'a [u8] {
    &self.buf[self.pos..]
  }

  fn read_next(&self) -> Result<(FrameRef<'a>, usize), DecodeError> {
    let offset = self.pos;

    if let Some(limit) = self.max_frame_len {
      let len = read_prefix(self.buf, offset)?;
      if len > limit {
        return Err(DecodeError::FrameTooLarge { offset, len, limit });
      }
    }

    let (payload, next) = read_frame(self.buf, offset)?;
    Ok((FrameRef { offset, payload }, next))
  }
}

impl<'a> Iterator for FrameReader<'a> {
  type Item = Result<FrameRef<'a>, DecodeError>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.failed || self.pos == self.buf.len() {
      return None;
    }

    match self.read_next() {
      Ok((frame, next)) => {
        tracing::trace!(offset = frame.offset, len = frame.payload.len(), "frame");
        self.pos = next;
        Some(Ok(frame))
      }
      Err(e) => {
        self.failed = true;
        Some(Err(e))
      }
    }
  }
}

impl std::iter::FusedIterator for FrameReader<'_> {}
