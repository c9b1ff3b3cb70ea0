use batchframe_wire::PREFIX_SIZE;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::DecodeError;

/// Asynchronous streaming decoder: yields frames one at a time without
/// buffering the entire batch.
///
/// Use this when the batch is large or arrives over a pipe or socket.
/// The decoder reads a prefix, then exactly that many payload bytes, and
/// hands the frame back. The next frame is only read when the caller
/// awaits [`next`](Self::next) again, so backpressure is natural.
///
/// Framing semantics and error offsets are identical to
/// [`BatchDecoder`](crate::BatchDecoder): a reader that ends exactly on a
/// frame boundary ends the stream; one that ends inside a prefix or a
/// payload produces the same `TruncatedHeader` / `TruncatedPayload` error
/// the in-memory decoder would report for the same bytes.
///
/// # Example
///
/// ```rust,no_run
/// use batchframe_decoder::StreamingDecoder;
/// use tokio::io::AsyncRead;
///
/// async fn print_frames(reader: impl AsyncRead + Unpin) {
///     let mut stream = StreamingDecoder::new(reader);
///     while let Some(frame) = stream.next().await.transpose().unwrap() {
///         println!("{}", String::from_utf8_lossy(&frame));
///     }
/// }
/// ```
pub struct StreamingDecoder<R> {
  reader: R,
  state: StreamState,
  /// Bytes consumed from the reader so far; the offset of the next prefix.
  offset: usize,
  max_frame_len: Option<u32>,
}

/// Internal state machine for the streaming decoder.
///
/// ```text
///   ReadFrames → Done
/// ```
///
/// The decoder stays in `ReadFrames` until clean EOF or the first error,
/// then moves to `Done` and yields `None` from then on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
  ReadFrames,
  Done,
}

impl<R: AsyncRead + Unpin> StreamingDecoder<R> {
  /// Create a new streaming decoder over the given async reader.
  #[must_use]
  pub fn new(reader: R) -> Self {
    Self {
      reader,
      state: StreamState::ReadFrames,
      offset: 0,
      max_frame_len: None,
    }
  }

  /// Reject any frame whose prefix declares more than `limit` bytes.
  #[must_use]
  pub fn with_max_frame_len(mut self, limit: u32) -> Self {
    self.max_frame_len = Some(limit);
    self
  }

  /// Bytes consumed from the reader so far.
  #[must_use]
  pub fn offset(&self) -> usize {
    self.offset
  }

  /// Give back the underlying reader.
  pub fn into_inner(self) -> R {
    self.reader
  }

  /// Read the next frame from the stream.
  ///
  /// Returns `Some(Ok(payload))` for each frame, `None` once the reader
  /// is exhausted on a frame boundary, or `Some(Err(_))` on the first
  /// structural or I/O error. After `None` or an error, every later call
  /// returns `None`.
  pub async fn next(&mut self) -> Option<Result<Vec<u8>, DecodeError>> {
    if self.state == StreamState::Done {
      return None;
    }

    match self.read_frame().await {
      Ok(Some(payload)) => Some(Ok(payload)),
      Ok(None) => {
        tracing::debug!(bytes = self.offset, "stream ended on frame boundary");
        self.state = StreamState::Done;
        None
      }
      Err(e) => {
        tracing::warn!(offset = self.offset, error = %e, "stream decode failed");
        self.state = StreamState::Done;
        Some(Err(e))
      }
    }
  }

  /// Read one prefix and its payload.
  ///
  /// `Ok(None)` means EOF arrived before the first prefix byte.
  async fn read_frame(&mut self) -> Result<Option<Vec<u8>>, DecodeError> {
    let start = self.offset;

    let mut prefix = [0u8; PREFIX_SIZE];
    let got = self.read_up_to(&mut prefix).await?;
    if got == 0 {
      return Ok(None);
    }
    if got < PREFIX_SIZE {
      return Err(DecodeError::TruncatedHeader {
        offset: start,
        available: got,
      });
    }

    let declared = u32::from_be_bytes(prefix);
    if let Some(limit) = self.max_frame_len
      && declared > limit
    {
      return Err(DecodeError::FrameTooLarge {
        offset: start,
        len: declared,
        limit,
      });
    }

    // Read through `take` so an absurd prefix cannot force a huge
    // allocation up front; the Vec only grows as bytes arrive.
    let body_start = start + PREFIX_SIZE;
    let expected = usize::try_from(declared).unwrap_or(usize::MAX);
    let mut payload = Vec::new();
    let available = (&mut self.reader)
      .take(u64::from(declared))
      .read_to_end(&mut payload)
      .await?;

    if available < expected {
      return Err(DecodeError::TruncatedPayload {
        offset: body_start,
        expected,
        available,
      });
    }

    self.offset = body_start + expected;
    tracing::trace!(offset = start, len = expected, "frame");
    Ok(Some(payload))
  }

  /// Fill `buf` from the reader, stopping early only at EOF.
  ///
  /// Returns the number of bytes read, which is less than `buf.len()`
  /// only if the reader ran dry.
  async fn read_up_to(&mut self, buf: &mut [u8]) -> Result<usize, DecodeError> {
    let mut filled = 0;
    while filled < buf.len() {
      let n = self.reader.read(&mut buf[filled..]).await?;
      if n == 0 {
        break;
      }
      filled += n;
    }
    Ok(filled)
  }
}
