#![warn(clippy::pedantic)]

pub mod decoder;
pub mod error;
pub mod frame_reader;
pub mod streaming;

pub use decoder::{BatchDecoder, DecodedBatch, Frame, decode};
pub use error::DecodeError;
pub use frame_reader::{FrameReader, FrameRef};
pub use streaming::StreamingDecoder;
