#![warn(clippy::pedantic)]

pub mod encoder;
pub mod error;

pub use encoder::{BatchEncoder, encode_frames};
pub use error::EncodeError;
