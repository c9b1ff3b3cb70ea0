#![warn(clippy::pedantic)]

pub mod error;
pub mod frame;
pub mod prefix;

pub use error::WireError;
pub use frame::{read_frame, write_frame};
pub use prefix::{PREFIX_SIZE, read_prefix, write_prefix};
