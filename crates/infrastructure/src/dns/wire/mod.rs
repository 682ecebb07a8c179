//! RFC 1035 §4 message codec.
//!
//! Names are compressed on the way out with a per-message suffix table and
//! pointers are only followed backwards on the way in.
mod bits;
mod name;
mod reader;
mod writer;

pub use bits::{read_nybble, BitField};
pub use reader::deserialize;
pub use writer::serialize;

/// UDP payload limit without EDNS0.
pub const MAX_MESSAGE_SIZE: usize = 512;

pub const HEADER_SIZE: usize = 12;

/// Largest offset a 14-bit compression pointer can address.
const MAX_POINTER_OFFSET: usize = 0x3FFF;
