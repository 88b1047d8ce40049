//! Wire codec: framing, integrity, typed payloads
//!
//! Three cooperating pieces, all pure and stateless:
//! - **cobs**: byte-stuffing so 0x00 can delimit frames, plus stream splitting
//! - **crc**: CRC-8 checksum matching the device firmware
//! - **floats**: f32 array payload encoding
//!
//! The trailer layer that ties these together lives in [`crate::packet`].

pub mod cobs;
pub mod crc;
pub mod floats;

pub use cobs::split_frames;
pub use crc::crc8;
pub use floats::{decode_floats, encode_floats};
