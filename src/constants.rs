//! Protocol and transport constants
//!
//! Centralized constants to avoid duplication and ensure consistency.

// =============================================================================
// Wire format
// =============================================================================

/// Frame delimiter byte; COBS guarantees it never appears inside a frame body
pub const DELIMITER: u8 = 0x00;

/// Trailer size in bytes: packet_id + device_id + total_length + checksum
pub const TRAILER_SIZE: usize = 4;

/// Maximum value of the one-byte total_length field
pub const MAX_PACKET_SIZE: usize = 255;

/// Maximum payload size: total_length must fit payload + trailer in one byte
pub const MAX_PAYLOAD_SIZE: usize = MAX_PACKET_SIZE - TRAILER_SIZE;

/// Upper bound on a single COBS frame accepted by the stream assembler
pub const MAX_FRAME_SIZE: usize = 4096;

/// Size of one encoded f32 payload element
pub const FLOAT_SIZE: usize = 4;

// =============================================================================
// Serial
// =============================================================================

/// Default serial baud rate
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Serial read timeout (milliseconds)
pub const SERIAL_READ_TIMEOUT_MS: u64 = 10;

/// Consecutive zero-byte reads before assuming port disconnected
pub const SERIAL_DISCONNECT_THRESHOLD: u32 = 10;

/// Serial read buffer size
pub const SERIAL_BUFFER_SIZE: usize = 4096;

// =============================================================================
// Network
// =============================================================================

/// Default UDP port the device listens on
pub const DEFAULT_UDP_PORT: u16 = 6789;

/// UDP receive buffer size
pub const UDP_BUFFER_SIZE: usize = 4096;

// =============================================================================
// Buffers
// =============================================================================

/// Channel capacity for async message passing
pub const CHANNEL_CAPACITY: usize = 256;
