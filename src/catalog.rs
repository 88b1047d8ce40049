//! Device and packet id catalog
//!
//! Catalog data, not protocol logic: the codec treats ids as opaque bytes.
//! These are the assignments used by the manipulator firmware this crate
//! was written against; other devices ship their own catalogs.

/// Well-known packet ids
pub mod packet_id {
    /// Joint position report (f32 payload)
    pub const POSITION: u8 = 0x03;
    /// Requests the device to emit the listed packet ids once
    pub const REQUEST: u8 = 0x60;
    /// Device type report / mode select
    pub const DEVICE_TYPE: u8 = 0x67;
    /// Set of packet ids the device streams periodically
    pub const HEARTBEAT_SET: u8 = 0x91;
    /// Heartbeat stream frequency in Hz (0 disables)
    pub const HEARTBEAT_FREQUENCY_SET: u8 = 0x92;
    /// Velocity constraint pair (min, max) as f32s
    pub const VELOCITY_CONSTRAINT: u8 = 0xB5;
    /// Soft reset of the addressed device
    pub const SYSTEM_RESET: u8 = 0xFD;
}

/// Well-known device ids
pub mod device_id {
    /// Passthrough board between the host and the joint bus
    pub const PASSTHROUGH_BOARD: u8 = 0x0D;
    /// Main processor
    pub const PROCESSOR: u8 = 0x0E;
    /// All devices on the bus
    pub const BROADCAST: u8 = 0xFF;
}

/// DEVICE_TYPE mode value enabling passthrough
pub const PASSTHROUGH_MODE: u8 = 0x06;
