//! Centralized error types for the crate
//!
//! Codec failures are represented by `ProtocolError`, transport and
//! configuration failures by `LinkError`. Use `Result<T>` as shorthand for
//! `std::result::Result<T, LinkError>`.

use std::fmt;
use std::path::PathBuf;

/// Codec-level errors
///
/// Decode-path variants (`Framing`, `TooShort`, `LengthMismatch`,
/// `ChecksumMismatch`) describe one bad candidate frame and never affect
/// subsequent calls. Encode-path variants (`PayloadTooLarge`,
/// `InvalidLength`) indicate a caller mistake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Malformed COBS byte-stuffing in a received frame
    Framing,
    /// Decoded frame shorter than the minimum trailer size
    TooShort { len: usize },
    /// Declared total_length disagrees with the actual decoded length
    LengthMismatch { declared: u8, actual: usize },
    /// CRC-8 over the frame body does not match the checksum byte
    ChecksumMismatch { expected: u8, actual: u8 },
    /// Payload too large for the one-byte length field
    PayloadTooLarge { len: usize },
    /// Float buffer length is not a multiple of 4
    InvalidLength { len: usize },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Framing => write!(f, "Invalid COBS encoding"),
            Self::TooShort { len } => {
                write!(f, "Frame too short: {} bytes (min 4)", len)
            }
            Self::LengthMismatch { declared, actual } => {
                write!(f, "Length mismatch: declared {}, actual {}", declared, actual)
            }
            Self::ChecksumMismatch { expected, actual } => {
                write!(
                    f,
                    "Checksum mismatch: expected {:#04x}, got {:#04x}",
                    expected, actual
                )
            }
            Self::PayloadTooLarge { len } => {
                write!(
                    f,
                    "Payload too large: {} bytes (max {})",
                    len,
                    crate::constants::MAX_PAYLOAD_SIZE
                )
            }
            Self::InvalidLength { len } => {
                write!(f, "Float buffer length {} is not a multiple of 4", len)
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Transport and configuration errors
#[derive(Debug)]
pub enum LinkError {
    /// Failed to open serial port
    SerialOpen {
        port: String,
        source: std::io::Error,
    },
    /// Failed to bind UDP socket
    UdpBind { port: u16, source: std::io::Error },
    /// Failed to read a config file
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file did not parse as valid TOML
    ConfigParse { path: PathBuf, reason: String },
    /// Transport channel closed (transport stopped or errored)
    ChannelClosed,
    /// Codec failure surfaced through the link API
    Protocol(ProtocolError),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SerialOpen { port, .. } => write!(f, "Cannot open serial port: {}", port),
            Self::UdpBind { port, .. } => write!(f, "Cannot bind UDP port {}", port),
            Self::ConfigRead { path, .. } => {
                write!(f, "Cannot read config: {}", path.display())
            }
            Self::ConfigParse { path, reason } => {
                write!(f, "Invalid config {}: {}", path.display(), reason)
            }
            Self::ChannelClosed => write!(f, "Transport channel closed"),
            Self::Protocol(e) => write!(f, "Protocol error: {}", e),
        }
    }
}

impl std::error::Error for LinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SerialOpen { source, .. }
            | Self::UdpBind { source, .. }
            | Self::ConfigRead { source, .. } => Some(source),
            Self::Protocol(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProtocolError> for LinkError {
    fn from(e: ProtocolError) -> Self {
        Self::Protocol(e)
    }
}

/// Alias for Result with LinkError
pub type Result<T> = std::result::Result<T, LinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_display() {
        let e = ProtocolError::ChecksumMismatch {
            expected: 0x82,
            actual: 0x00,
        };
        assert_eq!(e.to_string(), "Checksum mismatch: expected 0x82, got 0x00");
    }

    #[test]
    fn link_error_wraps_protocol_error() {
        let e: LinkError = ProtocolError::Framing.into();
        assert!(matches!(e, LinkError::Protocol(ProtocolError::Framing)));
        assert!(std::error::Error::source(&e).is_some());
    }
}
