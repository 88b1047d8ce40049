//! Link configuration
//!
//! A `LinkConfig` names the transport and its parameters. Loaded from a TOML
//! file; missing fields fall back to defaults so a minimal config stays
//! minimal.

use crate::constants::{DEFAULT_BAUD_RATE, DEFAULT_UDP_PORT};
use crate::error::{LinkError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Transport selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Serial line to the device (8N1)
    #[default]
    Serial,
    /// UDP datagrams to the device's network endpoint
    Udp,
}

/// Link configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Which transport carries the frames
    pub transport: TransportKind,

    /// Serial port name (e.g. "COM12", "/dev/ttyUSB0")
    /// Only used when transport = serial
    pub serial_port: String,

    /// Serial baud rate
    pub baud_rate: u32,

    /// Device IP address
    /// Only used when transport = udp
    pub udp_address: String,

    /// Device UDP port
    pub udp_port: u16,

    /// Local UDP port to bind (0 = ephemeral)
    pub local_udp_port: u16,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::Serial,
            serial_port: String::new(),
            baud_rate: DEFAULT_BAUD_RATE,
            udp_address: "192.168.2.3".to_string(),
            udp_port: DEFAULT_UDP_PORT,
            local_udp_port: 0,
        }
    }
}

impl LinkConfig {
    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| LinkError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| LinkError::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
