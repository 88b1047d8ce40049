//! packetlink - framed packet protocol for serial/UDP device links
//!
//! Implements the byte-level protocol spoken by bus-addressed hardware
//! devices: COBS-framed packets carrying a payload plus a 4-byte trailer
//! (packet id, device id, length, CRC-8). The codec is pure and stateless;
//! stream reassembly state is owned by the caller; transports are thin glue
//! around a serial port or a UDP socket.
//!
//! Sending a velocity constraint to every device on the bus:
//!
//! ```ignore
//! use packetlink::{catalog, DeviceLink, LinkConfig};
//!
//! let mut link = DeviceLink::connect(&LinkConfig::default(), shutdown)?;
//! link.send_floats(
//!     catalog::device_id::BROADCAST,
//!     catalog::packet_id::VELOCITY_CONSTRAINT,
//!     &[20.0, -20.0],
//! )
//! .await?;
//! while let Some(packet) = link.recv().await {
//!     println!("{:#04x} -> {:?}", packet.device_id, packet.payload);
//! }
//! ```

pub mod catalog;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod link;
pub mod packet;
pub mod stream;
pub mod transport;

pub use codec::{crc8, decode_floats, encode_floats, split_frames};
pub use config::{LinkConfig, TransportKind};
pub use error::{LinkError, ProtocolError, Result};
pub use link::DeviceLink;
pub use packet::{encode_packet, parse_packet, Packet};
pub use stream::PacketAssembler;
pub use transport::{LinkChannels, SerialTransport, Transport, UdpTransport};
