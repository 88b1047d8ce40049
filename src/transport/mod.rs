//! Transport abstraction for byte-level I/O
//!
//! Separates I/O concerns from protocol logic:
//! - **Transport**: how bytes flow (serial, UDP)
//! - **Codec**: how frames are encoded/decoded (handled separately)
//!
//! Each transport manages its own execution model internally:
//! - Serial: blocking threads for low latency
//! - UDP: async tokio tasks

pub mod serial;
pub mod udp;

pub use serial::SerialTransport;
pub use udp::UdpTransport;

use bytes::Bytes;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::error::Result;

/// Channels for bidirectional communication with a spawned transport
///
/// The transport owns the underlying I/O (socket or serial port) and
/// communicates through these channels. When the transport stops, it closes
/// them.
pub struct LinkChannels {
    /// Raw bytes received from the transport; `None` when it has stopped
    pub rx: mpsc::Receiver<Bytes>,
    /// Raw bytes to write to the transport
    pub tx: mpsc::Sender<Bytes>,
}

/// Trait for spawnable transports
///
/// A transport handles opening the connection, reading and writing raw
/// bytes, and its own threading model. It does NOT handle frame boundaries
/// (the codec's job) or retries and reconnection (a non-goal of this layer:
/// a transport that fails closes its channels and is done).
pub trait Transport: Send + 'static {
    /// Spawn the transport in the background
    ///
    /// Starts I/O threads or tasks and returns channels for communication.
    /// The transport runs until `shutdown` is signaled or an I/O error
    /// occurs.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be initialized (port not
    /// found, bind failed).
    fn spawn(self, shutdown: Arc<AtomicBool>) -> Result<LinkChannels>;
}
