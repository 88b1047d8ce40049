//! Serial transport
//!
//! Uses blocking threads for low-latency I/O:
//! - Reader thread: reads from the port, sends chunks to the channel
//! - Writer thread: receives frames from the channel, writes to the port
//!
//! The transport stops when the `shutdown` flag is set, the port
//! disconnects (consecutive empty reads), or a write error occurs.

use super::{LinkChannels, Transport};
use crate::constants::{
    CHANNEL_CAPACITY, SERIAL_BUFFER_SIZE, SERIAL_DISCONNECT_THRESHOLD, SERIAL_READ_TIMEOUT_MS,
};
use crate::error::{LinkError, Result};
use bytes::Bytes;
use serialport::{DataBits, Parity, StopBits};
use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Serial transport with the device's fixed line settings (8N1)
///
/// # Example
///
/// ```ignore
/// let transport = SerialTransport::new("/dev/ttyUSB0", 115_200);
/// let channels = transport.spawn(shutdown)?;
/// ```
pub struct SerialTransport {
    port_name: String,
    baud_rate: u32,
}

impl SerialTransport {
    /// Create a new serial transport for the given port and baud rate
    pub fn new(port_name: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            port_name: port_name.into(),
            baud_rate,
        }
    }

    /// Open the port with the device's line settings
    ///
    /// 8 data bits, no parity, one stop bit, short read timeout so the
    /// reader thread can poll the shutdown flag.
    pub fn open(port_name: &str, baud_rate: u32) -> Result<Box<dyn serialport::SerialPort>> {
        serialport::new(port_name, baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .timeout(Duration::from_millis(SERIAL_READ_TIMEOUT_MS))
            .open()
            .map_err(|e| LinkError::SerialOpen {
                port: port_name.to_string(),
                source: std::io::Error::other(e.to_string()),
            })
    }
}

impl Transport for SerialTransport {
    fn spawn(self, shutdown: Arc<AtomicBool>) -> Result<LinkChannels> {
        let (in_tx, in_rx) = mpsc::channel::<Bytes>(CHANNEL_CAPACITY);
        let (out_tx, mut out_rx) = mpsc::channel::<Bytes>(CHANNEL_CAPACITY);

        let port_read = Self::open(&self.port_name, self.baud_rate)?;
        let port_write = port_read.try_clone().map_err(|e| LinkError::SerialOpen {
            port: self.port_name.clone(),
            source: std::io::Error::other(e.to_string()),
        })?;

        // Reader thread (blocking)
        let shutdown_reader = shutdown.clone();
        std::thread::spawn(move || {
            let mut port = port_read;
            let mut buf = [0u8; SERIAL_BUFFER_SIZE];
            let mut consecutive_empty = 0u32;

            while !shutdown_reader.load(Ordering::Relaxed) {
                match port.read(&mut buf) {
                    Ok(n) if n > 0 => {
                        consecutive_empty = 0;
                        if in_tx
                            .blocking_send(Bytes::copy_from_slice(&buf[..n]))
                            .is_err()
                        {
                            // Receiver dropped
                            break;
                        }
                    }
                    Ok(_) => {
                        // Zero bytes read: could be normal or port gone
                        consecutive_empty += 1;
                        if consecutive_empty > SERIAL_DISCONNECT_THRESHOLD {
                            break;
                        }
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::TimedOut => {
                        consecutive_empty = 0;
                    }
                    Err(_) => {
                        // Port disconnected
                        break;
                    }
                }
            }
        });

        // Writer thread (blocking)
        let shutdown_writer = shutdown.clone();
        std::thread::spawn(move || {
            let mut port = port_write;

            while !shutdown_writer.load(Ordering::Relaxed) {
                match out_rx.blocking_recv() {
                    Some(data) => {
                        if port.write_all(&data).is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
        });

        Ok(LinkChannels {
            rx: in_rx,
            tx: out_tx,
        })
    }
}
