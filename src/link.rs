//! High-level device link
//!
//! `DeviceLink` ties a spawned transport to the codec and exposes the two
//! operations a caller needs: encode-and-send a packet, and receive decoded
//! packets with stream reassembly handled internally. One link owns one
//! transport connection and one assembler.

use crate::codec::encode_floats;
use crate::config::{LinkConfig, TransportKind};
use crate::error::{LinkError, Result};
use crate::packet::{encode_packet, Packet};
use crate::stream::PacketAssembler;
use crate::transport::{LinkChannels, SerialTransport, Transport, UdpTransport};
use bytes::Bytes;
use std::collections::VecDeque;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

/// A packet link to a device over one transport connection
pub struct DeviceLink {
    channels: LinkChannels,
    assembler: PacketAssembler,
    ready: VecDeque<Packet>,
}

impl DeviceLink {
    /// Spawn the transport named by the config and wrap it in a link
    pub fn connect(config: &LinkConfig, shutdown: Arc<AtomicBool>) -> Result<Self> {
        let channels = match config.transport {
            TransportKind::Serial => {
                SerialTransport::new(config.serial_port.clone(), config.baud_rate)
                    .spawn(shutdown)?
            }
            TransportKind::Udp => {
                let ip: IpAddr =
                    config
                        .udp_address
                        .parse()
                        .map_err(|_| LinkError::ConfigParse {
                            path: std::path::PathBuf::new(),
                            reason: format!("invalid udp_address '{}'", config.udp_address),
                        })?;
                UdpTransport::new(SocketAddr::new(ip, config.udp_port), config.local_udp_port)
                    .spawn(shutdown)?
            }
        };

        Ok(Self::over(channels))
    }

    /// Wrap already-spawned transport channels
    pub fn over(channels: LinkChannels) -> Self {
        Self {
            channels,
            assembler: PacketAssembler::new(),
            ready: VecDeque::new(),
        }
    }

    /// Encode a packet and hand it to the transport
    pub async fn send(&self, device_id: u8, packet_id: u8, payload: &[u8]) -> Result<()> {
        let frame = encode_packet(device_id, packet_id, payload)?;
        self.channels
            .tx
            .send(Bytes::from(frame))
            .await
            .map_err(|_| LinkError::ChannelClosed)
    }

    /// Encode an f32 payload and send it
    pub async fn send_floats(&self, device_id: u8, packet_id: u8, values: &[f32]) -> Result<()> {
        self.send(device_id, packet_id, &encode_floats(values)).await
    }

    /// Receive the next decoded packet
    ///
    /// Awaits transport bytes, feeds the assembler and yields packets in
    /// arrival order. Corrupt frames are logged and skipped; they never end
    /// the stream. Returns `None` once the transport has stopped and all
    /// buffered packets are drained.
    pub async fn recv(&mut self) -> Option<Packet> {
        loop {
            if let Some(packet) = self.ready.pop_front() {
                return Some(packet);
            }

            let data = self.channels.rx.recv().await?;
            for result in self.assembler.feed(&data) {
                match result {
                    Ok(packet) => self.ready.push_back(packet),
                    Err(e) => warn!("Discarding bad frame: {}", e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CHANNEL_CAPACITY;
    use tokio::sync::mpsc;

    fn loopback() -> (DeviceLink, mpsc::Sender<Bytes>, mpsc::Receiver<Bytes>) {
        let (in_tx, in_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (out_tx, out_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let link = DeviceLink::over(LinkChannels {
            rx: in_rx,
            tx: out_tx,
        });
        (link, in_tx, out_rx)
    }

    #[tokio::test]
    async fn send_produces_delimited_frame() {
        let (link, _in_tx, mut out_rx) = loopback();

        link.send(0x0D, 0x67, &[0x06]).await.unwrap();
        let frame = out_rx.recv().await.unwrap();
        assert_eq!(
            frame.as_ref(),
            &[0x06, 0x06, 0x67, 0x0D, 0x05, 0x7D, 0x00]
        );
    }

    #[tokio::test]
    async fn recv_reassembles_across_chunks() {
        let (mut link, in_tx, _out_rx) = loopback();

        let frame = encode_packet(0x05, 0x03, &[0x01, 0x02]).unwrap();
        let (a, b) = frame.split_at(2);
        in_tx.send(Bytes::copy_from_slice(a)).await.unwrap();
        in_tx.send(Bytes::copy_from_slice(b)).await.unwrap();

        let packet = link.recv().await.unwrap();
        assert_eq!(packet.device_id, 0x05);
        assert_eq!(packet.payload.as_ref(), &[0x01, 0x02]);
    }

    #[tokio::test]
    async fn recv_skips_corrupt_frames() {
        let (mut link, in_tx, _out_rx) = loopback();

        let good = encode_packet(0x02, 0x60, &[]).unwrap();
        let mut chunk = good.clone();
        chunk[0] ^= 0xFF; // corrupt the first frame
        chunk.extend_from_slice(&good);

        in_tx.send(Bytes::from(chunk)).await.unwrap();
        drop(in_tx);

        let packet = link.recv().await.unwrap();
        assert_eq!(packet.device_id, 0x02);
        assert_eq!(link.recv().await, None);
    }

    #[tokio::test]
    async fn recv_none_after_transport_stops() {
        let (mut link, in_tx, _out_rx) = loopback();
        drop(in_tx);
        assert_eq!(link.recv().await, None);
    }
}
