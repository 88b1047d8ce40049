//! UDP transport
//!
//! Client mode: datagrams go to the configured device address, and anything
//! the device sends back (heartbeat streams, request replies) is forwarded
//! to the receive channel.
//!
//! Uses async tokio tasks for I/O:
//! - RX task: receives datagrams from the device
//! - TX task: sends queued frames to the device

use super::{LinkChannels, Transport};
use crate::constants::{CHANNEL_CAPACITY, UDP_BUFFER_SIZE};
use crate::error::{LinkError, Result};
use bytes::Bytes;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;

/// UDP transport addressed at a fixed device endpoint
///
/// # Example
///
/// ```ignore
/// let peer: SocketAddr = "192.168.2.3:6789".parse()?;
/// let transport = UdpTransport::new(peer, 0);
/// let channels = transport.spawn(shutdown)?;
/// ```
pub struct UdpTransport {
    peer: SocketAddr,
    local_port: u16,
}

impl UdpTransport {
    /// Create a new UDP transport targeting `peer`
    ///
    /// `local_port` 0 binds an ephemeral port; a fixed port is useful when
    /// the device is configured to stream to a known endpoint.
    pub fn new(peer: SocketAddr, local_port: u16) -> Self {
        Self { peer, local_port }
    }
}

impl Transport for UdpTransport {
    fn spawn(self, shutdown: Arc<AtomicBool>) -> Result<LinkChannels> {
        let (in_tx, in_rx) = mpsc::channel::<Bytes>(CHANNEL_CAPACITY);
        let (out_tx, mut out_rx) = mpsc::channel::<Bytes>(CHANNEL_CAPACITY);

        let socket = create_udp_socket(self.local_port)?;
        let peer = self.peer;

        // RX task (async)
        let socket_rx = socket.clone();
        let shutdown_rx = shutdown.clone();
        tokio::spawn(async move {
            let mut buf = [0u8; UDP_BUFFER_SIZE];

            while !shutdown_rx.load(Ordering::Relaxed) {
                match tokio::time::timeout(
                    Duration::from_millis(100),
                    socket_rx.recv_from(&mut buf),
                )
                .await
                {
                    Ok(Ok((len, _addr))) => {
                        if in_tx
                            .send(Bytes::copy_from_slice(&buf[..len]))
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                    Ok(Err(_)) => {
                        // Socket recv error: keep polling
                    }
                    Err(_) => {
                        // Timeout: expected, allows checking the shutdown flag
                    }
                }
            }
        });

        // TX task (async)
        let socket_tx = socket.clone();
        let shutdown_tx = shutdown.clone();
        tokio::spawn(async move {
            while !shutdown_tx.load(Ordering::Relaxed) {
                match tokio::time::timeout(Duration::from_millis(100), out_rx.recv()).await {
                    Ok(Some(data)) => {
                        let _ = socket_tx.send_to(&data, peer).await;
                    }
                    Ok(None) => break,
                    Err(_) => {
                        // Timeout: check shutdown flag
                    }
                }
            }
        });

        Ok(LinkChannels {
            rx: in_rx,
            tx: out_tx,
        })
    }
}

/// Create a nonblocking UDP socket bound to the given local port
///
/// SO_REUSEADDR allows a quick rebind of a fixed local port after a
/// previous run.
fn create_udp_socket(local_port: u16) -> Result<Arc<UdpSocket>> {
    let addr = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, local_port);
    let map_err = |e| LinkError::UdpBind {
        port: local_port,
        source: e,
    };

    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP)).map_err(map_err)?;
    socket.set_reuse_address(true).map_err(map_err)?;
    socket.set_nonblocking(true).map_err(map_err)?;
    socket.bind(&SocketAddr::V4(addr).into()).map_err(map_err)?;

    let std_socket: std::net::UdpSocket = socket.into();
    Ok(Arc::new(UdpSocket::from_std(std_socket).map_err(map_err)?))
}
