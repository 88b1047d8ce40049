//! Stream reassembly for byte-oriented transports
//!
//! Serial reads deliver arbitrary chunks that may straddle frame boundaries.
//! `PacketAssembler` accumulates the undelimited remainder between reads and
//! emits one parse result per complete candidate frame. Each transport
//! connection owns its own assembler; there is no shared state.

use crate::codec::cobs::split_frames;
use crate::constants::MAX_FRAME_SIZE;
use crate::error::ProtocolError;
use crate::packet::{parse_packet, Packet};
use tracing::warn;

/// Caller-owned reassembly state for one byte stream
pub struct PacketAssembler {
    remainder: Vec<u8>,
}

impl Default for PacketAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketAssembler {
    /// Create a new assembler with an empty remainder
    pub fn new() -> Self {
        Self {
            remainder: Vec::with_capacity(1024),
        }
    }

    /// Feed received bytes, yielding one result per complete frame
    ///
    /// Corrupt frames come back as `Err` values in sequence position; the
    /// stream is not poisoned and later frames in the same chunk still
    /// decode. Trailing bytes without a delimiter are retained for the next
    /// call.
    pub fn feed(&mut self, data: &[u8]) -> Vec<Result<Packet, ProtocolError>> {
        self.remainder.extend_from_slice(data);

        let buf = std::mem::take(&mut self.remainder);
        let (frames, remainder) = split_frames(&buf);

        let results = frames.iter().map(|frame| parse_packet(frame)).collect();

        if let Some(tail) = remainder {
            if tail.len() > MAX_FRAME_SIZE {
                // No delimiter within any plausible frame length: line noise
                // or a desynced peer. Drop it rather than grow without bound.
                warn!(len = tail.len(), "Discarding oversized partial frame");
            } else {
                self.remainder.extend_from_slice(tail);
            }
        }

        results
    }

    /// Bytes currently held pending a delimiter
    pub fn pending(&self) -> usize {
        self.remainder.len()
    }

    /// Drop any buffered partial frame (e.g. after a reconnect)
    pub fn clear(&mut self) {
        self.remainder.clear();
    }
}
