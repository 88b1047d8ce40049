//! COBS (Consistent Overhead Byte Stuffing) framing
//!
//! Encodes data so 0x00 never appears in the frame body, allowing it as the
//! frame delimiter. Zero-allocation encoding/decoding using provided output
//! buffers, plus stream splitting on the delimiter.

use crate::constants::{DELIMITER, MAX_FRAME_SIZE};
use crate::error::ProtocolError;
use bytes::BytesMut;

/// Encode data using COBS into the provided buffer
///
/// Clears the output buffer, encodes data and appends the trailing 0x00
/// delimiter. The produced frame contains 0x00 only as its final byte.
/// Returns the number of bytes written.
pub fn encode_into(data: &[u8], output: &mut Vec<u8>) -> Result<usize, ProtocolError> {
    if data.len() > MAX_FRAME_SIZE - 2 {
        return Err(ProtocolError::PayloadTooLarge { len: data.len() });
    }

    output.clear();
    output.reserve(data.len() + (data.len() / 254) + 2);

    let mut code_index = 0;
    output.push(0);
    let mut code: u8 = 1;

    for &byte in data {
        if byte == 0 {
            output[code_index] = code;
            code_index = output.len();
            output.push(0);
            code = 1;
        } else {
            output.push(byte);
            code += 1;
            if code == 255 {
                output[code_index] = code;
                code_index = output.len();
                output.push(0);
                code = 1;
            }
        }
    }

    output[code_index] = code;
    output.push(DELIMITER);
    Ok(output.len())
}

/// Decode a COBS frame body into the provided buffer
///
/// Input must NOT include the trailing delimiter. Extends the buffer (does
/// not clear it). Returns the number of bytes written, or
/// `ProtocolError::Framing` when a stuffing code is zero or runs past the
/// end of the input. Nothing is appended on error.
pub fn decode_into(encoded: &[u8], output: &mut BytesMut) -> Result<usize, ProtocolError> {
    if encoded.is_empty() {
        return Ok(0);
    }

    // Validate before touching the output so a bad frame leaves it intact.
    let mut i = 0;
    while i < encoded.len() {
        let code = encoded[i] as usize;
        if code == 0 {
            return Err(ProtocolError::Framing);
        }
        if i + code > encoded.len() {
            return Err(ProtocolError::Framing);
        }
        i += code;
    }

    let start_len = output.len();
    let mut i = 0;

    while i < encoded.len() {
        let code = encoded[i] as usize;
        i += 1;
        let copy_len = code - 1;

        output.extend_from_slice(&encoded[i..i + copy_len]);
        i += copy_len;

        if code < 255 && i < encoded.len() {
            output.extend_from_slice(&[0]);
        }
    }

    Ok(output.len() - start_len)
}

/// Split a buffer into complete delimited frames plus an undelimited remainder
///
/// Every segment terminated by 0x00 becomes one candidate frame, returned
/// with the delimiter stripped. If the buffer does not end with a delimiter
/// the trailing segment is returned as the remainder; the caller must prepend
/// it to the next received chunk before splitting again. Empty segments
/// (back-to-back delimiters) are dropped.
pub fn split_frames(buf: &[u8]) -> (Vec<&[u8]>, Option<&[u8]>) {
    let mut frames = Vec::new();
    let mut start = 0;

    for (i, &byte) in buf.iter().enumerate() {
        if byte == DELIMITER {
            if i > start {
                frames.push(&buf[start..i]);
            }
            start = i + 1;
        }
    }

    let remainder = if start < buf.len() {
        Some(&buf[start..])
    } else {
        None
    };

    (frames, remainder)
}
