//! f32 array payload codec
//!
//! Numeric payloads (positions, velocity constraints, ...) are sequences of
//! IEEE-754 binary32 values. The wire byte order is little-endian, fixed by
//! the device firmware; host-native order is never used.

use crate::constants::FLOAT_SIZE;
use crate::error::ProtocolError;

/// Encode a slice of f32 values to their wire representation
///
/// Produces exactly `4 * values.len()` bytes, little-endian.
pub fn encode_floats(values: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * FLOAT_SIZE);
    for value in values {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out
}

/// Decode a wire buffer back into f32 values
///
/// Fails with `InvalidLength` when the buffer is not a multiple of 4 bytes.
pub fn decode_floats(data: &[u8]) -> Result<Vec<f32>, ProtocolError> {
    if data.len() % FLOAT_SIZE != 0 {
        return Err(ProtocolError::InvalidLength { len: data.len() });
    }

    Ok(data
        .chunks_exact(FLOAT_SIZE)
        .map(|chunk| {
            // chunks_exact guarantees 4-byte chunks
            f32::from_le_bytes(chunk.try_into().unwrap())
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let cases: Vec<Vec<f32>> = vec![
            vec![],
            vec![0.0],
            vec![20.0, -20.0],
            vec![1.5, -2.25, 1e-6, 3.4e38],
            vec![std::f32::consts::PI, std::f32::consts::E],
        ];

        for values in cases {
            let encoded = encode_floats(&values);
            assert_eq!(encoded.len(), values.len() * 4);
            assert_eq!(decode_floats(&encoded).unwrap(), values);
        }
    }

    #[test]
    fn wire_byte_order() {
        // 20.0f32 = 0x41A00000, -20.0f32 = 0xC1A00000, little-endian on wire
        let encoded = encode_floats(&[20.0, -20.0]);
        assert_eq!(
            encoded,
            vec![0x00, 0x00, 0xA0, 0x41, 0x00, 0x00, 0xA0, 0xC1]
        );
    }

    #[test]
    fn rejects_unaligned_length() {
        for len in [1, 2, 3, 5, 7] {
            let data = vec![0u8; len];
            assert_eq!(
                decode_floats(&data),
                Err(ProtocolError::InvalidLength { len })
            );
        }
    }

    #[test]
    fn empty_buffer() {
        assert_eq!(decode_floats(&[]).unwrap(), Vec::<f32>::new());
    }
}
