//! CRC-8 integrity checksum
//!
//! Polynomial 0x4D (generator 0x14D), reflected, initial value 0xFF, final
//! XOR 0xFF. The reflected form processes bits LSB-first, so the table is
//! built over the bit-reversed polynomial 0xB2 with right shifts, and the
//! init/xorOut values cancel into a shift register starting at 0x00. Must
//! stay bit-exact: the device firmware computes the same checksum and a
//! silent deviation produces garbage, not an error.

const REFLECTED_POLY: u8 = 0xB2;
const INIT: u8 = 0xFF;
const XOR_OUT: u8 = 0xFF;

const TABLE: [u8; 256] = build_table();

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ REFLECTED_POLY
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Compute the CRC-8 of a byte slice
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = INIT ^ XOR_OUT;
    for &byte in data {
        crc = TABLE[(crc ^ byte) as usize];
    }
    crc ^ XOR_OUT
}
