//! Payload codec: fixed-length hex identifiers to bit sequences and back.
//!
//! A payload is a 256-bit identifier, canonically a 64-character hex string.
//! Encoding is strict and fails on malformed input; decoding is deliberately
//! lossy-tolerant and falls back to the all-zero sentinel rather than
//! erroring, because at extraction time "no recoverable payload" is an
//! answer, not a fault. Callers must treat [`ZERO_PAYLOAD`] as "nothing
//! valid recovered", never as a legitimate identifier.

use crate::error::{Result, WatermarkError};

/// Payload length in bits.
pub const PAYLOAD_BITS: usize = 256;

/// Payload length in hex characters.
pub const PAYLOAD_HEX_LEN: usize = 64;

/// Sentinel identifier returned when decoding recovers nothing valid.
pub const ZERO_PAYLOAD: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Encode a 64-character hex identifier as an ordered bit sequence,
/// most-significant bit first, truncated to `length` bits.
pub fn encode(hex_str: &str, length: usize) -> Result<Vec<u8>> {
    if hex_str.len() != PAYLOAD_HEX_LEN {
        return Err(WatermarkError::MalformedPayload(format!(
            "expected {} hex characters, got {}",
            PAYLOAD_HEX_LEN,
            hex_str.len()
        )));
    }

    let mut bits = Vec::with_capacity(PAYLOAD_BITS);
    for ch in hex_str.chars() {
        let nibble = ch.to_digit(16).ok_or_else(|| {
            WatermarkError::MalformedPayload(format!("invalid hex character {:?}", ch))
        })? as u8;
        for shift in (0..4).rev() {
            bits.push((nibble >> shift) & 1);
        }
    }

    bits.truncate(length.min(PAYLOAD_BITS));
    Ok(bits)
}

/// Decode a bit sequence back into a 64-character hex identifier.
///
/// A sequence shorter than `length` is zero-filled on the tail before
/// interpretation; this is the accepted lossy fallback for under-capacity
/// images, not an error. Anything unusable decodes to [`ZERO_PAYLOAD`].
pub fn decode(bits: &[u8], length: usize) -> String {
    let length = length.min(PAYLOAD_BITS);

    // The `length` recovered bits are the low end of the 256-bit identifier's
    // binary form, so left-pad to a full 256 before grouping into nibbles.
    let mut full = vec![0u8; PAYLOAD_BITS];
    let pad = PAYLOAD_BITS - length;
    for (i, slot) in full[pad..].iter_mut().enumerate() {
        *slot = bits.get(i).copied().unwrap_or(0);
    }

    if full.iter().any(|&b| b > 1) {
        return ZERO_PAYLOAD.to_string();
    }

    full.chunks(4)
        .map(|nibble| {
            let value = nibble.iter().fold(0u32, |acc, &b| (acc << 1) | b as u32);
            char::from_digit(value, 16).unwrap_or('0')
        })
        .collect()
}
