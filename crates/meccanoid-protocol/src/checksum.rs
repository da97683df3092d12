//! Sum checksum over the 18-byte command payload.
//!
//! The robot accepts a packet only when the last two bytes equal the 16-bit
//! big-endian sum of the first 18. With byte inputs the sum tops out at
//! 255 * 18 = 4590, so the modulus never fires in practice; it is applied
//! anyway because the wire contract is defined as `sum mod 65536`.

#![deny(static_mut_refs)]

use crate::packet::{CHECKSUM_LEN, PAYLOAD_LEN};
use crate::{ProtocolError, ProtocolResult};

/// Compute the checksum of a fixed-size payload.
///
/// Pure function; recomputed on every encode, never cached.
pub fn compute(payload: &[u8; PAYLOAD_LEN]) -> [u8; CHECKSUM_LEN] {
    let sum: u32 = payload.iter().map(|&b| u32::from(b)).sum();
    let sum = (sum & 0xFFFF) as u16;
    [(sum >> 8) as u8, (sum & 0xFF) as u8]
}

/// Compute the checksum of a caller-supplied raw payload.
///
/// Rejects any slice that is not exactly [`PAYLOAD_LEN`] bytes.
pub fn compute_slice(payload: &[u8]) -> ProtocolResult<[u8; CHECKSUM_LEN]> {
    let fixed: &[u8; PAYLOAD_LEN] =
        payload
            .try_into()
            .map_err(|_| ProtocolError::InvalidLength {
                what: "payload",
                expected: PAYLOAD_LEN,
                actual: payload.len(),
            })?;
    Ok(compute(fixed))
}
