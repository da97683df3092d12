//! Payload constructors and the 20-byte wire packet.
//!
//! Every command is `payload[18] ++ checksum[2]`. The constructors here
//! always produce exactly [`PAYLOAD_LEN`] bytes, so length validation only
//! exists on the slice entry points that accept caller-supplied raw arrays.
//!
//! # Payload layouts
//!
//! | command | slot 0 | slots 1-17 |
//! |---------|--------|------------|
//! | handshake | `0x0D` | `[0, 0, 0, 0, 0xFF, 0xFF, 0 x11]` |
//! | set servos | `0x08` | 8 positions, 8 LED modes, foot-LED byte |
//! | set servo LEDs | `0x0C` | 8 colors, 8 LED modes, trailing byte |
//! | set eyes + chest | `0x11` | chest0, chest1, `(g << 3) \| r`, b, chest2, chest3, 0 x11 |
//! | set chest LEDs | `0x1C` | 4 statuses, 0 x13 |

#![deny(static_mut_refs)]

use crate::checksum;
use crate::ids::commands;
use crate::{ProtocolError, ProtocolResult};

/// Application bytes of a command, excluding checksum.
pub const PAYLOAD_LEN: usize = 18;
/// Big-endian 16-bit sum appended to every payload.
pub const CHECKSUM_LEN: usize = 2;
/// Full wire packet written to the command characteristic.
pub const PACKET_LEN: usize = PAYLOAD_LEN + CHECKSUM_LEN;

/// Number of servo slots carried by the 0x08 and 0x0C payloads.
pub const SERVO_COUNT: usize = 8;
/// Number of chest LED statuses carried by the 0x11 and 0x1C payloads.
pub const CHEST_LED_COUNT: usize = 4;

/// A complete, checksummed 20-byte command. Immutable once built.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Packet([u8; PACKET_LEN]);

impl Packet {
    /// Build a packet from a constructor-produced payload.
    pub fn from_payload(payload: [u8; PAYLOAD_LEN]) -> Self {
        let check = checksum::compute(&payload);
        let mut bytes = [0u8; PACKET_LEN];
        bytes[..PAYLOAD_LEN].copy_from_slice(&payload);
        bytes[PAYLOAD_LEN..].copy_from_slice(&check);
        Self(bytes)
    }

    /// Build a packet from a caller-supplied raw payload.
    ///
    /// Rejects any slice that is not exactly [`PAYLOAD_LEN`] bytes; nothing
    /// is padded or truncated on the caller's behalf.
    pub fn from_payload_slice(payload: &[u8]) -> ProtocolResult<Self> {
        let fixed: [u8; PAYLOAD_LEN] =
            payload
                .try_into()
                .map_err(|_| ProtocolError::InvalidLength {
                    what: "payload",
                    expected: PAYLOAD_LEN,
                    actual: payload.len(),
                })?;
        Ok(Self::from_payload(fixed))
    }

    /// The full 20 wire bytes.
    pub fn as_bytes(&self) -> &[u8; PACKET_LEN] {
        &self.0
    }

    /// The 18 payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.0[..PAYLOAD_LEN]
    }

    /// The command byte (payload slot 0).
    pub fn command_id(&self) -> u8 {
        self.0[0]
    }

    /// The two checksum bytes.
    pub fn checksum(&self) -> [u8; CHECKSUM_LEN] {
        [self.0[PAYLOAD_LEN], self.0[PAYLOAD_LEN + 1]]
    }

    /// Uppercase hex dump of the whole packet, for logs.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02X}")).collect()
    }
}

impl AsRef<[u8]> for Packet {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Packet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Packet({})", self.to_hex())
    }
}

/// Fixed wake command. The robot ignores everything else until it sees this.
pub fn build_handshake_payload() -> [u8; PAYLOAD_LEN] {
    let mut payload = [0u8; PAYLOAD_LEN];
    payload[0] = commands::HANDSHAKE;
    payload[5] = 0xFF;
    payload[6] = 0xFF;
    payload
}

/// Full servo group: 8 positions, 8 servo LED modes, the foot-LED byte.
///
/// Positions are physically-effective bytes; polarity for reversed slots is
/// the caller's concern and is never applied here.
pub fn build_servo_payload(
    positions: &[u8; SERVO_COUNT],
    led_modes: &[u8; SERVO_COUNT],
    foot_leds: u8,
) -> [u8; PAYLOAD_LEN] {
    let mut payload = [0u8; PAYLOAD_LEN];
    payload[0] = commands::SET_SERVOS;
    payload[1..9].copy_from_slice(positions);
    payload[9..17].copy_from_slice(led_modes);
    payload[17] = foot_leds;
    payload
}

/// Full servo LED group: 8 color codes, 8 modes, one trailing byte.
///
/// The stock app always sends `0x00` as the trailer.
pub fn build_servo_led_payload(
    colors: &[u8; SERVO_COUNT],
    led_modes: &[u8; SERVO_COUNT],
    trailer: u8,
) -> [u8; PAYLOAD_LEN] {
    let mut payload = [0u8; PAYLOAD_LEN];
    payload[0] = commands::SET_SERVO_LEDS;
    payload[1..9].copy_from_slice(colors);
    payload[9..17].copy_from_slice(led_modes);
    payload[17] = trailer;
    payload
}

/// Eye RGB plus the current chest LED statuses.
///
/// Eye components are 3-bit; green and red share slot 3 as `(g << 3) | r`,
/// blue rides alone in slot 4. Chest statuses are re-asserted in slots
/// 1, 2, 5 and 6 so this command can never publish stale chest state.
pub fn build_eye_chest_payload(
    eye_rgb: (u8, u8, u8),
    chest: &[u8; CHEST_LED_COUNT],
) -> [u8; PAYLOAD_LEN] {
    let (r, g, b) = eye_rgb;
    let mut payload = [0u8; PAYLOAD_LEN];
    payload[0] = commands::SET_EYES_CHEST;
    payload[1] = chest[0] & 0x01;
    payload[2] = chest[1] & 0x01;
    payload[3] = ((g & 0x07) << 3) | (r & 0x07);
    payload[4] = b & 0x07;
    payload[5] = chest[2] & 0x01;
    payload[6] = chest[3] & 0x01;
    payload
}

/// Standalone chest LED command; does not carry eye state.
pub fn build_chest_led_payload(chest: &[u8; CHEST_LED_COUNT]) -> [u8; PAYLOAD_LEN] {
    let mut payload = [0u8; PAYLOAD_LEN];
    payload[0] = commands::SET_CHEST_LEDS;
    payload[1] = chest[0] & 0x01;
    payload[2] = chest[1] & 0x01;
    payload[3] = chest[2] & 0x01;
    payload[4] = chest[3] & 0x01;
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handshake_packet_bytes() -> Result<(), Box<dyn std::error::Error>> {
        let packet = Packet::from_payload(build_handshake_payload());
        let expected: [u8; PACKET_LEN] = [
            0x0D, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x02, 0x0B,
        ];
        assert_eq!(packet.as_bytes(), &expected);
        assert_eq!(packet.command_id(), commands::HANDSHAKE);
        assert_eq!(packet.checksum(), [0x02, 0x0B]);
        Ok(())
    }

    #[test]
    fn test_servo_payload_layout() -> Result<(), Box<dyn std::error::Error>> {
        let positions = [0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x70, 0x80];
        let modes = [0x04; SERVO_COUNT];
        let payload = build_servo_payload(&positions, &modes, 0x01);

        assert_eq!(payload[0], commands::SET_SERVOS);
        assert_eq!(&payload[1..9], &positions, "slots 1-8 carry positions");
        assert_eq!(&payload[9..17], &modes, "slots 9-16 carry LED modes");
        assert_eq!(payload[17], 0x01, "slot 17 carries the foot-LED byte");
        Ok(())
    }

    #[test]
    fn test_servo_led_payload_layout() -> Result<(), Box<dyn std::error::Error>> {
        let colors = [0x07, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x00];
        let modes = [0x04; SERVO_COUNT];
        let payload = build_servo_led_payload(&colors, &modes, 0x00);

        assert_eq!(payload[0], commands::SET_SERVO_LEDS);
        assert_eq!(&payload[1..9], &colors);
        assert_eq!(&payload[9..17], &modes);
        assert_eq!(payload[17], 0x00);
        Ok(())
    }

    #[test]
    fn test_eye_chest_payload_packs_green_and_red() -> Result<(), Box<dyn std::error::Error>> {
        // g=5, r=3 -> (5 << 3) | 3 = 0x2B
        let payload = build_eye_chest_payload((3, 5, 6), &[1, 0, 1, 0]);
        assert_eq!(payload[0], commands::SET_EYES_CHEST);
        assert_eq!(payload[1], 1, "chest LED 0 in slot 1");
        assert_eq!(payload[2], 0, "chest LED 1 in slot 2");
        assert_eq!(payload[3], 0x2B, "green<<3 | red");
        assert_eq!(payload[4], 6, "blue in slot 4");
        assert_eq!(payload[5], 1, "chest LED 2 in slot 5");
        assert_eq!(payload[6], 0, "chest LED 3 in slot 6");
        assert_eq!(&payload[7..], &[0u8; 11], "slots 7-17 stay zero");
        Ok(())
    }

    #[test]
    fn test_chest_led_payload_layout() -> Result<(), Box<dyn std::error::Error>> {
        let payload = build_chest_led_payload(&[1, 1, 0, 1]);
        assert_eq!(payload[0], commands::SET_CHEST_LEDS);
        assert_eq!(&payload[1..5], &[1, 1, 0, 1]);
        assert_eq!(&payload[5..], &[0u8; 13]);
        Ok(())
    }

    #[test]
    fn test_packet_rejects_wrong_payload_lengths() {
        for len in [0usize, 17, 19, 20] {
            let raw = vec![0u8; len];
            let result = Packet::from_payload_slice(&raw);
            assert!(
                matches!(result, Err(ProtocolError::InvalidLength { actual, .. }) if actual == len),
                "length {len} must be rejected"
            );
        }
    }

    #[test]
    fn test_packet_hex_dump() -> Result<(), Box<dyn std::error::Error>> {
        let packet = Packet::from_payload(build_handshake_payload());
        assert_eq!(packet.to_hex(), "0D00000000FFFF0000000000000000000000020B");
        Ok(())
    }
}
