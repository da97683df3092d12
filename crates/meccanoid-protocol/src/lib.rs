//! BLE command protocol for the Meccanoid G15KS humanoid robot
//!
//! This crate is the I/O-free core of the stack: it knows the 20-byte packet
//! format and remembers what was last sent, but never touches Bluetooth.
//!
//! - 18-byte payloads with a big-endian sum checksum appended
//! - full-group encoders for servos, servo LEDs, eyes and chest LEDs
//! - logical joint names mapped onto physical servo slots, with polarity
//!   reversal for the two mirrored arm servos
//! - a fixed pose catalog expanded through the joint map
//!
//! Drive it through [`RobotState`]: each operation validates, updates the
//! believed output state and hands back the packet to put on the wire.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod checksum;
pub mod colors;
pub mod ids;
pub mod joints;
pub mod packet;
pub mod poses;
pub mod state;

pub use colors::LedColor;
pub use joints::{apply_polarity, is_reversed, ArmJoint, REVERSED_SLOTS, SERVO_CENTER};
pub use packet::{
    build_chest_led_payload, build_eye_chest_payload, build_handshake_payload,
    build_servo_led_payload, build_servo_payload, Packet, CHECKSUM_LEN, CHEST_LED_COUNT,
    PACKET_LEN, PAYLOAD_LEN, SERVO_COUNT,
};
pub use poses::{Pose, POSES};
pub use state::{RobotState, DEFAULT_FOOT_LEDS, DEFAULT_SERVO_LED_MODE, LED_CHANNEL_MAX};

use thiserror::Error;

/// Errors returned by protocol operations.
///
/// Everything here is recoverable and reported before any state mutation;
/// a failed operation leaves [`RobotState`] untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("{what} must be exactly {expected} bytes, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{what} value {value} out of range 0..={max}")]
    ValueOutOfRange {
        what: &'static str,
        value: u8,
        max: u8,
    },

    #[error("{what} index {index} out of range 0..={max}")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        max: usize,
    },

    #[error("unknown pose {0:?}")]
    UnknownPose(String),

    #[error("unrecognized LED color {0:?} (expected 0-7 or a color name)")]
    UnknownColor(String),
}

/// Convenience result alias for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_sizes() {
        assert_eq!(PAYLOAD_LEN, 18);
        assert_eq!(PACKET_LEN, 20);
    }

    #[test]
    fn test_errors_render_their_context() -> Result<(), Box<dyn std::error::Error>> {
        let err = ProtocolError::InvalidLength {
            what: "servo positions",
            expected: 8,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "servo positions must be exactly 8 bytes, got 3"
        );

        let err = ProtocolError::UnknownPose("Moonwalk".to_string());
        assert_eq!(err.to_string(), "unknown pose \"Moonwalk\"");
        Ok(())
    }
}
