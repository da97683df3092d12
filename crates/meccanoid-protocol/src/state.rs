//! Robot command state and the operations that re-encode it.
//!
//! Every "set" command on the wire re-transmits a whole group (all 8 servos,
//! all 8 servo LEDs, all 4 chest statuses), so the encoder has to remember
//! what it last sent or a single-servo move would recenter the other seven.
//! [`RobotState`] is that memory: one instance per connected session, mutated
//! in place, discarded on disconnect.
//!
//! Operations validate before mutating; an error leaves the state exactly as
//! it was and produces no packet. State is updated optimistically at encode
//! time, whether or not the transport later delivers the packet.

#![deny(static_mut_refs)]

use tracing::debug;

use crate::joints::apply_polarity;
use crate::packet::{
    build_chest_led_payload, build_eye_chest_payload, build_handshake_payload,
    build_servo_led_payload, build_servo_payload, CHEST_LED_COUNT, SERVO_COUNT,
};
use crate::poses;
use crate::{Packet, ProtocolError, ProtocolResult};

/// Mode byte the vendor app sends for servo LEDs when setting colors.
pub const DEFAULT_SERVO_LED_MODE: u8 = 0x04;
/// Foot-LED byte the vendor app sends at startup.
pub const DEFAULT_FOOT_LEDS: u8 = 0x01;
/// Eye channels and servo LED colors are 3-bit values.
pub const LED_CHANNEL_MAX: u8 = 0x07;

/// Last-sent output state for one robot session.
///
/// "Last sent" means last attempted: a transport failure does not roll this
/// back, it only means the robot may lag what we believe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotState {
    servo_positions: [u8; SERVO_COUNT],
    servo_led_modes: [u8; SERVO_COUNT],
    servo_led_colors: [u8; SERVO_COUNT],
    foot_leds: u8,
    chest_leds: [u8; CHEST_LED_COUNT],
    eye_rgb: (u8, u8, u8),
}

impl RobotState {
    /// Power-on defaults: servos centered, LED mode 0x04, everything dark.
    pub fn new() -> Self {
        Self {
            servo_positions: [crate::joints::SERVO_CENTER; SERVO_COUNT],
            servo_led_modes: [DEFAULT_SERVO_LED_MODE; SERVO_COUNT],
            servo_led_colors: [0x00; SERVO_COUNT],
            foot_leds: DEFAULT_FOOT_LEDS,
            chest_leds: [0x00; CHEST_LED_COUNT],
            eye_rgb: (0, 0, 0),
        }
    }

    /// Move one servo, applying polarity for mirrored slots.
    ///
    /// The stored position is the wire byte (post-polarity), so re-encodes of
    /// the group never flip it a second time.
    pub fn set_servo_position(&mut self, index: usize, position: u8) -> ProtocolResult<Packet> {
        self.check_servo_index(index)?;
        let effective = apply_polarity(index, position);
        debug!(
            "servo {} requested {:#04X} -> wire {:#04X}",
            index, position, effective
        );
        self.servo_positions[index] = effective;
        Ok(self.servo_packet())
    }

    /// Bulk overwrite of the servo group.
    ///
    /// Positions are taken as physically-effective bytes; no polarity is
    /// applied. Omitted optionals keep their previous values.
    pub fn set_all_servos_raw(
        &mut self,
        positions: &[u8],
        led_modes: Option<&[u8]>,
        foot_leds: Option<u8>,
    ) -> ProtocolResult<Packet> {
        let positions = fixed_group(positions, "servo positions")?;
        let led_modes = led_modes
            .map(|m| fixed_group(m, "servo LED modes"))
            .transpose()?;

        self.servo_positions = positions;
        if let Some(modes) = led_modes {
            self.servo_led_modes = modes;
        }
        if let Some(foot) = foot_leds {
            self.foot_leds = foot;
        }
        Ok(self.servo_packet())
    }

    /// Set the eye RGB (3-bit channels) and re-assert chest statuses.
    pub fn set_eye_color(&mut self, r: u8, g: u8, b: u8) -> ProtocolResult<Packet> {
        for (what, value) in [("eye red", r), ("eye green", g), ("eye blue", b)] {
            check_led_channel(what, value)?;
        }
        self.eye_rgb = (r, g, b);
        Ok(Packet::from_payload(build_eye_chest_payload(
            self.eye_rgb,
            &self.chest_leds,
        )))
    }

    /// Set one servo LED's color (and optionally its mode), re-encoding the
    /// whole LED group.
    pub fn set_servo_led_color(
        &mut self,
        index: usize,
        color: u8,
        mode: Option<u8>,
    ) -> ProtocolResult<Packet> {
        self.check_servo_index(index)?;
        check_led_channel("servo LED color", color)?;
        self.servo_led_colors[index] = color;
        if let Some(mode) = mode {
            self.servo_led_modes[index] = mode;
        }
        Ok(self.servo_led_packet(0x00))
    }

    /// Bulk overwrite of the servo LED group.
    pub fn set_all_servo_leds_raw(
        &mut self,
        colors: &[u8],
        led_modes: Option<&[u8]>,
        trailer: u8,
    ) -> ProtocolResult<Packet> {
        let colors = fixed_group(colors, "servo LED colors")?;
        for &color in &colors {
            check_led_channel("servo LED color", color)?;
        }
        let led_modes = led_modes
            .map(|m| fixed_group(m, "servo LED modes"))
            .transpose()?;

        self.servo_led_colors = colors;
        if let Some(modes) = led_modes {
            self.servo_led_modes = modes;
        }
        Ok(self.servo_led_packet(trailer))
    }

    /// Switch one chest LED on or off via the standalone 0x1C command.
    ///
    /// Eye state is untouched; the next eye-color packet will carry the
    /// updated statuses too, so the two encodings cannot diverge.
    pub fn set_chest_led(&mut self, index: usize, on: bool) -> ProtocolResult<Packet> {
        if index >= CHEST_LED_COUNT {
            return Err(ProtocolError::IndexOutOfRange {
                what: "chest LED",
                index,
                max: CHEST_LED_COUNT - 1,
            });
        }
        self.chest_leds[index] = u8::from(on);
        Ok(Packet::from_payload(build_chest_led_payload(
            &self.chest_leds,
        )))
    }

    /// The fixed wake packet. Carries no state and mutates none.
    pub fn handshake(&self) -> Packet {
        Packet::from_payload(build_handshake_payload())
    }

    /// Execute a catalog pose by expanding it onto the full servo group.
    ///
    /// Pose values are already effective bytes, so this goes through the raw
    /// bulk path with the current LED state preserved.
    pub fn execute_pose(&mut self, name: &str) -> ProtocolResult<Packet> {
        let pose = poses::lookup(name).ok_or_else(|| ProtocolError::UnknownPose(name.to_string()))?;
        let frame = pose.servo_frame();
        debug!("executing pose {:?}: frame {:02X?}", name, frame);
        self.set_all_servos_raw(&frame, None, None)
    }

    pub fn servo_positions(&self) -> &[u8; SERVO_COUNT] {
        &self.servo_positions
    }

    pub fn servo_led_modes(&self) -> &[u8; SERVO_COUNT] {
        &self.servo_led_modes
    }

    pub fn servo_led_colors(&self) -> &[u8; SERVO_COUNT] {
        &self.servo_led_colors
    }

    pub fn foot_leds(&self) -> u8 {
        self.foot_leds
    }

    pub fn chest_led_status(&self) -> &[u8; CHEST_LED_COUNT] {
        &self.chest_leds
    }

    pub fn eye_rgb(&self) -> (u8, u8, u8) {
        self.eye_rgb
    }

    fn servo_packet(&self) -> Packet {
        Packet::from_payload(build_servo_payload(
            &self.servo_positions,
            &self.servo_led_modes,
            self.foot_leds,
        ))
    }

    fn servo_led_packet(&self, trailer: u8) -> Packet {
        Packet::from_payload(build_servo_led_payload(
            &self.servo_led_colors,
            &self.servo_led_modes,
            trailer,
        ))
    }

    fn check_servo_index(&self, index: usize) -> ProtocolResult<()> {
        if index >= SERVO_COUNT {
            return Err(ProtocolError::IndexOutOfRange {
                what: "servo",
                index,
                max: SERVO_COUNT - 1,
            });
        }
        Ok(())
    }
}

impl Default for RobotState {
    fn default() -> Self {
        Self::new()
    }
}

fn fixed_group(values: &[u8], what: &'static str) -> ProtocolResult<[u8; SERVO_COUNT]> {
    values.try_into().map_err(|_| ProtocolError::InvalidLength {
        what,
        expected: SERVO_COUNT,
        actual: values.len(),
    })
}

fn check_led_channel(what: &'static str, value: u8) -> ProtocolResult<()> {
    if value > LED_CHANNEL_MAX {
        return Err(ProtocolError::ValueOutOfRange {
            what,
            value,
            max: LED_CHANNEL_MAX,
        });
    }
    Ok(())
}
