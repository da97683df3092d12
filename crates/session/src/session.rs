//! One connect-to-disconnect robot session.
//!
//! [`RobotSession`] owns the command state and a transport. Every operation
//! is a single encode-then-write step: validation errors return before any
//! I/O, and a transport failure surfaces after the state was already updated
//! optimistically (state tracks "last attempted", not "last confirmed").
//!
//! Commands must stay serialized; `&mut self` on every operation makes
//! interleaved group rewrites unrepresentable within one session.

#![deny(static_mut_refs)]

use std::time::Duration;

use meccanoid_protocol::{Packet, RobotState};
use tracing::{debug, info};

use crate::transport::RobotTransport;
use crate::SessionResult;

/// How long the firmware needs to chew on the wake command before it starts
/// honoring motion commands.
pub const HANDSHAKE_SETTLE: Duration = Duration::from_secs(1);

/// A live robot session: command state plus the transport carrying it.
pub struct RobotSession<T> {
    state: RobotState,
    transport: T,
}

impl<T: RobotTransport> RobotSession<T> {
    /// Start a session over an already-connected transport.
    pub fn new(transport: T) -> Self {
        Self {
            state: RobotState::new(),
            transport,
        }
    }

    /// Wake the robot and give the firmware time to settle.
    pub async fn initialize(&mut self) -> SessionResult<()> {
        self.handshake().await?;
        tokio::time::sleep(HANDSHAKE_SETTLE).await;
        info!("robot session initialized");
        Ok(())
    }

    /// Send the wake command on its own.
    pub async fn handshake(&mut self) -> SessionResult<()> {
        let packet = self.state.handshake();
        self.send(&packet).await
    }

    /// Move one servo; polarity for mirrored slots is applied by the core.
    pub async fn set_servo_position(&mut self, index: usize, position: u8) -> SessionResult<()> {
        let packet = self.state.set_servo_position(index, position)?;
        self.send(&packet).await
    }

    /// Bulk servo overwrite with physically-effective bytes.
    pub async fn set_all_servos_raw(
        &mut self,
        positions: &[u8],
        led_modes: Option<&[u8]>,
        foot_leds: Option<u8>,
    ) -> SessionResult<()> {
        let packet = self.state.set_all_servos_raw(positions, led_modes, foot_leds)?;
        self.send(&packet).await
    }

    /// Set the eye RGB (each channel 0-7).
    pub async fn set_eye_color(&mut self, r: u8, g: u8, b: u8) -> SessionResult<()> {
        let packet = self.state.set_eye_color(r, g, b)?;
        self.send(&packet).await
    }

    /// Set one servo LED's color code (and optionally its mode).
    pub async fn set_servo_led_color(
        &mut self,
        index: usize,
        color: u8,
        mode: Option<u8>,
    ) -> SessionResult<()> {
        let packet = self.state.set_servo_led_color(index, color, mode)?;
        self.send(&packet).await
    }

    /// Bulk servo LED overwrite.
    pub async fn set_all_servo_leds_raw(
        &mut self,
        colors: &[u8],
        led_modes: Option<&[u8]>,
        trailer: u8,
    ) -> SessionResult<()> {
        let packet = self.state.set_all_servo_leds_raw(colors, led_modes, trailer)?;
        self.send(&packet).await
    }

    /// Switch one chest LED on or off.
    pub async fn set_chest_led(&mut self, index: usize, on: bool) -> SessionResult<()> {
        let packet = self.state.set_chest_led(index, on)?;
        self.send(&packet).await
    }

    /// Execute a catalog pose.
    pub async fn execute_pose(&mut self, name: &str) -> SessionResult<()> {
        let packet = self.state.execute_pose(name)?;
        self.send(&packet).await
    }

    /// The believed output state (last attempted, not last confirmed).
    pub fn state(&self) -> &RobotState {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Tear the transport down. The session's state is dead after this.
    pub async fn disconnect(&mut self) -> SessionResult<()> {
        self.transport.disconnect().await?;
        info!("robot session closed");
        Ok(())
    }

    async fn send(&mut self, packet: &Packet) -> SessionResult<()> {
        debug!("sending packet {}", packet.to_hex());
        self.transport.write_packet(packet).await?;
        Ok(())
    }
}
