//! Virtual Meccanoid link for integration and e2e testing.
//!
//! `VirtualRobot` implements `RobotTransport` so session and protocol code
//! can be tested without a charged robot or a Bluetooth adapter. It records
//! every packet written to it in order and supports failure simulation.

#![deny(static_mut_refs)]

use std::collections::VecDeque;

use async_trait::async_trait;
use meccanoid_protocol::Packet;
use openmeccanoid_session::{
    RobotSession, RobotTransport, SessionResult, TransportError, TransportResult,
};

/// Maximum packet history retained by the virtual robot.
pub const MAX_PACKET_HISTORY: usize = 64;

/// A software stand-in for the robot's BLE link used in integration tests.
///
/// Records all packets written to it so tests can assert on the exact
/// wire bytes sent.
pub struct VirtualRobot {
    packets: VecDeque<Vec<u8>>,
    fail_writes: bool,
    disconnects: usize,
}

impl VirtualRobot {
    pub fn new() -> Self {
        Self {
            packets: VecDeque::new(),
            fail_writes: false,
            disconnects: 0,
        }
    }

    /// Create a link that fails all write operations (simulates a dropped
    /// connection).
    pub fn new_failing() -> Self {
        let mut robot = Self::new();
        robot.fail_writes = true;
        robot
    }

    /// All packets written since creation, in order.
    pub fn packets(&self) -> &VecDeque<Vec<u8>> {
        &self.packets
    }

    /// Last packet written, if any.
    pub fn last_packet(&self) -> Option<&Vec<u8>> {
        self.packets.back()
    }

    /// Command bytes of every recorded packet, in order.
    pub fn command_ids(&self) -> Vec<u8> {
        self.packets
            .iter()
            .filter_map(|p| p.first().copied())
            .collect()
    }

    /// True when `packets` contains a packet whose command byte matches
    /// `command_id`.
    pub fn sent_command(&self, command_id: u8) -> bool {
        self.packets
            .iter()
            .any(|p| p.first().copied() == Some(command_id))
    }

    /// Return packets whose command byte matches `command_id`.
    pub fn packets_with_command(&self, command_id: u8) -> Vec<&Vec<u8>> {
        self.packets
            .iter()
            .filter(|p| p.first().copied() == Some(command_id))
            .collect()
    }

    /// Number of times the link was torn down.
    pub fn disconnect_count(&self) -> usize {
        self.disconnects
    }

    /// Clear all recorded packets (useful for testing re-sends).
    pub fn clear_records(&mut self) {
        self.packets.clear();
    }
}

impl Default for VirtualRobot {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RobotTransport for VirtualRobot {
    async fn write_packet(&mut self, packet: &Packet) -> TransportResult<()> {
        if self.fail_writes {
            return Err(TransportError::WriteFailed {
                reason: "VirtualRobot: simulated write failure".to_string(),
            });
        }
        if self.packets.len() >= MAX_PACKET_HISTORY {
            self.packets.pop_front();
        }
        self.packets.push_back(packet.as_bytes().to_vec());
        Ok(())
    }

    async fn disconnect(&mut self) -> TransportResult<()> {
        self.disconnects += 1;
        Ok(())
    }
}

/// Helpers for BDD-style scenario setup.
pub struct RobotScenario {
    pub session: RobotSession<VirtualRobot>,
}

impl RobotScenario {
    /// Create a scenario around a healthy virtual link.
    pub fn robot() -> Self {
        Self {
            session: RobotSession::new(VirtualRobot::new()),
        }
    }

    /// Create a scenario with a failing link (simulates I/O errors).
    pub fn robot_failing() -> Self {
        Self {
            session: RobotSession::new(VirtualRobot::new_failing()),
        }
    }

    /// Run the session's wake sequence.
    pub async fn initialize(&mut self) -> SessionResult<()> {
        self.session.initialize().await
    }

    /// The recording side of the link.
    pub fn link(&self) -> &VirtualRobot {
        self.session.transport()
    }
}
