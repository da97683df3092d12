//! The packet transport seam.
//!
//! The session never talks to a Bluetooth stack directly; it hands finished
//! 20-byte packets to whatever implements [`RobotTransport`]. The real
//! implementation lives in `openmeccanoid-ble`; tests use a recording double.

#![deny(static_mut_refs)]

use async_trait::async_trait;
use meccanoid_protocol::Packet;
use thiserror::Error;

/// Errors surfaced by a packet transport.
///
/// These are opaque to the session and the protocol core: a failed write is
/// reported as-is, never retried, never interpreted.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("no robot found: {reason}")]
    DeviceNotFound { reason: String },

    #[error("not connected")]
    NotConnected,

    #[error("characteristic {uuid} missing on the connected peripheral")]
    MissingCharacteristic { uuid: String },

    #[error("timed out while {operation}")]
    Timeout { operation: &'static str },

    #[error("write failed: {reason}")]
    WriteFailed { reason: String },

    #[error("bluetooth error: {reason}")]
    Bluetooth { reason: String },
}

/// Convenience result alias for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Fire-and-forget delivery of finished packets.
///
/// One write per encoded command; implementations must not buffer, reorder
/// or split packets. Partial-write semantics are the implementation's problem
/// and never leak past this trait.
#[async_trait]
pub trait RobotTransport: Send {
    /// Deliver one 20-byte packet to the robot.
    async fn write_packet(&mut self, packet: &Packet) -> TransportResult<()>;

    /// Tear the link down. Must be idempotent.
    async fn disconnect(&mut self) -> TransportResult<()>;
}
