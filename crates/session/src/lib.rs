//! Session layer for the Meccanoid stack
//!
//! Sits between the I/O-free protocol core (`meccanoid-protocol`) and a
//! concrete transport (`openmeccanoid-ble`, or a test double). Owns exactly
//! one [`RobotState`](meccanoid_protocol::RobotState) per connection and
//! serializes every command into a single encode-then-write step.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod session;
pub mod transport;

pub use session::{RobotSession, HANDSHAKE_SETTLE};
pub use transport::{RobotTransport, TransportError, TransportResult};

use meccanoid_protocol::ProtocolError;
use thiserror::Error;

/// Errors returned by session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The command was rejected before any I/O; state is untouched.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The transport failed after state was already updated optimistically.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Convenience result alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_sources_stay_distinguishable() -> Result<(), Box<dyn std::error::Error>> {
        let protocol: SessionError = ProtocolError::UnknownPose("X".to_string()).into();
        assert!(matches!(protocol, SessionError::Protocol(_)));

        let transport: SessionError = TransportError::NotConnected.into();
        assert!(matches!(transport, SessionError::Transport(_)));
        Ok(())
    }
}
