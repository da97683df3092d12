//! Bluetooth LE transport for the Meccanoid
//!
//! Implements the session layer's [`RobotTransport`] seam on top of
//! `btleplug`. The robot exposes one vendor service with a single writable
//! command characteristic; every command is a 20-byte write-without-response.
//!
//! Connection works two ways: by explicit peripheral address, or by scanning
//! for the first advertisement whose name carries the `MECCANOID` prefix.
//! No btleplug type leaks past this crate; everything maps into
//! [`TransportError`](openmeccanoid_session::TransportError).

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod discovery;
pub mod transport;

pub use discovery::{scan, DiscoveredPeripheral};
pub use transport::{BleConnectOptions, BleTransport};

use std::time::Duration;

use openmeccanoid_session::TransportError;
use uuid::Uuid;

/// Vendor service advertised by the robot.
pub const MECCANOID_SERVICE_UUID: Uuid = Uuid::from_u128(0x0000ffe5_0000_1000_8000_00805f9b34fb);

/// Writable command characteristic inside the vendor service.
pub const MECCANOID_COMMAND_CHAR_UUID: Uuid =
    Uuid::from_u128(0x0000ffe9_0000_1000_8000_00805f9b34fb);

/// Advertised device names start with this.
pub const MECCANOID_NAME_PREFIX: &str = "MECCANOID";

/// Default time spent collecting advertisements before giving up.
pub const DEFAULT_SCAN_TIMEOUT: Duration = Duration::from_secs(10);

/// Default overall deadline for scan + connect + service discovery.
pub const DEFAULT_CONNECT_DEADLINE: Duration = Duration::from_secs(20);

pub(crate) fn ble_err(e: btleplug::Error) -> TransportError {
    TransportError::Bluetooth {
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuids_render_in_gatt_form() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(
            MECCANOID_SERVICE_UUID.to_string(),
            "0000ffe5-0000-1000-8000-00805f9b34fb"
        );
        assert_eq!(
            MECCANOID_COMMAND_CHAR_UUID.to_string(),
            "0000ffe9-0000-1000-8000-00805f9b34fb"
        );
        Ok(())
    }
}
