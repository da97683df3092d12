//! The connected transport: one peripheral, one writable characteristic.

#![deny(static_mut_refs)]

use std::time::Duration;

use async_trait::async_trait;
use btleplug::api::{Characteristic, Peripheral as _, WriteType};
use btleplug::platform::Peripheral;
use meccanoid_protocol::Packet;
use openmeccanoid_session::{RobotTransport, TransportError, TransportResult};
use tracing::{debug, info, warn};

use crate::discovery::{default_adapter, find_robot};
use crate::{ble_err, DEFAULT_CONNECT_DEADLINE, DEFAULT_SCAN_TIMEOUT, MECCANOID_COMMAND_CHAR_UUID};

/// How a connection attempt locates and bounds its work.
#[derive(Debug, Clone)]
pub struct BleConnectOptions {
    /// Explicit peripheral address; scan by name prefix when absent.
    pub address: Option<String>,
    /// Time budget for seeing the right advertisement.
    pub scan_timeout: Duration,
    /// Overall deadline covering scan, connect and service discovery.
    pub connect_deadline: Duration,
}

impl Default for BleConnectOptions {
    fn default() -> Self {
        Self {
            address: None,
            scan_timeout: DEFAULT_SCAN_TIMEOUT,
            connect_deadline: DEFAULT_CONNECT_DEADLINE,
        }
    }
}

impl BleConnectOptions {
    /// Connect to a specific peripheral address.
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Self::default()
        }
    }
}

/// A live BLE link to the robot's command characteristic.
pub struct BleTransport {
    peripheral: Peripheral,
    command_char: Characteristic,
    connected: bool,
}

impl BleTransport {
    /// Scan, connect and resolve the command characteristic.
    pub async fn connect(options: &BleConnectOptions) -> TransportResult<Self> {
        let peripheral = tokio::time::timeout(options.connect_deadline, async {
            let adapter = default_adapter().await?;
            let peripheral =
                find_robot(&adapter, options.address.as_deref(), options.scan_timeout).await?;
            peripheral.connect().await.map_err(ble_err)?;
            peripheral.discover_services().await.map_err(ble_err)?;
            Ok::<Peripheral, TransportError>(peripheral)
        })
        .await
        .map_err(|_| TransportError::Timeout {
            operation: "connecting to the robot",
        })??;

        let command_char = peripheral
            .characteristics()
            .into_iter()
            .find(|c| c.uuid == MECCANOID_COMMAND_CHAR_UUID)
            .ok_or_else(|| TransportError::MissingCharacteristic {
                uuid: MECCANOID_COMMAND_CHAR_UUID.to_string(),
            })?;

        info!("connected to robot at {}", peripheral.address());
        Ok(Self {
            peripheral,
            command_char,
            connected: true,
        })
    }

    /// Address of the connected peripheral.
    pub fn address(&self) -> String {
        self.peripheral.address().to_string()
    }
}

#[async_trait]
impl RobotTransport for BleTransport {
    async fn write_packet(&mut self, packet: &Packet) -> TransportResult<()> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        debug!("write-without-response {} bytes", packet.as_bytes().len());
        self.peripheral
            .write(
                &self.command_char,
                packet.as_bytes(),
                WriteType::WithoutResponse,
            )
            .await
            .map_err(|e| TransportError::WriteFailed {
                reason: e.to_string(),
            })
    }

    async fn disconnect(&mut self) -> TransportResult<()> {
        if !self.connected {
            return Ok(());
        }
        self.connected = false;
        match self.peripheral.disconnect().await {
            Ok(()) => {
                info!("disconnected from {}", self.peripheral.address());
                Ok(())
            }
            Err(e) => {
                warn!("disconnect failed: {e}");
                Err(ble_err(e))
            }
        }
    }
}
