//! Scanning and robot identification.

#![deny(static_mut_refs)]

use std::time::Duration;

use btleplug::api::{Central, Manager as _, Peripheral as _, ScanFilter};
use btleplug::platform::{Adapter, Manager, Peripheral};
use openmeccanoid_session::{TransportError, TransportResult};
use tracing::{debug, info};

use crate::{ble_err, MECCANOID_NAME_PREFIX};

/// How often the scan loop re-checks discovered peripherals.
const SCAN_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// One advertisement seen during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPeripheral {
    pub address: String,
    pub local_name: Option<String>,
    pub rssi: Option<i16>,
}

impl DiscoveredPeripheral {
    /// Whether the advertised name carries the robot prefix.
    pub fn is_robot(&self) -> bool {
        matches_target(self.local_name.as_deref(), &self.address, None)
    }
}

/// List everything advertising nearby for `duration`.
///
/// Purely observational; nothing is connected to.
pub async fn scan(duration: Duration) -> TransportResult<Vec<DiscoveredPeripheral>> {
    let adapter = default_adapter().await?;
    adapter
        .start_scan(ScanFilter::default())
        .await
        .map_err(ble_err)?;
    tokio::time::sleep(duration).await;

    let mut found = Vec::new();
    for peripheral in adapter.peripherals().await.map_err(ble_err)? {
        found.push(describe(&peripheral).await);
    }
    adapter.stop_scan().await.map_err(ble_err)?;
    info!("scan finished: {} peripheral(s)", found.len());
    Ok(found)
}

/// Find the robot: by address when one was given, otherwise the first
/// peripheral advertising the `MECCANOID` prefix.
pub(crate) async fn find_robot(
    adapter: &Adapter,
    target_address: Option<&str>,
    scan_timeout: Duration,
) -> TransportResult<Peripheral> {
    adapter
        .start_scan(ScanFilter::default())
        .await
        .map_err(ble_err)?;

    let deadline = tokio::time::Instant::now() + scan_timeout;
    loop {
        for peripheral in adapter.peripherals().await.map_err(ble_err)? {
            let address = peripheral.address().to_string();
            let name = local_name(&peripheral).await;
            if matches_target(name.as_deref(), &address, target_address) {
                adapter.stop_scan().await.map_err(ble_err)?;
                debug!("matched robot {:?} at {}", name, address);
                return Ok(peripheral);
            }
        }
        if tokio::time::Instant::now() >= deadline {
            break;
        }
        tokio::time::sleep(SCAN_POLL_INTERVAL).await;
    }

    adapter.stop_scan().await.map_err(ble_err)?;
    Err(TransportError::DeviceNotFound {
        reason: match target_address {
            Some(addr) => format!("no peripheral at {addr} seen within {scan_timeout:?}"),
            None => format!(
                "no advertisement with the {MECCANOID_NAME_PREFIX} prefix seen within {scan_timeout:?}"
            ),
        },
    })
}

/// Address match wins when a target was given; otherwise match on the
/// advertised name prefix.
fn matches_target(name: Option<&str>, address: &str, target_address: Option<&str>) -> bool {
    match target_address {
        Some(target) => address.eq_ignore_ascii_case(target),
        None => name.is_some_and(|n| n.starts_with(MECCANOID_NAME_PREFIX)),
    }
}

pub(crate) async fn default_adapter() -> TransportResult<Adapter> {
    let manager = Manager::new().await.map_err(ble_err)?;
    let adapters = manager.adapters().await.map_err(ble_err)?;
    adapters
        .into_iter()
        .next()
        .ok_or_else(|| TransportError::Bluetooth {
            reason: "no bluetooth adapter present".to_string(),
        })
}

async fn describe(peripheral: &Peripheral) -> DiscoveredPeripheral {
    let address = peripheral.address().to_string();
    match peripheral.properties().await {
        Ok(Some(props)) => DiscoveredPeripheral {
            address,
            local_name: props.local_name,
            rssi: props.rssi,
        },
        _ => DiscoveredPeripheral {
            address,
            local_name: None,
            rssi: None,
        },
    }
}

async fn local_name(peripheral: &Peripheral) -> Option<String> {
    peripheral
        .properties()
        .await
        .ok()
        .flatten()
        .and_then(|props| props.local_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_match_is_case_insensitive() -> Result<(), Box<dyn std::error::Error>> {
        assert!(matches_target(
            None,
            "5C:F8:21:EF:ED:D1",
            Some("5c:f8:21:ef:ed:d1")
        ));
        assert!(!matches_target(
            Some("MECCANOID 12345"),
            "AA:BB:CC:DD:EE:FF",
            Some("5C:F8:21:EF:ED:D1")
        ));
        Ok(())
    }

    #[test]
    fn test_name_prefix_match_without_target() -> Result<(), Box<dyn std::error::Error>> {
        assert!(matches_target(Some("MECCANOID 83afe2"), "AA:BB", None));
        assert!(!matches_target(Some("meccanoid 83afe2"), "AA:BB", None));
        assert!(!matches_target(Some("SomeOtherToy"), "AA:BB", None));
        assert!(!matches_target(None, "AA:BB", None));
        Ok(())
    }

    #[test]
    fn test_discovered_peripheral_flags_robots() -> Result<(), Box<dyn std::error::Error>> {
        let robot = DiscoveredPeripheral {
            address: "AA:BB:CC:DD:EE:FF".to_string(),
            local_name: Some("MECCANOID G15KS".to_string()),
            rssi: Some(-60),
        };
        assert!(robot.is_robot());

        let other = DiscoveredPeripheral {
            address: "11:22:33:44:55:66".to_string(),
            local_name: Some("Fitness Tracker".to_string()),
            rssi: None,
        };
        assert!(!other.is_robot());
        Ok(())
    }
}
