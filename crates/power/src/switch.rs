//! The switch client itself: two service calls and a power-cycle sequence.

#![deny(static_mut_refs)]

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::{PowerConfig, PowerError, PowerResult};

/// Per-request timeout for service calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Settle time after each leg of a power cycle. The robot takes several
/// seconds to boot and the plug relay needs to fully drop the supply, so a
/// cycle waits this long after the off leg and again after the on leg.
pub const POWER_CYCLE_SETTLE: Duration = Duration::from_secs(20);

/// Desired state of the robot's supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    On,
    Off,
}

impl PowerState {
    /// The suffix Home Assistant uses in its service names.
    pub const fn as_str(self) -> &'static str {
        match self {
            PowerState::On => "on",
            PowerState::Off => "off",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = PowerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on" => Ok(PowerState::On),
            "off" => Ok(PowerState::Off),
            _ => Err(PowerError::UnknownState(s.to_string())),
        }
    }
}

/// Body of a `switch` domain service call.
#[derive(Serialize)]
struct ServiceCall<'a> {
    entity_id: &'a str,
}

/// Client for the Home Assistant switch feeding the robot.
pub struct PowerSwitch {
    client: Client,
    config: PowerConfig,
}

impl PowerSwitch {
    /// Build the HTTP client for the given configuration.
    pub fn new(config: PowerConfig) -> PowerResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("openmeccanoid-power/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    /// Entity id of the switch this client drives.
    pub fn entity_id(&self) -> &str {
        &self.config.entity_id
    }

    /// Call `switch/turn_on` or `switch/turn_off` for the configured entity.
    pub async fn set_power(&self, state: PowerState) -> PowerResult<()> {
        let service = format!("turn_{state}");
        let url = format!("{}/api/services/switch/{service}", self.config.base_url);
        debug!("POST {url} for {}", self.config.entity_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.token)
            .json(&ServiceCall {
                entity_id: &self.config.entity_id,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PowerError::ServiceStatus { service, status });
        }

        info!("switched {} {state}", self.config.entity_id);
        Ok(())
    }

    /// Turn the supply on.
    pub async fn power_on(&self) -> PowerResult<()> {
        self.set_power(PowerState::On).await
    }

    /// Turn the supply off.
    pub async fn power_off(&self) -> PowerResult<()> {
        self.set_power(PowerState::Off).await
    }

    /// Cut the supply, wait, restore it, wait again. Afterwards the robot is
    /// booted, unpaired and ready for a fresh BLE connection.
    pub async fn power_cycle(&self) -> PowerResult<()> {
        info!("power cycling {}", self.config.entity_id);
        self.cycle_with_settle(POWER_CYCLE_SETTLE).await
    }

    async fn cycle_with_settle(&self, settle: Duration) -> PowerResult<()> {
        self.set_power(PowerState::Off).await?;
        tokio::time::sleep(settle).await;
        self.set_power(PowerState::On).await?;
        tokio::time::sleep(settle).await;
        Ok(())
    }
}
