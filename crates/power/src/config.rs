//! Environment-driven configuration for the Home Assistant client.

use crate::{PowerError, PowerResult};

/// Default Home Assistant base URL when `HA_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://homeassistant.local:8123";

/// Default switch entity when `ROBOT_SWITCH_ENTITY_ID` is not set.
pub const DEFAULT_ENTITY_ID: &str = "switch.robot_switch";

/// Environment variable naming the Home Assistant instance.
pub const HA_URL_VAR: &str = "HA_URL";

/// Environment variable holding the long-lived access token.
pub const HA_TOKEN_VAR: &str = "HA_TOKEN";

/// Environment variable naming the switch entity feeding the robot.
pub const ENTITY_ID_VAR: &str = "ROBOT_SWITCH_ENTITY_ID";

/// Where Home Assistant lives and which switch feeds the robot.
#[derive(Debug, Clone)]
pub struct PowerConfig {
    /// Base URL without a trailing slash, e.g. `http://homeassistant.local:8123`.
    pub base_url: String,
    /// Long-lived access token sent as a bearer credential.
    pub token: String,
    /// Entity id of the switch, e.g. `switch.robot_switch`.
    pub entity_id: String,
}

impl PowerConfig {
    /// Read `HA_URL`, `HA_TOKEN` and `ROBOT_SWITCH_ENTITY_ID` from the
    /// environment. Empty variables count as unset.
    pub fn from_env() -> PowerResult<Self> {
        Self::from_values(env_var(HA_URL_VAR), env_var(HA_TOKEN_VAR), env_var(ENTITY_ID_VAR))
    }

    /// Build a configuration from explicit values, applying the same defaults
    /// and validation as [`PowerConfig::from_env`].
    pub fn from_values(
        base_url: Option<String>,
        token: Option<String>,
        entity_id: Option<String>,
    ) -> PowerResult<Self> {
        let token = token.filter(|t| !t.is_empty()).ok_or(PowerError::MissingToken)?;
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            entity_id: entity_id.unwrap_or_else(|| DEFAULT_ENTITY_ID.to_string()),
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
