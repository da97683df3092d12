//! Mains power control for the robot through a Home Assistant switch.
//!
//! The G15KS has no remote power-on path of its own: once the firmware sleeps
//! the only way back is the physical switch. A smart plug driven through the
//! Home Assistant REST API stands in for a finger on that switch, which is
//! what makes long unattended sessions (and recovery from a wedged robot)
//! possible.
//!
//! The crate talks to exactly two service endpoints,
//! `/api/services/switch/turn_on` and `/api/services/switch/turn_off`,
//! authenticated with a long-lived access token.

use thiserror::Error;

pub mod config;
pub mod switch;

pub use config::{DEFAULT_BASE_URL, DEFAULT_ENTITY_ID, PowerConfig};
pub use switch::{POWER_CYCLE_SETTLE, PowerState, PowerSwitch, REQUEST_TIMEOUT};

/// Errors from configuration or from talking to Home Assistant.
#[derive(Debug, Error)]
pub enum PowerError {
    /// `HA_TOKEN` was absent or empty.
    #[error("HA_TOKEN is not set; a long-lived Home Assistant access token is required")]
    MissingToken,

    /// The HTTP request itself failed (connect, timeout, malformed URL).
    #[error("Home Assistant request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Home Assistant answered with a non-success status.
    #[error("Home Assistant returned {status} for {service}")]
    ServiceStatus {
        service: String,
        status: reqwest::StatusCode,
    },

    /// A power state string was neither `on` nor `off`.
    #[error("unknown power state {0:?}, expected \"on\" or \"off\"")]
    UnknownState(String),
}

/// Convenience alias for power-control results.
pub type PowerResult<T> = Result<T, PowerError>;
