//! Home Assistant power switch commands.

use anyhow::{Context, Result};
use openmeccanoid_power::{PowerConfig, PowerSwitch};

use crate::commands::PowerAction;
use crate::output;

pub async fn execute(action: PowerAction) -> Result<()> {
    let config = PowerConfig::from_env().context("reading Home Assistant settings")?;
    let switch = PowerSwitch::new(config)?;

    match action {
        PowerAction::On => {
            switch.power_on().await?;
            output::print_success(&format!("{} is on", switch.entity_id()));
        }
        PowerAction::Off => {
            switch.power_off().await?;
            output::print_success(&format!("{} is off", switch.entity_id()));
        }
        PowerAction::Cycle => {
            println!("power cycling {} (about 40 s)...", switch.entity_id());
            switch.power_cycle().await?;
            output::print_success(&format!(
                "{} cycled, robot should be booted",
                switch.entity_id()
            ));
        }
    }
    Ok(())
}
