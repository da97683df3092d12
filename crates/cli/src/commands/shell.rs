//! Interactive shell keeping one robot session open.
//!
//! One-shot commands pay the scan-and-connect cost every time; the shell
//! pays it once and then reads commands from stdin until `exit`. Command
//! errors are printed and the loop keeps going, so a typo does not cost
//! the connection.

use std::io::Write as _;

use anyhow::{Result, anyhow, bail};
use meccanoid_protocol::{ArmJoint, LedColor, POSES};
use openmeccanoid_ble::BleTransport;
use openmeccanoid_power::{PowerConfig, PowerSwitch};
use openmeccanoid_session::RobotSession;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::robot::{close_session, open_session};
use crate::output;

const HELP: &str = "\
Commands:
  pose [name]            drive the arms to a catalog pose; no name lists them
  eye <r> <g> <b>        set the eye color, channels 0-7
  servo <joint> <pos>    move one joint (l-shoulder, l-elbow, r-shoulder, r-elbow)
  led <slot> <color> [mode]
                         set a servo LED; color is 0-7 or a name
  chest <index> on|off   switch one chest segment
  power on|off|cycle     drive the Home Assistant switch
  state                  show what the robot was last told
  help                   this text
  exit                   disconnect and leave
";

enum Outcome {
    Continue,
    Exit,
}

pub async fn execute(address: Option<&str>) -> Result<()> {
    let mut session = open_session(address).await?;
    let mut power: Option<PowerSwitch> = None;
    println!("connected; type 'help' for commands, 'exit' to leave");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("robot> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // stdin closed
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match run_line(&mut session, &mut power, line).await {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Exit) => break,
            Err(e) => output::print_error(&e),
        }
    }

    close_session(&mut session).await;
    Ok(())
}

async fn run_line(
    session: &mut RobotSession<BleTransport>,
    power: &mut Option<PowerSwitch>,
    line: &str,
) -> Result<Outcome> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        ["help"] => print!("{HELP}"),
        ["exit"] | ["quit"] => return Ok(Outcome::Exit),
        ["state"] => output::print_state(session.state()),
        ["pose"] => {
            for pose in &POSES {
                println!("  {}", pose.name);
            }
        }
        ["pose", name] => {
            session.execute_pose(name).await?;
            println!("posed as {name}");
        }
        ["eye", r, g, b] => {
            let red = parse_byte("red", r)?;
            let green = parse_byte("green", g)?;
            let blue = parse_byte("blue", b)?;
            session.set_eye_color(red, green, blue).await?;
        }
        ["servo", joint, position] => {
            let joint = parse_joint(joint)?;
            let position = parse_byte("position", position)?;
            session
                .set_servo_position(joint.physical_slot(), position)
                .await?;
        }
        ["led", slot, color] => set_led(session, slot, color, None).await?,
        ["led", slot, color, mode] => {
            let mode = parse_byte("mode", mode)?;
            set_led(session, slot, color, Some(mode)).await?;
        }
        ["chest", index, state] => {
            let index = parse_byte("chest index", index)?;
            let on = match *state {
                "on" => true,
                "off" => false,
                other => bail!("chest wants on or off, not {other:?}"),
            };
            session.set_chest_led(usize::from(index), on).await?;
        }
        ["power", action] => power_action(power, action).await?,
        _ => println!("unrecognized command; try 'help'"),
    }
    Ok(Outcome::Continue)
}

async fn set_led(
    session: &mut RobotSession<BleTransport>,
    slot: &str,
    color: &str,
    mode: Option<u8>,
) -> Result<()> {
    let slot = parse_byte("LED slot", slot)?;
    let color: LedColor = color.parse()?;
    session
        .set_servo_led_color(usize::from(slot), color.code(), mode)
        .await?;
    Ok(())
}

async fn power_action(power: &mut Option<PowerSwitch>, action: &str) -> Result<()> {
    // Built lazily: the shell stays usable without HA_TOKEN until the
    // first power command.
    let switch = match power {
        Some(switch) => switch,
        None => {
            let config = PowerConfig::from_env()?;
            power.insert(PowerSwitch::new(config)?)
        }
    };

    match action {
        "on" => switch.power_on().await?,
        "off" => switch.power_off().await?,
        "cycle" => {
            println!("power cycling {} (about 40 s)...", switch.entity_id());
            switch.power_cycle().await?;
            println!("note: the BLE session is gone; restart the shell to reconnect");
        }
        other => bail!("power wants on, off or cycle, not {other:?}"),
    }
    Ok(())
}

fn parse_joint(token: &str) -> Result<ArmJoint> {
    match token.to_ascii_lowercase().as_str() {
        "l-shoulder" | "lshoulder" => Ok(ArmJoint::LeftShoulder),
        "l-elbow" | "lelbow" => Ok(ArmJoint::LeftElbow),
        "r-shoulder" | "rshoulder" => Ok(ArmJoint::RightShoulder),
        "r-elbow" | "relbow" => Ok(ArmJoint::RightElbow),
        _ => bail!(
            "unknown joint {token:?}; expected l-shoulder, l-elbow, r-shoulder or r-elbow"
        ),
    }
}

fn parse_byte(what: &str, token: &str) -> Result<u8> {
    token
        .parse::<u8>()
        .map_err(|_| anyhow!("{what} wants a number 0-255, not {token:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joint_names_accept_both_spellings() -> Result<()> {
        assert_eq!(parse_joint("l-shoulder")?, ArmJoint::LeftShoulder);
        assert_eq!(parse_joint("LShoulder")?, ArmJoint::LeftShoulder);
        assert_eq!(parse_joint("r-elbow")?, ArmJoint::RightElbow);
        assert!(parse_joint("knee").is_err());
        Ok(())
    }

    #[test]
    fn byte_parsing_reports_the_offending_field() {
        let err = parse_byte("position", "banana").map(|_| ()).err();
        let message = err.map(|e| e.to_string()).unwrap_or_default();
        assert!(message.contains("position"), "got {message:?}");
        assert!(message.contains("banana"), "got {message:?}");
    }
}
