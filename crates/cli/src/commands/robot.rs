//! One-shot robot commands: connect, act, disconnect.

use anyhow::Result;
use colored::Colorize;
use meccanoid_protocol::{ArmJoint, LedColor, POSES};
use openmeccanoid_ble::{BleConnectOptions, BleTransport};
use openmeccanoid_session::RobotSession;
use tracing::warn;

use crate::commands::{JointArg, SegmentState};
use crate::output;

/// Connect (by address or by name scan), wake the robot, and hand back the
/// running session.
pub async fn open_session(address: Option<&str>) -> Result<RobotSession<BleTransport>> {
    let options = match address {
        Some(addr) => BleConnectOptions::with_address(addr),
        None => BleConnectOptions::default(),
    };
    let transport = BleTransport::connect(&options).await?;
    let mut session = RobotSession::new(transport);
    session.initialize().await?;
    Ok(session)
}

/// Disconnect, demoting failures to a warning so the command's own outcome
/// stays visible.
pub async fn close_session(session: &mut RobotSession<BleTransport>) {
    if let Err(e) = session.disconnect().await {
        warn!("disconnect failed: {e}");
    }
}

pub async fn handshake(address: Option<&str>) -> Result<()> {
    let mut session = open_session(address).await?;
    close_session(&mut session).await;
    output::print_success("handshake sent, robot is awake");
    Ok(())
}

pub async fn pose(address: Option<&str>, name: &str) -> Result<()> {
    let mut session = open_session(address).await?;
    let outcome = session.execute_pose(name).await;
    close_session(&mut session).await;
    outcome?;
    output::print_success(&format!("robot posed as {name}"));
    Ok(())
}

/// Print the catalog without touching the radio.
pub fn list_poses() {
    println!("{}", "Built-in poses:".bold());
    for pose in &POSES {
        let joints = ArmJoint::ALL
            .iter()
            .zip(pose.joints.iter())
            .map(|(joint, value)| format!("{} {value}", joint.name()))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {} ({joints})", pose.name.cyan());
    }
}

pub async fn eye(address: Option<&str>, red: u8, green: u8, blue: u8) -> Result<()> {
    let mut session = open_session(address).await?;
    let outcome = session.set_eye_color(red, green, blue).await;
    close_session(&mut session).await;
    outcome?;
    output::print_success(&format!("eyes set to ({red}, {green}, {blue})"));
    Ok(())
}

pub async fn servo(address: Option<&str>, joint: JointArg, position: u8) -> Result<()> {
    let joint = joint.joint();
    let mut session = open_session(address).await?;
    let outcome = session
        .set_servo_position(joint.physical_slot(), position)
        .await;
    close_session(&mut session).await;
    outcome?;
    output::print_success(&format!("{} moved to {position}", joint.name()));
    Ok(())
}

pub async fn servo_led(
    address: Option<&str>,
    index: u8,
    color: &str,
    mode: Option<u8>,
) -> Result<()> {
    // Parse the color before spending twenty seconds connecting.
    let color: LedColor = color.parse()?;
    let mut session = open_session(address).await?;
    let outcome = session
        .set_servo_led_color(usize::from(index), color.code(), mode)
        .await;
    close_session(&mut session).await;
    outcome?;
    output::print_success(&format!("servo {index} LED set to {color}"));
    Ok(())
}

pub async fn chest(address: Option<&str>, index: u8, state: SegmentState) -> Result<()> {
    let mut session = open_session(address).await?;
    let outcome = session.set_chest_led(usize::from(index), state.is_on()).await;
    close_session(&mut session).await;
    outcome?;
    let verb = if state.is_on() { "on" } else { "off" };
    output::print_success(&format!("chest segment {index} {verb}"));
    Ok(())
}
