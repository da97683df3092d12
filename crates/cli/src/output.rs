//! Terminal output helpers.

use anyhow::Error;
use colored::Colorize;
use meccanoid_protocol::{ProtocolError, RobotState};
use openmeccanoid_power::PowerError;
use openmeccanoid_session::{SessionError, TransportError};

/// Print an error and its chain.
pub fn print_error(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print a success line.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Render the session's view of the robot.
pub fn print_state(state: &RobotState) {
    println!("{}", "Last commanded state:".bold());
    println!("  Servos: {:02X?}", state.servo_positions());
    println!("  Servo LED colors: {:?}", state.servo_led_colors());
    println!("  Servo LED modes: {:02X?}", state.servo_led_modes());
    let (r, g, b) = state.eye_rgb();
    println!("  Eyes: ({r}, {g}, {b})");
    println!("  Chest: {:?}", state.chest_led_status());
    println!("  Foot LEDs: {:#04X}", state.foot_leds());
}

/// Exit codes: 2 for connection trouble, 3 for missing power credentials,
/// 4 for command values the protocol rejected, 1 for everything else.
pub fn exit_code(error: &Error) -> i32 {
    for cause in error.chain() {
        if let Some(transport) = cause.downcast_ref::<TransportError>() {
            return transport_exit_code(transport);
        }
        if let Some(session) = cause.downcast_ref::<SessionError>() {
            return match session {
                SessionError::Transport(transport) => transport_exit_code(transport),
                SessionError::Protocol(_) => 4,
            };
        }
        if let Some(power) = cause.downcast_ref::<PowerError>() {
            return match power {
                PowerError::MissingToken => 3,
                _ => 1,
            };
        }
        if cause.downcast_ref::<ProtocolError>().is_some() {
            return 4;
        }
    }
    1
}

fn transport_exit_code(error: &TransportError) -> i32 {
    match error {
        TransportError::DeviceNotFound { .. } | TransportError::Timeout { .. } => 2,
        _ => 1,
    }
}
