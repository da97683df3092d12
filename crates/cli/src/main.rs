//! meccactl - Meccanoid G15KS control CLI
//!
//! Drives a Meccanoid G15KS toy robot over Bluetooth LE: poses, individual
//! servos, the LEDs, and the smart switch behind its power supply.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{JointArg, PowerAction, SegmentState};

#[derive(Parser)]
#[command(name = "meccactl")]
#[command(about = "Meccanoid G15KS control CLI - poses, servos, LEDs and power over BLE")]
#[command(version)]
#[command(long_about = "
meccactl drives a Meccanoid G15KS toy robot over Bluetooth LE.

Connection commands scan for a peripheral advertising the MECCANOID name
prefix unless --address (or MECCANOID_ADDRESS) pins a specific device.
Each invocation opens a fresh session, wakes the robot with a handshake,
does its work and disconnects; `meccactl shell` keeps one session open
for interactive use.

Power commands talk to Home Assistant instead of the robot and are
configured through HA_URL, HA_TOKEN and ROBOT_SWITCH_ENTITY_ID.
")]
struct Cli {
    /// BLE address of the robot (skips the name-prefix scan)
    #[arg(long, global = true, env = "MECCANOID_ADDRESS")]
    address: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan for nearby BLE peripherals
    Scan {
        /// Scan duration in seconds
        #[arg(short, long, default_value = "10")]
        timeout: u64,
    },

    /// Connect, wake the robot and disconnect again
    Handshake,

    /// Drive the arms to a named pose
    Pose {
        /// Pose name, e.g. T_Pose (see `meccactl poses`)
        name: String,
    },

    /// List the built-in pose catalog
    Poses,

    /// Set the eye color; each channel is 0-7
    Eye { red: u8, green: u8, blue: u8 },

    /// Move a single arm joint (0-255, 128 is centered)
    Servo {
        /// Joint to move
        #[arg(value_enum)]
        joint: JointArg,
        /// Target position byte
        position: u8,
    },

    /// Set one servo LED color
    ServoLed {
        /// Physical servo slot, 0-7
        index: u8,
        /// Color code 0-7 or a name (off, red, green, yellow, blue, magenta, cyan, white)
        color: String,
        /// Override the LED mode byte
        #[arg(long)]
        mode: Option<u8>,
    },

    /// Switch one chest LED segment
    Chest {
        /// Segment index, 0-3
        index: u8,
        /// Desired segment state
        #[arg(value_enum)]
        state: SegmentState,
    },

    /// Drive the Home Assistant switch feeding the robot
    Power {
        /// What to do with the supply
        #[arg(value_enum)]
        action: PowerAction,
    },

    /// Interactive shell holding one session open
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("meccactl={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match execute_command(&cli).await {
        Ok(()) => Ok(()),
        Err(e) => {
            output::print_error(&e);
            std::process::exit(output::exit_code(&e));
        }
    }
}

async fn execute_command(cli: &Cli) -> Result<()> {
    let address = cli.address.as_deref();
    match &cli.command {
        Commands::Scan { timeout } => commands::scan::execute(*timeout).await,
        Commands::Handshake => commands::robot::handshake(address).await,
        Commands::Pose { name } => commands::robot::pose(address, name).await,
        Commands::Poses => {
            commands::robot::list_poses();
            Ok(())
        }
        Commands::Eye { red, green, blue } => {
            commands::robot::eye(address, *red, *green, *blue).await
        }
        Commands::Servo { joint, position } => {
            commands::robot::servo(address, *joint, *position).await
        }
        Commands::ServoLed { index, color, mode } => {
            commands::robot::servo_led(address, *index, color, *mode).await
        }
        Commands::Chest { index, state } => commands::robot::chest(address, *index, *state).await,
        Commands::Power { action } => commands::power::execute(*action).await,
        Commands::Shell => commands::shell::execute(address).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    // --- Global flag parsing ---

    #[test]
    fn parse_handshake_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["meccactl", "handshake"])?;
        assert!(cli.address.is_none());
        assert_eq!(cli.verbose, 0);
        assert!(matches!(cli.command, Commands::Handshake));
        Ok(())
    }

    #[test]
    fn parse_address_before_subcommand() -> TestResult {
        let cli =
            Cli::try_parse_from(["meccactl", "--address", "AA:BB:CC:DD:EE:FF", "handshake"])?;
        assert_eq!(cli.address.as_deref(), Some("AA:BB:CC:DD:EE:FF"));
        Ok(())
    }

    #[test]
    fn parse_address_after_subcommand() -> TestResult {
        let cli =
            Cli::try_parse_from(["meccactl", "pose", "Neutral", "--address", "aa:bb:cc:dd:ee:ff"])?;
        assert_eq!(cli.address.as_deref(), Some("aa:bb:cc:dd:ee:ff"));
        Ok(())
    }

    #[test]
    fn parse_verbose_levels() -> TestResult {
        let cli0 = Cli::try_parse_from(["meccactl", "poses"])?;
        assert_eq!(cli0.verbose, 0);

        let cli1 = Cli::try_parse_from(["meccactl", "-v", "poses"])?;
        assert_eq!(cli1.verbose, 1);

        let cli2 = Cli::try_parse_from(["meccactl", "-vv", "poses"])?;
        assert_eq!(cli2.verbose, 2);
        Ok(())
    }

    // --- Subcommand parsing ---

    #[test]
    fn parse_scan_timeout() -> TestResult {
        let cli = Cli::try_parse_from(["meccactl", "scan"])?;
        assert!(matches!(cli.command, Commands::Scan { timeout: 10 }));

        let cli = Cli::try_parse_from(["meccactl", "scan", "--timeout", "3"])?;
        assert!(matches!(cli.command, Commands::Scan { timeout: 3 }));
        Ok(())
    }

    #[test]
    fn parse_pose_name() -> TestResult {
        let cli = Cli::try_parse_from(["meccactl", "pose", "T_Pose"])?;
        match &cli.command {
            Commands::Pose { name } => assert_eq!(name, "T_Pose"),
            _ => return Err("expected the pose command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_eye_channels() -> TestResult {
        let cli = Cli::try_parse_from(["meccactl", "eye", "7", "0", "3"])?;
        match &cli.command {
            Commands::Eye { red, green, blue } => {
                assert_eq!((*red, *green, *blue), (7, 0, 3));
            }
            _ => return Err("expected the eye command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_servo_all_joint_names() -> TestResult {
        for (arg, expected) in [
            ("l-shoulder", JointArg::LShoulder),
            ("l-elbow", JointArg::LElbow),
            ("r-shoulder", JointArg::RShoulder),
            ("r-elbow", JointArg::RElbow),
        ] {
            let cli = Cli::try_parse_from(["meccactl", "servo", arg, "128"])?;
            match &cli.command {
                Commands::Servo { joint, position } => {
                    assert_eq!(*joint, expected);
                    assert_eq!(*position, 128);
                }
                _ => return Err("expected the servo command".into()),
            }
        }
        Ok(())
    }

    #[test]
    fn parse_servo_rejects_position_over_a_byte() -> TestResult {
        assert!(Cli::try_parse_from(["meccactl", "servo", "l-elbow", "300"]).is_err());
        Ok(())
    }

    #[test]
    fn parse_servo_led_with_mode() -> TestResult {
        let cli = Cli::try_parse_from(["meccactl", "servo-led", "2", "red", "--mode", "4"])?;
        match &cli.command {
            Commands::ServoLed { index, color, mode } => {
                assert_eq!(*index, 2);
                assert_eq!(color, "red");
                assert_eq!(*mode, Some(4));
            }
            _ => return Err("expected the servo-led command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_chest_segment_state() -> TestResult {
        let cli = Cli::try_parse_from(["meccactl", "chest", "1", "on"])?;
        match &cli.command {
            Commands::Chest { index, state } => {
                assert_eq!(*index, 1);
                assert_eq!(*state, SegmentState::On);
            }
            _ => return Err("expected the chest command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_power_actions() -> TestResult {
        for (arg, expected) in [
            ("on", PowerAction::On),
            ("off", PowerAction::Off),
            ("cycle", PowerAction::Cycle),
        ] {
            let cli = Cli::try_parse_from(["meccactl", "power", arg])?;
            match &cli.command {
                Commands::Power { action } => assert_eq!(*action, expected),
                _ => return Err("expected the power command".into()),
            }
        }
        Ok(())
    }
}
