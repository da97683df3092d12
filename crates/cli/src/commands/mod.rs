//! Command implementations for the meccactl CLI

pub mod power;
pub mod robot;
pub mod scan;
pub mod shell;

use clap::ValueEnum;
use meccanoid_protocol::ArmJoint;

/// Arm joints addressable from the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum JointArg {
    LShoulder,
    LElbow,
    RShoulder,
    RElbow,
}

impl JointArg {
    /// The protocol-level joint this argument names.
    pub fn joint(self) -> ArmJoint {
        match self {
            JointArg::LShoulder => ArmJoint::LeftShoulder,
            JointArg::LElbow => ArmJoint::LeftElbow,
            JointArg::RShoulder => ArmJoint::RightShoulder,
            JointArg::RElbow => ArmJoint::RightElbow,
        }
    }
}

/// On/off argument for chest segments.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentState {
    On,
    Off,
}

impl SegmentState {
    pub fn is_on(self) -> bool {
        matches!(self, SegmentState::On)
    }
}

/// What to do with the robot's supply.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerAction {
    On,
    Off,
    Cycle,
}
