//! Fixed pose catalog.
//!
//! A pose is four logical joint targets in catalog order
//! `[LShoulder, LElbow, RShoulder, RElbow]`. Values are already
//! physically-effective bytes: mirrored slots were accounted for when the
//! catalog was tuned against the hardware, so expansion applies no polarity.

#![deny(static_mut_refs)]

use crate::joints::{ArmJoint, SERVO_CENTER};
use crate::packet::SERVO_COUNT;

/// A named, immutable joint-target preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pose {
    pub name: &'static str,
    /// Targets in catalog order `[LShoulder, LElbow, RShoulder, RElbow]`.
    pub joints: [u8; 4],
}

impl Pose {
    /// Expand into a full 8-slot servo frame.
    ///
    /// Non-arm slots stay at the center sentinel; each joint target lands on
    /// its physical slot as-is.
    pub fn servo_frame(&self) -> [u8; SERVO_COUNT] {
        let mut frame = [SERVO_CENTER; SERVO_COUNT];
        for (joint, &value) in ArmJoint::ALL.iter().zip(self.joints.iter()) {
            frame[joint.physical_slot()] = value;
        }
        frame
    }
}

/// Every pose the robot knows, as tuned on the hardware.
pub const POSES: [Pose; 11] = [
    Pose {
        name: "Neutral",
        joints: [128, 128, 128, 128],
    },
    Pose {
        name: "T_Pose",
        joints: [128, 192, 128, 64],
    },
    Pose {
        name: "Arms_Up",
        joints: [64, 128, 192, 128],
    },
    Pose {
        name: "Arms_Down",
        joints: [192, 128, 64, 128],
    },
    Pose {
        name: "Right_Wave_High",
        joints: [128, 128, 192, 192],
    },
    Pose {
        name: "Right_Wave_Mid",
        joints: [128, 128, 192, 128],
    },
    Pose {
        name: "Left_Wave_High",
        joints: [64, 64, 128, 128],
    },
    Pose {
        name: "Left_Wave_Mid",
        joints: [64, 128, 128, 128],
    },
    Pose {
        name: "Surrender",
        joints: [64, 64, 192, 192],
    },
    Pose {
        name: "Hug_Open",
        joints: [96, 192, 160, 64],
    },
    Pose {
        name: "Hug_Close",
        joints: [96, 64, 160, 192],
    },
];

/// Exact-match, case-sensitive lookup.
pub fn lookup(name: &str) -> Option<&'static Pose> {
    POSES.iter().find(|pose| pose.name == name)
}

/// Catalog names in declaration order.
pub fn names() -> impl Iterator<Item = &'static str> {
    POSES.iter().map(|pose| pose.name)
}
