//! Logical arm joints, their physical servo slots, and polarity reversal.
//!
//! The 0x08 payload is addressed by physical slot (0-7), but the arm servos
//! are wired in a non-obvious order and two of them are mounted mirrored.
//! Callers think in joints; this module owns the translation.
//!
//! The firmware treats `0x80` as the center sentinel on every slot, so it is
//! never flipped. Reversal is its own inverse for all other values, except
//! `0x7F`, which flips into the sentinel and stays there.

#![deny(static_mut_refs)]

/// Center position, and the one byte the reversal rule never touches.
pub const SERVO_CENTER: u8 = 0x80;

/// Physical slots wired mechanically mirrored. Values sent to these slots
/// must be flipped exactly once, at the manual single-servo boundary.
pub const REVERSED_SLOTS: [usize; 2] = [1, 3];

/// The four arm joints the protocol can address by name.
///
/// Declaration order is the catalog order used by poses:
/// `[LShoulder, LElbow, RShoulder, RElbow]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArmJoint {
    LeftShoulder,
    LeftElbow,
    RightShoulder,
    RightElbow,
}

impl ArmJoint {
    /// All joints, in catalog order.
    pub const ALL: [ArmJoint; 4] = [
        ArmJoint::LeftShoulder,
        ArmJoint::LeftElbow,
        ArmJoint::RightShoulder,
        ArmJoint::RightElbow,
    ];

    /// Physical servo slot carrying this joint in the 0x08 payload.
    pub const fn physical_slot(self) -> usize {
        match self {
            ArmJoint::LeftShoulder => 3,
            ArmJoint::LeftElbow => 4,
            ArmJoint::RightShoulder => 2,
            ArmJoint::RightElbow => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ArmJoint::LeftShoulder => "LShoulder",
            ArmJoint::LeftElbow => "LElbow",
            ArmJoint::RightShoulder => "RShoulder",
            ArmJoint::RightElbow => "RElbow",
        }
    }
}

/// Whether a physical slot is in the reversed set.
pub const fn is_reversed(slot: usize) -> bool {
    let mut i = 0;
    while i < REVERSED_SLOTS.len() {
        if REVERSED_SLOTS[i] == slot {
            return true;
        }
        i += 1;
    }
    false
}

/// Map a requested position to the byte that physically goes on the wire.
///
/// For reversed slots every value except the center sentinel becomes
/// `0xFF - value`; all other slots pass through untouched.
pub const fn apply_polarity(slot: usize, value: u8) -> u8 {
    if is_reversed(slot) && value != SERVO_CENTER {
        0xFF - value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_slots_match_wiring() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(ArmJoint::LeftShoulder.physical_slot(), 3);
        assert_eq!(ArmJoint::LeftElbow.physical_slot(), 4);
        assert_eq!(ArmJoint::RightShoulder.physical_slot(), 2);
        assert_eq!(ArmJoint::RightElbow.physical_slot(), 1);
        Ok(())
    }

    #[test]
    fn test_reversed_slots() -> Result<(), Box<dyn std::error::Error>> {
        assert!(is_reversed(1));
        assert!(is_reversed(3));
        for slot in [0usize, 2, 4, 5, 6, 7] {
            assert!(!is_reversed(slot), "slot {slot} must not be reversed");
        }
        Ok(())
    }

    #[test]
    fn test_polarity_flips_reversed_slots() -> Result<(), Box<dyn std::error::Error>> {
        // 0x40 on a mirrored slot goes out as 0xBF, and 0xC0 as 0x3F.
        assert_eq!(apply_polarity(1, 0x40), 0xBF);
        assert_eq!(apply_polarity(1, 0xC0), 0x3F);
        assert_eq!(apply_polarity(3, 0x00), 0xFF);
        Ok(())
    }

    #[test]
    fn test_polarity_passes_plain_slots_through() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(apply_polarity(0, 0x40), 0x40);
        assert_eq!(apply_polarity(2, 0xC0), 0xC0);
        assert_eq!(apply_polarity(7, 0x00), 0x00);
        Ok(())
    }

    #[test]
    fn test_center_sentinel_is_never_flipped() -> Result<(), Box<dyn std::error::Error>> {
        for slot in 0..8 {
            assert_eq!(apply_polarity(slot, SERVO_CENTER), SERVO_CENTER);
        }
        Ok(())
    }

    #[test]
    fn test_0x7f_flips_into_the_sentinel_one_way() -> Result<(), Box<dyn std::error::Error>> {
        // 0xFF - 0x7F lands on the sentinel, which never flips back.
        assert_eq!(apply_polarity(1, 0x7F), SERVO_CENTER);
        assert_eq!(apply_polarity(1, apply_polarity(1, 0x7F)), SERVO_CENTER);
        Ok(())
    }
}
