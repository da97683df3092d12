//! Property tests for the Meccanoid packet protocol.
//!
//! Verifies invariants across a wide range of inputs using `proptest`.

use meccanoid_protocol as protocol;
use proptest::prelude::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// The checksum is the big-endian 16-bit sum of the payload bytes.
    #[test]
    fn prop_checksum_matches_definition(payload in any::<[u8; 18]>()) {
        let sum: u32 = payload.iter().map(|&b| u32::from(b)).sum();
        let sum = sum % 65536;
        let expected = [(sum >> 8) as u8, (sum & 0xFF) as u8];
        prop_assert_eq!(protocol::checksum::compute(&payload), expected);
    }

    /// Every built packet is 20 bytes: the payload followed by its checksum.
    #[test]
    fn prop_packet_is_payload_plus_checksum(payload in any::<[u8; 18]>()) {
        let packet = protocol::Packet::from_payload(payload);
        let bytes = packet.as_bytes();
        prop_assert_eq!(bytes.len(), protocol::PACKET_LEN);
        prop_assert_eq!(&bytes[..18], &payload[..]);
        prop_assert_eq!(packet.checksum(), protocol::checksum::compute(&payload));
    }

    /// Raw slices of any length other than 18 are rejected.
    #[test]
    fn prop_wrong_payload_lengths_rejected(raw in proptest::collection::vec(any::<u8>(), 0..64)) {
        prop_assume!(raw.len() != 18);
        prop_assert!(protocol::Packet::from_payload_slice(&raw).is_err());
    }

    /// Polarity is involutive on mirrored slots. The one exception is 0x7F,
    /// which flips into the center sentinel and stays there.
    #[test]
    fn prop_polarity_is_involutive(slot in 0usize..8, value in 0u8..=255u8) {
        prop_assume!(!(protocol::is_reversed(slot) && value == 0x7F));
        let once = protocol::apply_polarity(slot, value);
        let twice = protocol::apply_polarity(slot, once);
        prop_assert_eq!(twice, value, "double application must restore the input");
    }

    /// The center sentinel survives polarity on every slot.
    #[test]
    fn prop_center_is_a_fixed_point(slot in 0usize..8) {
        prop_assert_eq!(
            protocol::apply_polarity(slot, protocol::SERVO_CENTER),
            protocol::SERVO_CENTER
        );
    }

    /// Plain slots pass every value through untouched.
    #[test]
    fn prop_plain_slots_pass_through(slot in prop_oneof![
        Just(0usize), Just(2usize), Just(4usize), Just(5usize), Just(6usize), Just(7usize)
    ], value in any::<u8>()) {
        prop_assert_eq!(protocol::apply_polarity(slot, value), value);
    }

    /// Valid eye channels are always accepted and stored verbatim.
    #[test]
    fn prop_eye_color_in_range_accepted(r in 0u8..=7, g in 0u8..=7, b in 0u8..=7) {
        let mut state = protocol::RobotState::new();
        let packet = state
            .set_eye_color(r, g, b)
            .expect("in-range eye color must encode");
        prop_assert_eq!(state.eye_rgb(), (r, g, b));
        prop_assert_eq!(packet.payload()[3], (g << 3) | r);
        prop_assert_eq!(packet.payload()[4], b);
    }

    /// Any out-of-range eye channel is rejected without touching state.
    #[test]
    fn prop_eye_color_out_of_range_rejected(r in 8u8..=255u8, g in any::<u8>(), b in any::<u8>()) {
        let mut state = protocol::RobotState::new();
        let before = state.clone();
        prop_assert!(state.set_eye_color(r, g, b).is_err());
        prop_assert_eq!(state, before);
    }

    /// Every catalog pose leaves the four non-arm slots at center.
    #[test]
    fn prop_pose_frames_keep_non_arm_slots_centered(idx in 0usize..11) {
        let pose = protocol::POSES[idx];
        let frame = pose.servo_frame();
        for slot in [0usize, 5, 6, 7] {
            prop_assert_eq!(frame[slot], protocol::SERVO_CENTER);
        }
    }

    /// Single-servo moves keep the other seven positions intact.
    #[test]
    fn prop_servo_move_touches_one_slot(index in 0usize..8, position in any::<u8>()) {
        let mut state = protocol::RobotState::new();
        let before = *state.servo_positions();
        state
            .set_servo_position(index, position)
            .expect("valid servo index must encode");
        let after = state.servo_positions();
        for slot in 0..8 {
            if slot != index {
                prop_assert_eq!(after[slot], before[slot]);
            }
        }
        prop_assert_eq!(after[index], protocol::apply_polarity(index, position));
    }
}
