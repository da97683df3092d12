//! Command identifiers for the Meccanoid 20-byte BLE packet protocol.
//!
//! Every payload carries its command byte in slot 0; the remaining 17 slots
//! are command-specific. The values below were captured from the stock
//! Meccanoid app's traffic and match the community `pymecca` tables.

#![deny(static_mut_refs)]

/// Command bytes (payload slot 0).
pub mod commands {
    /// Wake/handshake command. Fixed payload, no state carried.
    pub const HANDSHAKE: u8 = 0x0D;
    /// Set all 8 servo positions + 8 servo LED modes + foot LEDs.
    pub const SET_SERVOS: u8 = 0x08;
    /// Set all 8 servo LED colors + 8 servo LED modes.
    pub const SET_SERVO_LEDS: u8 = 0x0C;
    /// Set eye RGB and re-assert the four chest LED statuses.
    pub const SET_EYES_CHEST: u8 = 0x11;
    /// Set the four chest LED statuses on their own.
    pub const SET_CHEST_LEDS: u8 = 0x1C;
}
