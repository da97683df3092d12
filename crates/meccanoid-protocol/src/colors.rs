//! Servo LED color codes.
//!
//! Each servo LED takes a 3-bit color code in the 0x0C payload. The names
//! follow the vendor app's picker order.

#![deny(static_mut_refs)]

use std::fmt;
use std::str::FromStr;

use crate::ProtocolError;

/// The eight colors a servo LED can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LedColor {
    Off = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

impl LedColor {
    pub const ALL: [LedColor; 8] = [
        LedColor::Off,
        LedColor::Red,
        LedColor::Green,
        LedColor::Yellow,
        LedColor::Blue,
        LedColor::Magenta,
        LedColor::Cyan,
        LedColor::White,
    ];

    /// Wire code carried in the servo LED payload.
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            LedColor::Off => "off",
            LedColor::Red => "red",
            LedColor::Green => "green",
            LedColor::Yellow => "yellow",
            LedColor::Blue => "blue",
            LedColor::Magenta => "magenta",
            LedColor::Cyan => "cyan",
            LedColor::White => "white",
        }
    }

    /// Look a color up by wire code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(LedColor::Off),
            1 => Some(LedColor::Red),
            2 => Some(LedColor::Green),
            3 => Some(LedColor::Yellow),
            4 => Some(LedColor::Blue),
            5 => Some(LedColor::Magenta),
            6 => Some(LedColor::Cyan),
            7 => Some(LedColor::White),
            _ => None,
        }
    }
}

impl fmt::Display for LedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a color name (case-insensitive) or a bare digit 0-7.
impl FromStr for LedColor {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        if let Ok(code) = lowered.parse::<u8>() {
            return LedColor::from_code(code)
                .ok_or_else(|| ProtocolError::UnknownColor(s.to_string()));
        }
        LedColor::ALL
            .iter()
            .find(|c| c.name() == lowered)
            .copied()
            .ok_or_else(|| ProtocolError::UnknownColor(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_cover_the_3_bit_range() -> Result<(), Box<dyn std::error::Error>> {
        for (expected, color) in LedColor::ALL.iter().enumerate() {
            assert_eq!(color.code() as usize, expected);
            assert_eq!(LedColor::from_code(color.code()), Some(*color));
        }
        assert_eq!(LedColor::from_code(8), None);
        Ok(())
    }

    #[test]
    fn test_parse_accepts_names_and_digits() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("magenta".parse::<LedColor>()?, LedColor::Magenta);
        assert_eq!("RED".parse::<LedColor>()?, LedColor::Red);
        assert_eq!(" cyan ".parse::<LedColor>()?, LedColor::Cyan);
        assert_eq!("7".parse::<LedColor>()?, LedColor::White);
        assert_eq!("0".parse::<LedColor>()?, LedColor::Off);
        Ok(())
    }

    #[test]
    fn test_parse_rejects_junk() {
        assert!(matches!(
            "8".parse::<LedColor>(),
            Err(ProtocolError::UnknownColor(_))
        ));
        assert!(matches!(
            "purple".parse::<LedColor>(),
            Err(ProtocolError::UnknownColor(_))
        ));
    }
}
