use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An opaque RGB color, written as `#rrggbb` in styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` (case-insensitive, leading `#` required)
    pub fn parse(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| Error::InvalidColor(hex.to_string()))?;

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| Error::InvalidColor(hex.to_string()))
        };

        Ok(Self::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse("#3BC802").unwrap(), Color::from_rgb(0x3b, 0xc8, 0x02));
        assert_eq!(Color::parse("#aaaaaa").unwrap(), Color::from_rgb(170, 170, 170));
        assert_eq!(Color::from_rgb(0x3b, 0xc8, 0x02).to_string(), "#3bc802");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["3BC802", "#3BC80", "#3BC8021", "#GGGGGG", "#ééé", ""] {
            assert!(matches!(Color::parse(bad), Err(Error::InvalidColor(_))), "{bad}");
        }
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Color::from_rgb(255, 0, 16)).unwrap();
        assert_eq!(json, "\"#ff0010\"");
        let back: Color = serde_json::from_str("\"#FF0010\"").unwrap();
        assert_eq!(back, Color::from_rgb(255, 0, 16));
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }
}
