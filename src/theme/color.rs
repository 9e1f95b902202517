use core::fmt::{Display, Formatter};
use core::str::FromStr;
use ohno::app_err;
use palette::Srgb;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An opaque sRGB color, written out as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub Srgb<u8>);

impl Color {
    /// Build a color from a `0xRRGGBB` literal.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "each channel is masked to 8 bits")]
    pub const fn from_hex(hex: u32) -> Self {
        Self(Srgb::new(
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
        ))
    }
}

impl FromStr for Color {
    type Err = ohno::AppError;

    /// Accepts `#rgb`, `#rrggbb`, the same without `#`, or a CSS color name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(app_err!("empty color value"));
        }

        if let Ok(rgb) = Srgb::<u8>::from_str(s) {
            return Ok(Self(rgb));
        }

        palette::named::from_str(&s.to_ascii_lowercase())
            .map(Self)
            .ok_or_else(|| app_err!("'{s}' is neither a hex color nor a known color name"))
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!("#2f80ed".parse::<Color>().unwrap(), Color::from_hex(0x2f_80_ed));
        assert_eq!("2F80ED".parse::<Color>().unwrap(), Color::from_hex(0x2f_80_ed));
        assert_eq!("#fff".parse::<Color>().unwrap(), Color::from_hex(0xff_ff_ff));
        assert_eq!("000".parse::<Color>().unwrap(), Color::from_hex(0x00_00_00));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!("Red".parse::<Color>().unwrap(), Color::from_hex(0xff_00_00));
        assert_eq!("rebeccapurple".parse::<Color>().unwrap(), Color::from_hex(0x66_33_99));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let _ = "".parse::<Color>().unwrap_err();
        let _ = "#12".parse::<Color>().unwrap_err();
        let _ = "\"/><script>".parse::<Color>().unwrap_err();
        let _ = "notacolor".parse::<Color>().unwrap_err();
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        assert_eq!(Color::from_hex(0xAB_CD_EF).to_string(), "#abcdef");
        assert_eq!(Color::from_hex(0x00_00_0a).to_string(), "#00000a");
    }

    #[test]
    fn test_serde_round_trip_as_string() {
        let json = serde_json::to_string(&Color::from_hex(0x15_15_15)).unwrap();
        assert_eq!(json, "\"#151515\"");
        let color: Color = serde_json::from_str("\"#151515\"").unwrap();
        assert_eq!(color, Color::from_hex(0x15_15_15));
    }
}
