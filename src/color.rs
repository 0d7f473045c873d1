//! Color values for particles and the background.

use bytemuck::{Pod, Zeroable};

use crate::error::ConfigError;

/// An RGBA color with 8 bits per channel.
///
/// The layout matches the canvas pixel format byte for byte, so a row of
/// canvas pixels can be handed to the GPU without conversion.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    /// Faint red from the default palette.
    pub const PALE_RED: Color = Color::rgb(0xff, 0xcc, 0xcc);
    /// Faint blue from the default palette.
    pub const PALE_BLUE: Color = Color::rgb(0xcc, 0xcc, 0xff);

    /// Fully opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Parse a `#rgb` or `#rrggbb` hex color.
    ///
    /// ```
    /// use stardrift::Color;
    ///
    /// assert_eq!(Color::parse("#fff").unwrap(), Color::WHITE);
    /// assert_eq!(Color::parse("#ffcccc").unwrap(), Color::PALE_RED);
    /// ```
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let bad = || ConfigError::BadColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(bad)?;
        if !hex.is_ascii() {
            return Err(bad());
        }

        let channel = |h: &str| u8::from_str_radix(h, 16).map_err(|_| bad());

        match hex.len() {
            // Shorthand: each digit doubles, #fc0 == #ffcc00
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Color::rgb(r * 17, g * 17, b * 17))
            }
            6 => Ok(Color::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(bad()),
        }
    }
}

/// The classic three-entry palette: white, faint red, faint blue.
pub fn default_palette() -> Vec<Color> {
    vec![Color::WHITE, Color::PALE_RED, Color::PALE_BLUE]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shorthand() {
        assert_eq!(Color::parse("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("#000").unwrap(), Color::BLACK);
        assert_eq!(Color::parse("#fc0").unwrap(), Color::rgb(0xff, 0xcc, 0x00));
    }

    #[test]
    fn test_parse_full() {
        assert_eq!(Color::parse("#ffcccc").unwrap(), Color::PALE_RED);
        assert_eq!(Color::parse("#ccccff").unwrap(), Color::PALE_BLUE);
        assert_eq!(Color::parse("#123456").unwrap(), Color::rgb(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Color::parse("ffffff").is_err());
        assert!(Color::parse("#ffff").is_err());
        assert!(Color::parse("#gggggg").is_err());
        assert!(Color::parse("#").is_err());
    }

    #[test]
    fn test_default_palette() {
        let palette = default_palette();
        assert_eq!(palette, vec![Color::WHITE, Color::PALE_RED, Color::PALE_BLUE]);
    }
}
