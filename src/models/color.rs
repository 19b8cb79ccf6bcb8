// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! RGB colors as used by the canvas and the blank detector.

use thiserror::Error;

/// An opaque RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

/// Failure to parse a `#RGB` / `#RRGGBB` color string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("expected 3 or 6 hex digits, got {0:?}")]
    Length(String),

    #[error("invalid hex digits in {0:?}")]
    Digits(String),
}

impl Rgb {
    pub const WHITE: Rgb = Rgb([255, 255, 255]);
    pub const BLACK: Rgb = Rgb([0, 0, 0]);

    /// Parse a hex color. The leading `#` is optional and the short
    /// three-digit form expands each digit (`#abc` == `#aabbcc`).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.trim().trim_start_matches('#');
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(ColorError::Length(hex.to_string())),
        };

        let mut rgb = [0u8; 3];
        for (i, channel) in rgb.iter_mut().enumerate() {
            let pair = expanded
                .get(i * 2..i * 2 + 2)
                .ok_or_else(|| ColorError::Digits(hex.to_string()))?;
            *channel =
                u8::from_str_radix(pair, 16).map_err(|_| ColorError::Digits(hex.to_string()))?;
        }
        Ok(Rgb(rgb))
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.0;
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    pub fn to_pixel(self) -> image::Rgb<u8> {
        image::Rgb(self.0)
    }

    pub fn to_color32(self) -> egui::Color32 {
        let [r, g, b] = self.0;
        egui::Color32::from_rgb(r, g, b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_forms() {
        assert_eq!(Rgb::from_hex("#FFFFFF"), Ok(Rgb::WHITE));
        assert_eq!(Rgb::from_hex("000000"), Ok(Rgb::BLACK));
        assert_eq!(Rgb::from_hex("#abc"), Ok(Rgb([0xaa, 0xbb, 0xcc])));
        assert_eq!(Rgb::from_hex("#1e90ff"), Ok(Rgb([0x1e, 0x90, 0xff])));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(Rgb::from_hex("#12345"), Err(ColorError::Length(_))));
        assert!(matches!(Rgb::from_hex("#zzzzzz"), Err(ColorError::Digits(_))));
        // Multi-byte characters must not panic on slicing.
        assert!(Rgb::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_hex_roundtrip() {
        let color = Rgb([12, 200, 7]);
        assert_eq!(Rgb::from_hex(&color.to_hex()), Ok(color));
    }
}
