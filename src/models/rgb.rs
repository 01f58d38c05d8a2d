//! RGB color handling with hex parsing, luminance and contrast.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]
// Allow intentional type casts for color math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{PaletteError, PaletteResult};

/// Gamma used to approximate the sRGB transfer curve in luminance math.
const LUMINANCE_GAMMA: f64 = 2.2;

/// RGB color value with hex string representation.
///
/// Represents a color using red, green, and blue channels (0-255 each).
/// The canonical external form is `#RRGGBB` in uppercase, which is also
/// what serde reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Black (#000000).
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (#FFFFFF).
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Accepts exactly six hex digits with an optional leading `#`, in any case.
    ///
    /// # Examples
    ///
    /// ```
    /// use palettegen::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#FF0000").unwrap();
    /// assert_eq!(color, RgbColor::new(255, 0, 0));
    ///
    /// let color = RgbColor::from_hex("00ff00").unwrap();
    /// assert_eq!(color, RgbColor::new(0, 255, 0));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Parse`] if the string is not a valid hex color.
    pub fn from_hex(input: &str) -> PaletteResult<Self> {
        let hex = input.strip_prefix('#').unwrap_or(input);

        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PaletteError::Parse {
                input: input.to_string(),
            });
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| PaletteError::Parse {
                input: input.to_string(),
            })
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Converts the color to a hex string in the format "#RRGGBB" (uppercase).
    ///
    /// # Examples
    ///
    /// ```
    /// use palettegen::models::RgbColor;
    ///
    /// let color = RgbColor::new(0, 128, 255);
    /// assert_eq!(color.to_hex(), "#0080FF");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Relative luminance in `[0.0, 1.0]`.
    ///
    /// Each channel is linearized with a plain 2.2 power curve rather than the
    /// piecewise sRGB function, then weighted 0.2126 / 0.7152 / 0.0722.
    #[must_use]
    pub fn relative_luminance(&self) -> f64 {
        let linear = |c: u8| (f64::from(c) / 255.0).powf(LUMINANCE_GAMMA);
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// Contrast ratio against `other`, rounded to two decimal places.
    ///
    /// The result lies in `[1.0, 21.0]` regardless of argument order.
    ///
    /// # Examples
    ///
    /// ```
    /// use palettegen::models::RgbColor;
    ///
    /// assert_eq!(RgbColor::BLACK.contrast_ratio(&RgbColor::WHITE), 21.0);
    /// ```
    #[must_use]
    pub fn contrast_ratio(&self, other: &Self) -> f64 {
        let la = self.relative_luminance();
        let lb = other.relative_luminance();
        let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
        let ratio = (lighter + 0.05) / (darker + 0.05);
        (ratio * 100.0).round() / 100.0
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for RgbColor {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Default for RgbColor {
    /// Default color is white (#FFFFFF).
    fn default() -> Self {
        Self::WHITE
    }
}

impl Serialize for RgbColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RgbColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}
