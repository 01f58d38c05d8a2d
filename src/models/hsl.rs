//! HSL color representation and conversion to and from RGB.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RgbColor;

/// Hue/saturation/lightness triple with integer components.
///
/// - `h`: hue in degrees, 0-359
/// - `s`: saturation in percent, 0-100
/// - `l`: lightness in percent, 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue in degrees (0-359)
    pub h: u16,
    /// Saturation in percent (0-100)
    pub s: u8,
    /// Lightness in percent (0-100)
    pub l: u8,
}

impl Hsl {
    /// Creates a new `Hsl`, wrapping hue into 0-359 and clamping s/l to 100.
    #[must_use]
    pub const fn new(h: u16, s: u8, l: u8) -> Self {
        Self {
            h: h % 360,
            s: if s > 100 { 100 } else { s },
            l: if l > 100 { 100 } else { l },
        }
    }

    /// Derives the HSL components of an RGB color.
    ///
    /// Achromatic colors (all channels equal) get hue 0 and saturation 0.
    /// All three outputs are rounded to the nearest integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use palettegen::models::{Hsl, RgbColor};
    ///
    /// let hsl = Hsl::from_rgb(RgbColor::new(255, 0, 0));
    /// assert_eq!(hsl, Hsl::new(0, 100, 50));
    /// ```
    #[must_use]
    pub fn from_rgb(color: RgbColor) -> Self {
        let r = f64::from(color.r) / 255.0;
        let g = f64::from(color.g) / 255.0;
        let b = f64::from(color.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Self::new(0, 0, (l * 100.0).round() as u8);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let sector = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self::new(
            ((sector * 60.0).round() as u16) % 360,
            (s * 100.0).round() as u8,
            (l * 100.0).round() as u8,
        )
    }

    /// Converts to RGB using the canonical chroma formula.
    #[must_use]
    pub fn to_rgb(self) -> RgbColor {
        hsl_to_rgb(f64::from(self.h), f64::from(self.s), f64::from(self.l))
    }

    /// Converts to a `#RRGGBB` hex string.
    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// Converts fractional HSL components to RGB.
///
/// `h` is in degrees and taken mod 360; `s` and `l` are percentages clamped
/// to `[0, 100]`. With `a = s * min(l, 1 - l)` each channel is
/// `l - a * clamp(min(k - 3, 9 - k, 1), -1, 1)` where `k = (n + h / 30) mod 12`,
/// sampled at n = 0, 8, 4 for red, green and blue.
#[must_use]
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> RgbColor {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 100.0) / 100.0;
    let l = l.clamp(0.0, 100.0) / 100.0;

    let a = s * l.min(1.0 - l);
    let channel = |n: f64| {
        let k = (n + h / 30.0) % 12.0;
        let f = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (f * 255.0).round().clamp(0.0, 255.0) as u8
    };

    RgbColor::new(channel(0.0), channel(8.0), channel(4.0))
}
