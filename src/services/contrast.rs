//! Pairwise WCAG contrast analysis for a palette.

use serde::Serialize;
use std::fmt;

use crate::models::Palette;

/// Minimum ratio for WCAG AA body text.
pub const AA_THRESHOLD: f64 = 4.5;
/// Minimum ratio for WCAG AAA body text.
pub const AAA_THRESHOLD: f64 = 7.0;

/// Accessibility grade of a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastGrade {
    /// Ratio of at least 7
    Aaa,
    /// Ratio of at least 4.5 but below 7
    Aa,
    /// Ratio below 4.5
    Fail,
}

impl ContrastGrade {
    /// Grades a (rounded) contrast ratio.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= AAA_THRESHOLD {
            Self::Aaa
        } else if ratio >= AA_THRESHOLD {
            Self::Aa
        } else {
            Self::Fail
        }
    }

    /// Short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aaa => "AAA pass",
            Self::Aa => "AA pass",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for ContrastGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Contrast between two palette slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastPair {
    /// First slot index
    pub index_a: usize,
    /// Second slot index, always greater than `index_a`
    pub index_b: usize,
    /// Ratio rounded to two decimals
    pub ratio: f64,
    /// Accessibility grade of `ratio`
    pub grade: ContrastGrade,
}

/// Computes the contrast of every unordered slot pair.
///
/// Pairs come out as (0,1), (0,2), ..., (1,2), ... so a palette of N colors
/// yields N * (N - 1) / 2 entries.
///
/// # Examples
///
/// ```
/// use palettegen::models::{Palette, RgbColor};
/// use palettegen::services::contrast::{analyze, ContrastGrade};
///
/// let palette = Palette::new(vec![RgbColor::BLACK, RgbColor::WHITE]);
/// let pairs = analyze(&palette);
/// assert_eq!(pairs[0].ratio, 21.0);
/// assert_eq!(pairs[0].grade, ContrastGrade::Aaa);
/// ```
#[must_use]
pub fn analyze(palette: &Palette) -> Vec<ContrastPair> {
    let colors = palette.colors();
    let mut pairs = Vec::with_capacity(colors.len() * colors.len().saturating_sub(1) / 2);

    for (i, a) in colors.iter().enumerate() {
        for (j, b) in colors.iter().enumerate().skip(i + 1) {
            let ratio = a.contrast_ratio(b);
            pairs.push(ContrastPair {
                index_a: i,
                index_b: j,
                ratio,
                grade: ContrastGrade::from_ratio(ratio),
            });
        }
    }

    pairs
}
