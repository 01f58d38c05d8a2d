//! Generation mode selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strategy used to produce palette colors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Six independently random hex digits
    #[default]
    Random,
    /// Soft, light, low-saturation colors
    Pastel,
    /// Saturated mid-lightness colors
    Vibrant,
    /// Low-lightness colors
    Dark,
    /// Muted colors with low saturation
    Monochrome,
    /// Hues stepping 30 degrees from one base hue
    Analogous,
    /// Base hue alternating with its opposite
    Complementary,
    /// Hues stepping 120 degrees from one base hue
    Triadic,
}

impl GenerationMode {
    /// Returns all modes in menu order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Random,
            Self::Pastel,
            Self::Vibrant,
            Self::Dark,
            Self::Monochrome,
            Self::Analogous,
            Self::Complementary,
            Self::Triadic,
        ]
    }

    /// Lowercase identifier used in config files and the CLI.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Pastel => "pastel",
            Self::Vibrant => "vibrant",
            Self::Dark => "dark",
            Self::Monochrome => "monochrome",
            Self::Analogous => "analogous",
            Self::Complementary => "complementary",
            Self::Triadic => "triadic",
        }
    }

    /// Returns true if the mode derives every slot from one shared base hue.
    ///
    /// Such modes regenerate the whole palette at once, so per-slot locks
    /// have no effect on them.
    #[must_use]
    pub const fn is_coherent_batch(self) -> bool {
        matches!(self, Self::Analogous | Self::Complementary | Self::Triadic)
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GenerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|mode| mode.name() == needle)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::all().iter().map(|m| m.name()).collect();
                format!("Unknown mode '{s}'. Expected one of: {}", names.join(", "))
            })
    }
}
