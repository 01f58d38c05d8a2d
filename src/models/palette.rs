//! Ordered palette of colors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use super::RgbColor;
use crate::error::{PaletteError, PaletteResult};

/// An ordered sequence of colors. Position is meaningful.
///
/// Serializes as a plain array of `#RRGGBB` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<RgbColor>,
}

impl Palette {
    /// Creates a palette from a list of colors.
    #[must_use]
    pub fn new(colors: Vec<RgbColor>) -> Self {
        Self { colors }
    }

    /// Parses a palette from hex strings.
    ///
    /// # Errors
    ///
    /// Returns the first [`PaletteError::Parse`] encountered.
    pub fn from_hex_list<S: AsRef<str>>(hexes: &[S]) -> PaletteResult<Self> {
        hexes
            .iter()
            .map(|h| RgbColor::from_hex(h.as_ref()))
            .collect::<PaletteResult<Vec<_>>>()
            .map(Self::new)
    }

    /// Number of colors in the palette.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the palette holds no colors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<RgbColor> {
        self.colors.get(index).copied()
    }

    /// Color at `index`, or a range error.
    pub fn try_get(&self, index: usize) -> PaletteResult<RgbColor> {
        self.get(index).ok_or(PaletteError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// The colors as a slice.
    #[must_use]
    pub fn colors(&self) -> &[RgbColor] {
        &self.colors
    }

    /// Iterates over the colors in order.
    pub fn iter(&self) -> std::slice::Iter<'_, RgbColor> {
        self.colors.iter()
    }

    /// Hex strings in palette order.
    #[must_use]
    pub fn to_hex_list(&self) -> Vec<String> {
        self.colors.iter().map(RgbColor::to_hex).collect()
    }

    pub(crate) fn colors_mut(&mut self) -> &mut Vec<RgbColor> {
        &mut self.colors
    }
}

impl Index<usize> for Palette {
    type Output = RgbColor;

    fn index(&self, index: usize) -> &Self::Output {
        &self.colors[index]
    }
}

impl From<Vec<RgbColor>> for Palette {
    fn from(colors: Vec<RgbColor>) -> Self {
        Self::new(colors)
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a RgbColor;
    type IntoIter = std::slice::Iter<'a, RgbColor>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_list().join(" "))
    }
}
