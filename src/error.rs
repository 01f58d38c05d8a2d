//! Error kinds raised by the palette core.
//!
//! All of these are local and non-fatal. The caller decides how to surface
//! them; no operation that returns one of these has mutated any state.

use std::fmt;

/// Errors produced by color parsing and palette state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// The input was not a 6-digit hex color (with optional leading `#`).
    Parse {
        /// The rejected input, as given.
        input: String,
    },
    /// A slot index pointed past the end of the palette.
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Palette length at the time of the request.
        len: usize,
    },
    /// An HSL edit was attempted while no slot was selected.
    NoSelection,
    /// A palette size outside `1..=max` was requested.
    InvalidCount {
        /// Requested size.
        count: usize,
        /// Configured maximum size.
        max: usize,
    },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { input } => write!(
                f,
                "Invalid hex color '{input}'. Expected 6 hex digits (RRGGBB)"
            ),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "Index {index} is out of range for a palette of {len} colors")
            }
            Self::NoSelection => write!(f, "No color is selected"),
            Self::InvalidCount { count, max } => {
                write!(f, "Palette size {count} is invalid. Must be between 1 and {max}")
            }
        }
    }
}

impl std::error::Error for PaletteError {}

/// Convenience alias for results carrying a [`PaletteError`].
pub type PaletteResult<T> = std::result::Result<T, PaletteError>;
