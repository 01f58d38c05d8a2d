//! Palettegen Library
//!
//! Core of the palette generator: color math, generation strategies, the
//! palette state machine with locking and selection, contrast analysis,
//! image color extraction, saved palette persistence and export formats.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod models;
pub mod services;

pub use error::{PaletteError, PaletteResult};
