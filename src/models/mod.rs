//! Data models for colors, palettes and generation modes.
//!
//! Models are independent of UI and of how palettes are generated.

pub mod hsl;
pub mod mode;
pub mod palette;
pub mod rgb;

// Re-export all model types
pub use hsl::{hsl_to_rgb, Hsl};
pub use mode::GenerationMode;
pub use palette::Palette;
pub use rgb::RgbColor;
