//! Export functionality for palettes.
//!
//! Every format is a pure function of the palette; nothing here touches the
//! filesystem or the clipboard.

pub mod code;
pub mod css;
pub mod markdown;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Palette;

pub use code::{to_js_array, to_json, to_text};
pub use css::{to_css_variables, to_scss_variables};
pub use markdown::to_markdown_table;

/// Text format for an exported palette.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// CSS custom properties inside `:root`
    #[default]
    Css,
    /// SCSS variables
    Scss,
    /// Pretty-printed JSON array of hex strings
    Json,
    /// JavaScript array assignment
    Js,
    /// One hex color per line
    Text,
    /// Markdown table with RGB and HSL columns
    Markdown,
}

impl ExportFormat {
    /// Lowercase identifier used by the CLI.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Scss => "scss",
            Self::Json => "json",
            Self::Js => "js",
            Self::Text => "text",
            Self::Markdown => "markdown",
        }
    }

    /// Returns all formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Css,
            Self::Scss,
            Self::Json,
            Self::Js,
            Self::Text,
            Self::Markdown,
        ]
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|format| format.name() == needle)
            .ok_or_else(|| format!("Unknown export format '{s}'"))
    }
}

/// Renders `palette` in `format`.
#[must_use]
pub fn export_palette(palette: &Palette, format: ExportFormat) -> String {
    match format {
        ExportFormat::Css => to_css_variables(palette),
        ExportFormat::Scss => to_scss_variables(palette),
        ExportFormat::Json => to_json(palette),
        ExportFormat::Js => to_js_array(palette),
        ExportFormat::Text => to_text(palette),
        ExportFormat::Markdown => to_markdown_table(palette),
    }
}
