//! Markdown swatch table.

use std::fmt::Write as _;

use crate::models::{Hsl, Palette};

/// Markdown table listing each slot with its hex, RGB and HSL values.
pub fn to_markdown_table(palette: &Palette) -> String {
    let mut output = String::new();
    output.push_str("| # | Hex | RGB | HSL |\n");
    output.push_str("|---|-----|-----|-----|\n");

    for (i, color) in palette.iter().enumerate() {
        let hsl = Hsl::from_rgb(*color);
        let _ = writeln!(
            output,
            "| {} | `{}` | {}, {}, {} | {}, {}%, {}% |",
            i + 1,
            color,
            color.r,
            color.g,
            color.b,
            hsl.h,
            hsl.s,
            hsl.l
        );
    }

    output
}
