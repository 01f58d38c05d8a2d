//! Stylesheet variable blocks.

use std::fmt::Write as _;

use crate::models::Palette;

/// CSS custom properties, one `--color-N` per slot (1-based), inside `:root`.
///
/// # Example
///
/// ```
/// use palettegen::export::to_css_variables;
/// use palettegen::models::{Palette, RgbColor};
///
/// let css = to_css_variables(&Palette::new(vec![RgbColor::new(255, 0, 0)]));
/// assert_eq!(css, ":root {\n  --color-1: #FF0000;\n}\n");
/// ```
pub fn to_css_variables(palette: &Palette) -> String {
    let mut output = String::from(":root {\n");
    for (i, color) in palette.iter().enumerate() {
        let _ = writeln!(output, "  --color-{}: {};", i + 1, color);
    }
    output.push_str("}\n");
    output
}

/// SCSS variables, one `$color-N` per slot (1-based).
pub fn to_scss_variables(palette: &Palette) -> String {
    let mut output = String::new();
    for (i, color) in palette.iter().enumerate() {
        let _ = writeln!(output, "$color-{}: {};", i + 1, color);
    }
    output
}
