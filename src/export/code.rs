//! Source-code and data encodings of a palette.

use crate::models::Palette;

/// Pretty-printed JSON array of hex strings.
pub fn to_json(palette: &Palette) -> String {
    // A list of strings always serializes
    serde_json::to_string_pretty(&palette.to_hex_list()).unwrap_or_else(|_| "[]".to_string())
}

/// JavaScript array assignment, e.g. `const palette = ["#000000"];`.
pub fn to_js_array(palette: &Palette) -> String {
    let items: Vec<String> = palette.iter().map(|c| format!("\"{c}\"")).collect();
    format!("const palette = [{}];", items.join(", "))
}

/// One hex color per line.
pub fn to_text(palette: &Palette) -> String {
    palette.iter().map(|c| format!("{c}\n")).collect()
}
