//! Color conversion command.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::models::{Hsl, RgbColor};
use clap::Args;
use serde::Serialize;

/// Convert a color between hex, RGB and HSL
#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    /// Hex color such as #1E90FF
    #[arg(value_name = "HEX", required_unless_present = "hsl")]
    pub color: Option<String>,

    /// Convert from HSL instead: hue (0-359), saturation and lightness (0-100)
    #[arg(long, num_args = 3, value_names = ["H", "S", "L"], conflicts_with = "color")]
    pub hsl: Option<Vec<u16>>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ConversionOutput {
    hex: String,
    rgb: [u8; 3],
    hsl: Hsl,
    luminance: f64,
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self) -> CliResult<()> {
        let color = match (&self.color, &self.hsl) {
            (_, Some(values)) => hsl_from_args(values)?.to_rgb(),
            (Some(hex), None) => {
                RgbColor::from_hex(hex).map_err(|e| CliError::validation(e.to_string()))?
            }
            (None, None) => return Err(CliError::validation("A color is required")),
        };

        let output = ConversionOutput {
            hex: color.to_hex(),
            rgb: [color.r, color.g, color.b],
            hsl: Hsl::from_rgb(color),
            luminance: (color.relative_luminance() * 10_000.0).round() / 10_000.0,
        };

        if self.json {
            print_json(&output)?;
        } else {
            println!("Hex:       {}", output.hex);
            println!("RGB:       rgb({}, {}, {})", color.r, color.g, color.b);
            println!("HSL:       {}", output.hsl);
            println!("Luminance: {:.4}", output.luminance);
        }

        Ok(())
    }
}

#[allow(clippy::cast_possible_truncation)]
fn hsl_from_args(values: &[u16]) -> CliResult<Hsl> {
    let [h, s, l] = values else {
        return Err(CliError::validation("--hsl takes exactly three values"));
    };
    if *h > 359 || *s > 100 || *l > 100 {
        return Err(CliError::validation(format!(
            "HSL out of range: hue must be 0-359, saturation and lightness 0-100 (got {h} {s} {l})"
        )));
    }
    Ok(Hsl::new(*h, *s as u8, *l as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_from_args() {
        assert_eq!(hsl_from_args(&[120, 50, 40]).unwrap(), Hsl::new(120, 50, 40));
        assert!(hsl_from_args(&[360, 50, 40]).is_err());
        assert!(hsl_from_args(&[10, 101, 40]).is_err());
        assert!(hsl_from_args(&[10, 10]).is_err());
    }
}
