//! Image color extraction command.

use crate::cli::common::{load_config, print_json, CliError, CliResult};
use crate::constants::DEFAULT_SAMPLE_EVERY;
use crate::export::{export_palette, ExportFormat};
use crate::models::Palette;
use crate::services::extractor::{decode_image, ImageColorExtractor};
use clap::Args;
use std::path::PathBuf;

/// Extract the most frequent colors from an image
#[derive(Debug, Clone, Args)]
pub struct ExtractArgs {
    /// PNG, JPEG or GIF file
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Number of colors (defaults to the configured count)
    #[arg(short, long)]
    pub count: Option<usize>,

    /// Sample one pixel out of every N
    #[arg(long, value_name = "N", default_value_t = DEFAULT_SAMPLE_EVERY)]
    pub sample_every: usize,

    /// Render in an export format instead of a hex list
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Output as a JSON array of hex strings
    #[arg(long, conflicts_with = "format")]
    pub json: bool,
}

impl ExtractArgs {
    /// Execute the extract command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let count = self.count.unwrap_or(config.generation.default_count);
        if count == 0 || count > config.generation.max_count {
            return Err(CliError::validation(format!(
                "Count must be between 1 and {}, got {count}",
                config.generation.max_count
            )));
        }

        if !self.image.exists() {
            return Err(CliError::io(format!(
                "Image file not found: {}",
                self.image.display()
            )));
        }

        let image = decode_image(&self.image).map_err(|e| CliError::io(format!("{e:#}")))?;
        let extractor = ImageColorExtractor::with_sample_every(self.sample_every);
        let palette = Palette::new(extractor.extract_image(&image, count));

        if palette.is_empty() {
            return Err(CliError::validation(format!(
                "No colors found in {}",
                self.image.display()
            )));
        }

        if self.json {
            print_json(&palette)?;
        } else if let Some(format) = self.format {
            print!("{}", export_palette(&palette, format));
        } else {
            for color in &palette {
                println!("{color}");
            }
        }

        Ok(())
    }
}
