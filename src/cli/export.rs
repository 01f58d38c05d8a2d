//! Export command.

use crate::cli::common::{copy_output, parse_colors, CliError, CliResult};
use crate::export::{export_palette, ExportFormat};
use crate::services::clipboard::{Clipboard, SystemClipboard};
use clap::Args;
use std::path::PathBuf;

/// Render colors as CSS, SCSS, JSON, JS, text or Markdown
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Hex colors, separated by spaces or commas ("-" reads stdin)
    #[arg(value_name = "HEX", required = true)]
    pub colors: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Css)]
    pub format: ExportFormat,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Copy the rendered text to the clipboard
    #[arg(long)]
    pub copy: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self) -> CliResult<()> {
        self.run(&mut SystemClipboard)
    }

    /// Renders the colors, copying to `clipboard` when `--copy` is set.
    pub fn run(&self, clipboard: &mut dyn Clipboard) -> CliResult<()> {
        let palette = parse_colors(&self.colors)?;
        let rendered = export_palette(&palette, self.format);

        match &self.output {
            Some(path) => {
                std::fs::write(path, &rendered)
                    .map_err(|e| CliError::io(format!("Failed to write output file: {e}")))?;
                eprintln!("Wrote {} to {}", self.format, path.display());
            }
            None => print!("{rendered}"),
        }

        if self.copy {
            copy_output(clipboard, &rendered)?;
        }

        Ok(())
    }
}
