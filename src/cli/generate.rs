//! Palette generation command.

use crate::cli::common::{
    copy_output, load_config, make_rng, open_saved, parse_colors, print_json, print_snapshot,
    CliError, CliResult,
};
use crate::config::Config;
use crate::export::{export_palette, ExportFormat};
use crate::models::GenerationMode;
use crate::services::clipboard::{Clipboard, SystemClipboard};
use crate::services::state::PaletteState;
use clap::Args;
use tracing::info;

/// Generate a new palette
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Generation mode (defaults to the configured mode)
    #[arg(short, long, value_enum)]
    pub mode: Option<GenerationMode>,

    /// Number of colors (defaults to the configured count)
    #[arg(short, long)]
    pub count: Option<usize>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start from these colors instead of a fresh palette
    #[arg(long = "from", value_name = "HEX", num_args = 1..)]
    pub from: Vec<String>,

    /// Keep the color at this index (0-based, requires --from)
    #[arg(long, value_name = "INDEX")]
    pub lock: Vec<usize>,

    /// Render in an export format instead of the color listing
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Output the palette snapshot as JSON
    #[arg(long, conflicts_with = "format")]
    pub json: bool,

    /// Copy the rendered output to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Append the result to the saved palettes
    #[arg(long)]
    pub save: bool,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        self.run(&config, &mut SystemClipboard)
    }

    /// Generates with `config`, copying to `clipboard` when `--copy` is set.
    pub fn run(&self, config: &Config, clipboard: &mut dyn Clipboard) -> CliResult<()> {
        let mode = self.mode.unwrap_or(config.generation.default_mode);
        let max_count = config.generation.max_count;
        let mut rng = make_rng(self.seed);

        if !self.lock.is_empty() && self.from.is_empty() {
            return Err(CliError::validation("--lock requires --from"));
        }

        let state = if self.from.is_empty() {
            let count = self.count.unwrap_or(config.generation.default_count);
            PaletteState::new(mode, count, max_count, &mut *rng)
                .map_err(|e| CliError::validation(e.to_string()))?
        } else {
            let palette = parse_colors(&self.from)?;
            let mut state = PaletteState::from_palette(palette, mode, max_count)
                .map_err(|e| CliError::validation(e.to_string()))?;
            for &index in &self.lock {
                if !state.is_locked(index) {
                    state
                        .toggle_lock(index)
                        .map_err(|e| CliError::validation(e.to_string()))?;
                }
            }
            if let Some(count) = self.count {
                state
                    .set_count(count, &mut *rng)
                    .map_err(|e| CliError::validation(e.to_string()))?;
            }
            state.regenerate(&mut *rng);
            state
        };

        info!(%mode, count = state.len(), "generated palette");
        let snapshot = state.snapshot();

        if self.save {
            open_saved(config)?
                .save(state.palette())
                .map_err(|e| CliError::io(format!("Failed to save palette: {e:#}")))?;
        }

        let rendered = match self.format {
            Some(format) => export_palette(state.palette(), format),
            None => state.palette().to_hex_list().join("\n"),
        };

        if self.json {
            print_json(&snapshot)?;
        } else if self.format.is_some() {
            print!("{rendered}");
        } else {
            print_snapshot(&snapshot);
        }

        if self.copy {
            copy_output(clipboard, &rendered)?;
        }

        Ok(())
    }
}
