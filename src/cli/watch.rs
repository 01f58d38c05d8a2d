//! Auto-regenerate command.

use crate::cli::common::{load_config, make_rng, print_snapshot, CliError, CliResult};
use crate::models::GenerationMode;
use crate::services::auto_regenerate::AutoRegenerate;
use crate::services::state::PaletteState;
use clap::Args;
use std::time::{Duration, Instant};

/// Regenerate the palette on a fixed interval
#[derive(Debug, Clone, Args)]
pub struct WatchArgs {
    /// Generation mode (defaults to the configured mode)
    #[arg(short, long, value_enum)]
    pub mode: Option<GenerationMode>,

    /// Number of colors (defaults to the configured count)
    #[arg(short, long)]
    pub count: Option<usize>,

    /// Milliseconds between palettes (defaults to the configured interval)
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Stop after this many regenerations
    #[arg(long)]
    pub ticks: Option<u32>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print each palette as one JSON line
    #[arg(long)]
    pub json: bool,
}

impl WatchArgs {
    /// Execute the watch command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let mode = self.mode.unwrap_or(config.generation.default_mode);
        let count = self.count.unwrap_or(config.generation.default_count);
        let interval = self
            .interval_ms
            .map_or_else(|| config.auto_interval(), Duration::from_millis);

        let mut rng = make_rng(self.seed);
        let mut state = PaletteState::new(mode, count, config.generation.max_count, &mut *rng)
            .map_err(|e| CliError::validation(e.to_string()))?;
        self.emit(&state)?;

        let mut timer = AutoRegenerate::new(interval);
        timer.start(Instant::now());
        let mut fired = 0;

        while timer.is_running() {
            if self.ticks.is_some_and(|ticks| fired >= ticks) {
                timer.cancel();
                break;
            }

            if let Some(wait) = timer.time_until_next(Instant::now()) {
                std::thread::sleep(wait);
            }

            if timer.poll(Instant::now()) {
                state.regenerate(&mut *rng);
                fired += 1;
                self.emit(&state)?;
            }
        }

        Ok(())
    }

    fn emit(&self, state: &PaletteState) -> CliResult<()> {
        let snapshot = state.snapshot();
        if self.json {
            let line = serde_json::to_string(&snapshot)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
            println!("{line}");
        } else {
            print_snapshot(&snapshot);
            println!();
        }
        Ok(())
    }
}
