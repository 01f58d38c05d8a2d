//! Configuration management CLI commands.

use crate::cli::common::{load_config, print_json, CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_NAME;
use crate::models::GenerationMode;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
    /// Print the config file location
    Path,
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Default generation mode
    #[arg(long, value_enum)]
    mode: Option<GenerationMode>,

    /// Default palette size
    #[arg(long)]
    count: Option<usize>,

    /// Largest palette size (up to 10)
    #[arg(long)]
    max_count: Option<usize>,

    /// Number of saved palettes kept (5 or 10)
    #[arg(long)]
    capacity: Option<usize>,

    /// Seconds between automatic regenerations
    #[arg(long, value_name = "SECS")]
    interval: Option<u64>,

    /// Saved palette store file
    #[arg(long, value_name = "FILE")]
    store_file: Option<PathBuf>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path()
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;

        if self.json {
            print_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.mode.is_none()
            && self.count.is_none()
            && self.max_count.is_none()
            && self.capacity.is_none()
            && self.interval.is_none()
            && self.store_file.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --mode, --count, --max-count, --capacity, --interval, or --store-file",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(mode) = self.mode {
            config.generation.default_mode = mode;
        }
        if let Some(max_count) = self.max_count {
            config.generation.max_count = max_count;
        }
        if let Some(count) = self.count {
            config.generation.default_count = count;
        }
        if let Some(capacity) = self.capacity {
            config.storage.saved_capacity = capacity;
        }
        if let Some(interval) = self.interval {
            config.auto.interval_secs = interval;
        }
        if let Some(path) = &self.store_file {
            config.storage.store_file = Some(path.clone());
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully");
        Ok(())
    }
}

fn output_human_readable(config: &Config) {
    println!("{APP_NAME} configuration:");
    println!();
    println!("Generation:");
    println!("  Default mode:  {}", config.generation.default_mode);
    println!("  Default count: {}", config.generation.default_count);
    println!("  Max count:     {}", config.generation.max_count);
    println!();
    println!("Storage:");
    println!("  Saved capacity: {}", config.storage.saved_capacity);
    match config.store_path() {
        Ok(path) => println!("  Store file:     {}", path.display()),
        Err(_) => println!("  Store file:     (unavailable)"),
    }
    println!();
    println!("Auto regenerate:");
    println!("  Interval: {}s", config.auto.interval_secs);
}
