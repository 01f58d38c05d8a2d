//! Saved palette commands.

use crate::cli::common::{
    classify, format_color_line, load_config, open_saved, parse_colors, print_json, CliResult,
};
use crate::export::{export_palette, ExportFormat};
use clap::{Args, Subcommand};

/// Manage saved palettes
#[derive(Args, Debug)]
pub struct SavedArgs {
    #[command(subcommand)]
    command: SavedCommand,
}

#[derive(Subcommand, Debug)]
enum SavedCommand {
    /// List saved palettes, most recent first
    List(SavedListArgs),
    /// Save colors as a new palette
    Add(SavedAddArgs),
    /// Show one saved palette
    Show(SavedShowArgs),
    /// Delete a saved palette by index
    Delete(SavedIndexArgs),
    /// Delete every saved palette
    Clear,
}

/// List saved palettes
#[derive(Args, Debug)]
pub struct SavedListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Save colors as a new palette
#[derive(Args, Debug)]
pub struct SavedAddArgs {
    /// Hex colors, separated by spaces or commas ("-" reads stdin)
    #[arg(value_name = "HEX", required = true)]
    colors: Vec<String>,
}

/// Show one saved palette
#[derive(Args, Debug)]
pub struct SavedShowArgs {
    /// Position in the list (0 is the most recent)
    index: usize,

    /// Render in an export format
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,
}

/// Delete a saved palette
#[derive(Args, Debug)]
pub struct SavedIndexArgs {
    /// Position in the list (0 is the most recent)
    index: usize,
}

impl SavedArgs {
    /// Execute saved subcommand
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let mut saved = open_saved(&config)?;

        match &self.command {
            SavedCommand::List(args) => {
                let palettes = saved.load().map_err(|e| classify(&e))?;
                if args.json {
                    return print_json(&palettes);
                }
                if palettes.is_empty() {
                    println!("No saved palettes");
                }
                for (i, palette) in palettes.iter().enumerate() {
                    println!("{i}: {palette}");
                }
            }
            SavedCommand::Add(args) => {
                let palette = parse_colors(&args.colors)?;
                let palettes = saved.save(&palette).map_err(|e| classify(&e))?;
                println!(
                    "Saved palette ({} of {} slots used)",
                    palettes.len(),
                    saved.capacity()
                );
            }
            SavedCommand::Show(args) => {
                let palette = saved.get(args.index).map_err(|e| classify(&e))?;
                match args.format {
                    Some(format) => print!("{}", export_palette(&palette, format)),
                    None => {
                        for (i, color) in palette.iter().enumerate() {
                            println!("{}", format_color_line(i, *color, false));
                        }
                    }
                }
            }
            SavedCommand::Delete(args) => {
                let removed = saved.delete(args.index).map_err(|e| classify(&e))?;
                println!("Deleted palette {}: {removed}", args.index);
            }
            SavedCommand::Clear => {
                saved.clear().map_err(|e| classify(&e))?;
                println!("Cleared saved palettes");
            }
        }

        Ok(())
    }
}
