//! Contrast report command.

use crate::cli::common::{parse_colors, print_json, CliResult};
use crate::services::contrast::{analyze, ContrastGrade};
use clap::Args;

/// Report WCAG contrast for every pair of colors
#[derive(Debug, Clone, Args)]
pub struct ContrastArgs {
    /// Hex colors, separated by spaces or commas ("-" reads stdin)
    #[arg(value_name = "HEX", required = true)]
    pub colors: Vec<String>,

    /// Only show pairs that fail AA
    #[arg(long)]
    pub failing: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ContrastArgs {
    /// Execute the contrast command
    pub fn execute(&self) -> CliResult<()> {
        let palette = parse_colors(&self.colors)?;
        let pairs: Vec<_> = analyze(&palette)
            .into_iter()
            .filter(|pair| !self.failing || pair.grade == ContrastGrade::Fail)
            .collect();

        if self.json {
            return print_json(&pairs);
        }

        if pairs.is_empty() {
            println!("No color pairs to report");
            return Ok(());
        }

        for pair in &pairs {
            println!(
                "{} / {}  {:.2}:1  {}",
                palette[pair.index_a], palette[pair.index_b], pair.ratio, pair.grade
            );
        }

        Ok(())
    }
}
