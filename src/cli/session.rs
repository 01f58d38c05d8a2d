//! Interactive palette session driven by line commands.
//!
//! Each input line is one command. After every command the resulting state
//! is printed, either as a listing or as one JSON object per line.

use crate::cli::common::{
    load_config, make_rng, open_saved, parse_colors, print_snapshot, CliError, CliResult,
};
use crate::constants::DEFAULT_SAMPLE_EVERY;
use crate::export::ExportFormat;
use crate::models::{GenerationMode, Hsl};
use crate::services::extractor::{decode_image, ImageColorExtractor};
use crate::services::session::{Command, Outcome, Payload, Session};
use crate::services::state::PaletteState;
use crate::services::storage::KeyValueStore;
use clap::Args;
use serde_json::json;
use std::io::BufRead;
use std::path::PathBuf;

const HELP: &str = "\
Commands (indices are 0-based):
  generate | g          regenerate unlocked colors
  mode <name>           switch mode and regenerate
  count <n>             resize the palette
  lock <i>              toggle the lock on a color
  select <i>            select a color for editing
  deselect              clear the selection
  hsl <h> <s> <l>       set the selected color
  shuffle               shuffle unlocked colors
  save                  save the palette
  saved                 list saved palettes
  load <i>              load a saved palette
  delete <i>            delete a saved palette
  image <path> [n]      take colors from an image
  export [format]       render as css, scss, json, js, text or markdown
  contrast              pairwise contrast report
  show                  print the palette
  help                  this text
  quit                  end the session";

/// Run an interactive session reading commands from stdin
#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    /// Generation mode (defaults to the configured mode)
    #[arg(short, long, value_enum)]
    pub mode: Option<GenerationMode>,

    /// Number of colors (defaults to the configured count)
    #[arg(short, long)]
    pub count: Option<usize>,

    /// Start from these colors instead of a fresh palette
    #[arg(long = "from", value_name = "HEX", num_args = 1..)]
    pub from: Vec<String>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sample one pixel out of every N for `image`
    #[arg(long, value_name = "N", default_value_t = DEFAULT_SAMPLE_EVERY)]
    pub sample_every: usize,

    /// Print one JSON object per command
    #[arg(long)]
    pub json: bool,
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionLine {
    Blank,
    Help,
    Quit,
    Run(Command),
    Image { path: PathBuf, count: Option<usize> },
}

impl SessionArgs {
    /// Execute the session command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let mode = self.mode.unwrap_or(config.generation.default_mode);
        let max_count = config.generation.max_count;
        let mut rng = make_rng(self.seed);

        let state = if self.from.is_empty() {
            let count = self.count.unwrap_or(config.generation.default_count);
            PaletteState::new(mode, count, max_count, &mut *rng)
        } else {
            PaletteState::from_palette(parse_colors(&self.from)?, mode, max_count)
        }
        .map_err(|e| CliError::validation(e.to_string()))?;

        let mut session = Session::new(state, open_saved(&config)?, rng)
            .with_extractor(ImageColorExtractor::with_sample_every(self.sample_every));

        let mut failures = 0usize;
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = line.map_err(|e| CliError::io(format!("Failed to read input: {e}")))?;
            match parse_line(&line) {
                Ok(SessionLine::Blank) => {}
                Ok(SessionLine::Help) => println!("{HELP}"),
                Ok(SessionLine::Quit) => break,
                Ok(SessionLine::Run(command)) => {
                    if !self.run(&mut session, command) {
                        failures += 1;
                    }
                }
                Ok(SessionLine::Image { path, count }) => match decode_image(&path) {
                    Ok(image) => {
                        let command = Command::ExtractFromImage {
                            pixels: image.pixels,
                            count,
                        };
                        if !self.run(&mut session, command) {
                            failures += 1;
                        }
                    }
                    Err(e) => {
                        self.report_error(&format!("{e:#}"));
                        failures += 1;
                    }
                },
                Err(message) => {
                    self.report_error(&message);
                    failures += 1;
                }
            }
        }

        if failures > 0 {
            return Err(CliError::validation(format!(
                "{failures} command(s) failed"
            )));
        }
        Ok(())
    }

    fn run<S: KeyValueStore>(&self, session: &mut Session<S>, command: Command) -> bool {
        match session.execute(command) {
            Ok(outcome) => {
                self.report(&outcome);
                true
            }
            Err(e) => {
                self.report_error(&format!("{e:#}"));
                false
            }
        }
    }

    fn report(&self, outcome: &Outcome) {
        if self.json {
            match serde_json::to_string(outcome) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("Error: Failed to serialize JSON: {e}"),
            }
            return;
        }

        match &outcome.payload {
            Payload::None | Payload::Selected(_) | Payload::Applied(_) => {}
            Payload::Locked { index, locked } => {
                println!("{} {index}", if *locked { "Locked" } else { "Unlocked" });
            }
            Payload::Saved(palettes) => {
                for (i, palette) in palettes.iter().enumerate() {
                    println!("saved {i}: {palette}");
                }
            }
            Payload::Deleted(palette) => println!("Deleted {palette}"),
            Payload::Export(text) => {
                print!("{text}");
                return;
            }
            Payload::Contrast(pairs) => {
                let colors = &outcome.snapshot.colors;
                for pair in pairs {
                    println!(
                        "{} / {}  {:.2}:1  {}",
                        colors[pair.index_a], colors[pair.index_b], pair.ratio, pair.grade
                    );
                }
                return;
            }
        }
        print_snapshot(&outcome.snapshot);
    }

    fn report_error(&self, message: &str) {
        if self.json {
            println!("{}", json!({ "error": message }));
        } else {
            eprintln!("Error: {message}");
        }
    }
}

fn parse_line(line: &str) -> Result<SessionLine, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(SessionLine::Blank);
    };
    let args: Vec<&str> = words.collect();
    let verb = verb.to_ascii_lowercase();

    let command = match (verb.as_str(), args.as_slice()) {
        ("help" | "?", []) => return Ok(SessionLine::Help),
        ("quit" | "exit" | "q", []) => return Ok(SessionLine::Quit),
        ("generate" | "g", []) => Command::Generate,
        ("mode", [name]) => Command::SetMode(name.parse()?),
        ("count", [n]) => Command::SetCount(parse_number(n)?),
        ("lock", [i]) => Command::ToggleLock(parse_number(i)?),
        ("select", [i]) => Command::Select(parse_number(i)?),
        ("deselect", []) => Command::ClearSelection,
        ("hsl", [h, s, l]) => Command::ApplyHsl(parse_hsl(h, s, l)?),
        ("shuffle", []) => Command::Shuffle,
        ("save", []) => Command::Save,
        ("saved", []) => Command::ListSaved,
        ("load", [i]) => Command::LoadSaved(parse_number(i)?),
        ("delete", [i]) => Command::DeleteSaved(parse_number(i)?),
        ("export", []) => Command::Export(ExportFormat::default()),
        ("export", [format]) => Command::Export(format.parse()?),
        ("contrast", []) => Command::Contrast,
        ("show", []) => Command::Show,
        ("image", [path]) => {
            return Ok(SessionLine::Image {
                path: PathBuf::from(path),
                count: None,
            })
        }
        ("image", [path, n]) => {
            return Ok(SessionLine::Image {
                path: PathBuf::from(path),
                count: Some(parse_number(n)?),
            })
        }
        _ => return Err(format!("Unknown command or wrong arguments: {line}")),
    };

    Ok(SessionLine::Run(command))
}

fn parse_number(input: &str) -> Result<usize, String> {
    input
        .parse()
        .map_err(|_| format!("Expected a non-negative number, got '{input}'"))
}

fn parse_hsl(h: &str, s: &str, l: &str) -> Result<Hsl, String> {
    let h: u16 = h.parse().map_err(|_| format!("Invalid hue '{h}'"))?;
    let s: u8 = s.parse().map_err(|_| format!("Invalid saturation '{s}'"))?;
    let l: u8 = l.parse().map_err(|_| format!("Invalid lightness '{l}'"))?;
    if h > 359 || s > 100 || l > 100 {
        return Err(format!(
            "HSL out of range: hue must be 0-359, saturation and lightness 0-100 (got {h} {s} {l})"
        ));
    }
    Ok(Hsl::new(h, s, l))
}
