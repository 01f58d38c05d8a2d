//! Shared types and helpers for CLI commands.

use std::fmt;
use std::io::Read;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::Config;
use crate::models::{Hsl, Palette, RgbColor};
use crate::services::clipboard::Clipboard;
use crate::services::generators::RandomSource;
use crate::services::state::PaletteSnapshot;
use crate::services::storage::{JsonFileStore, SavedPalettes};

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Bad input: unparsable colors, out-of-range indices, invalid config
    Validation = 1,
    /// File, store, image or clipboard failure
    Io = 2,
}

/// Error returned from CLI commands, carrying its exit code.
#[derive(Debug)]
pub struct CliError {
    /// Exit code for the process
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Input validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// I/O or environment failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Io,
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind as i32
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Maps a core error onto an exit code.
///
/// Errors rooted in a `PaletteError` are validation failures; everything
/// else is treated as I/O.
pub fn classify(error: &anyhow::Error) -> CliError {
    if error.downcast_ref::<crate::error::PaletteError>().is_some() {
        CliError::validation(format!("{error:#}"))
    } else {
        CliError::io(format!("{error:#}"))
    }
}

/// Loads the configuration, treating a broken file as a validation error.
pub fn load_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

/// Opens the saved palette log configured in `config`.
pub fn open_saved(config: &Config) -> CliResult<SavedPalettes<JsonFileStore>> {
    let path = config
        .store_path()
        .map_err(|e| CliError::io(format!("Failed to resolve store path: {e:#}")))?;
    Ok(SavedPalettes::new(
        JsonFileStore::new(path),
        config.storage.saved_capacity,
    ))
}

/// Seeded generator when `seed` is given, entropy-seeded otherwise.
pub fn make_rng(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::rng()),
    }
}

/// Parses hex colors given on the command line.
///
/// Each argument may hold several colors separated by commas or spaces. A
/// single `-` reads the list from stdin.
pub fn parse_colors(args: &[String]) -> CliResult<Palette> {
    let mut tokens: Vec<String> = Vec::new();
    for arg in args {
        if arg == "-" {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read colors from stdin")
                .map_err(|e| CliError::io(format!("{e:#}")))?;
            tokens.extend(split_colors(&input));
        } else {
            tokens.extend(split_colors(arg));
        }
    }

    if tokens.is_empty() {
        return Err(CliError::validation("At least one color is required"));
    }

    Palette::from_hex_list(&tokens).map_err(|e| CliError::validation(e.to_string()))
}

fn split_colors(input: &str) -> impl Iterator<Item = String> + '_ {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

/// One line per color: index, hex, RGB and HSL.
pub fn format_color_line(index: usize, color: RgbColor, locked: bool) -> String {
    let marker = if locked { " [locked]" } else { "" };
    format!(
        "{index}  {}  rgb({}, {}, {})  {}{marker}",
        color.to_hex(),
        color.r,
        color.g,
        color.b,
        Hsl::from_rgb(color)
    )
}

/// Prints a palette snapshot in human-readable form.
pub fn print_snapshot(snapshot: &PaletteSnapshot) {
    println!("Mode: {}", snapshot.mode);
    for (i, color) in snapshot.colors.iter().enumerate() {
        println!(
            "{}",
            format_color_line(i, *color, snapshot.locked.contains(&i))
        );
    }
    if let (Some(index), Some(hsl)) = (snapshot.selected, snapshot.selected_hsl) {
        println!("Selected: {index} {hsl}");
    }
}

/// Copies rendered output and confirms on stderr.
pub fn copy_output(clipboard: &mut dyn Clipboard, text: &str) -> CliResult<()> {
    clipboard
        .copy(text)
        .map_err(|e| CliError::io(format!("{e:#}")))?;
    eprintln!("Copied to clipboard");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaletteError;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::validation("bad").exit_code(), 1);
        assert_eq!(CliError::io("disk").exit_code(), 2);
        assert_eq!(ExitCode::Success as i32, 0);
    }

    #[test]
    fn test_classify() {
        let palette_err = anyhow::Error::from(PaletteError::NoSelection);
        assert_eq!(classify(&palette_err).kind, ExitCode::Validation);
        let other = anyhow::anyhow!("disk full");
        assert_eq!(classify(&other).kind, ExitCode::Io);
    }

    #[test]
    fn test_parse_colors_splits_commas_and_spaces() {
        let args = vec!["#000000,#FFFFFF".to_string(), "FF0000 00ff00".to_string()];
        let palette = parse_colors(&args).unwrap();
        assert_eq!(
            palette.to_hex_list(),
            vec!["#000000", "#FFFFFF", "#FF0000", "#00FF00"]
        );
    }

    #[test]
    fn test_parse_colors_rejects_bad_input() {
        assert!(parse_colors(&[]).is_err());
        let err = parse_colors(&["#GGGGGG".to_string()]).unwrap_err();
        assert_eq!(err.kind, ExitCode::Validation);
    }

    #[test]
    fn test_format_color_line() {
        assert_eq!(
            format_color_line(0, RgbColor::new(255, 0, 0), true),
            "0  #FF0000  rgb(255, 0, 0)  hsl(0, 100%, 50%) [locked]"
        );
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let mut a = make_rng(Some(7));
        let mut b = make_rng(Some(7));
        assert!((a.next_f64() - b.next_f64()).abs() < f64::EPSILON);
    }

    struct UnavailableClipboard;

    impl Clipboard for UnavailableClipboard {
        fn copy(&mut self, _text: &str) -> anyhow::Result<()> {
            anyhow::bail!("no display")
        }
    }

    #[test]
    fn test_copy_output() {
        let mut clipboard = crate::services::clipboard::MemoryClipboard::default();
        copy_output(&mut clipboard, "#123456").unwrap();
        assert_eq!(clipboard.contents(), Some("#123456"));

        let err = copy_output(&mut UnavailableClipboard, "#123456").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message.contains("no display"));
    }
}
