//! Palettegen - color palette generator
//!
//! Generates, edits, saves and exports color palettes from the command line.

use clap::{Parser, Subcommand};
use palettegen::cli::{
    CliResult, ConfigArgs, ContrastArgs, ConvertArgs, ExportArgs, ExtractArgs, GenerateArgs,
    SavedArgs, SessionArgs, WatchArgs,
};
use palettegen::constants::APP_BINARY_NAME;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Palettegen - color palette generator
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a new palette
    Generate(GenerateArgs),
    /// Convert a color between hex, RGB and HSL
    Convert(ConvertArgs),
    /// Report contrast between colors
    Contrast(ContrastArgs),
    /// Export colors in a stylesheet or data format
    Export(ExportArgs),
    /// Extract dominant colors from an image
    Extract(ExtractArgs),
    /// Manage saved palettes
    Saved(SavedArgs),
    /// Manage configuration
    Config(ConfigArgs),
    /// Regenerate on a fixed interval
    Watch(WatchArgs),
    /// Interactive session reading commands from stdin
    Session(SessionArgs),
}

impl Commands {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Generate(args) => args.execute(),
            Self::Convert(args) => args.execute(),
            Self::Contrast(args) => args.execute(),
            Self::Export(args) => args.execute(),
            Self::Extract(args) => args.execute(),
            Self::Saved(args) => args.execute(),
            Self::Config(args) => args.execute(),
            Self::Watch(args) => args.execute(),
            Self::Session(args) => args.execute(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "palettegen=debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = cli.command.execute() {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
