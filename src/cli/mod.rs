//! CLI command handlers for Palettegen.
//!
//! Every subcommand is a clap `Args` struct with an `execute` method returning
//! [`CliResult`]. Errors carry the process exit code.

pub mod common;
pub mod config;
pub mod contrast;
pub mod convert;
pub mod export;
pub mod extract;
pub mod generate;
pub mod saved;
pub mod session;
pub mod watch;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use contrast::ContrastArgs;
pub use convert::ConvertArgs;
pub use export::ExportArgs;
pub use extract::ExtractArgs;
pub use generate::GenerateArgs;
pub use saved::SavedArgs;
pub use session::SessionArgs;
pub use watch::WatchArgs;
