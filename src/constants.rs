//! Application-wide constants.
//!
//! Names, defaults and limits shared by the library and the CLI.

use std::time::Duration;

/// The display name of the application.
pub const APP_NAME: &str = "Palettegen";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "palettegen";

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "palettegen";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "PALETTEGEN_CONFIG_DIR";

/// Number of colors in a freshly created palette.
pub const DEFAULT_PALETTE_SIZE: usize = 5;

/// Largest palette size.
pub const MAX_PALETTE_SIZE: usize = 10;

/// Saved palettes kept by default.
pub const DEFAULT_SAVED_CAPACITY: usize = 10;

/// Capacities accepted for the saved palettes log.
pub const ALLOWED_SAVED_CAPACITIES: [usize; 2] = [5, 10];

/// Key under which saved palettes live in the key-value store.
pub const SAVED_PALETTES_KEY: &str = "savedPalettes";

/// Interval between automatic regenerations.
pub const AUTO_REGENERATE_INTERVAL: Duration = Duration::from_secs(3);

/// Image extraction samples one pixel out of this many.
pub const DEFAULT_SAMPLE_EVERY: usize = 10;
