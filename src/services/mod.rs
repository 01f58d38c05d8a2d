//! Service layer for palette logic.
//!
//! Generation, the palette state machine, contrast analysis, image color
//! extraction, persistence and the command session that ties them together.

pub mod auto_regenerate;
pub mod clipboard;
pub mod contrast;
pub mod extractor;
pub mod generators;
pub mod session;
pub mod state;
pub mod storage;

// Re-export commonly used types and functions
pub use auto_regenerate::AutoRegenerate;
pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use contrast::{analyze, ContrastGrade, ContrastPair};
pub use extractor::{decode_image, DecodedImage, ImageColorExtractor};
pub use generators::{generate_batch, generate_color, RandomSource, SequenceSource};
pub use session::{Command, Outcome, Payload, Session};
pub use state::{PaletteSnapshot, PaletteState};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, SavedPalettes};
