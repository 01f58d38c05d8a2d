//! Command surface over a palette state and its saved palettes.
//!
//! A [`Session`] is the single owner of the live [`PaletteState`], the saved
//! palette log and the random source. Every user action is a [`Command`];
//! executing one either applies a full transition and reports the resulting
//! snapshot, or fails and leaves everything as it was.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::PaletteError;
use crate::export::{export_palette, ExportFormat};
use crate::models::{GenerationMode, Hsl, Palette, RgbColor};
use crate::services::contrast::{analyze, ContrastPair};
use crate::services::extractor::ImageColorExtractor;
use crate::services::generators::RandomSource;
use crate::services::state::{PaletteSnapshot, PaletteState};
use crate::services::storage::{KeyValueStore, SavedPalettes};

/// A user action on the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Regenerate unlocked slots
    Generate,
    /// Switch mode and regenerate
    SetMode(GenerationMode),
    /// Resize the palette
    SetCount(usize),
    /// Flip the lock on a slot
    ToggleLock(usize),
    /// Select a slot for HSL editing
    Select(usize),
    /// Drop the selection
    ClearSelection,
    /// Overwrite the selected slot
    ApplyHsl(Hsl),
    /// Shuffle unlocked colors
    Shuffle,
    /// Save the current palette
    Save,
    /// List saved palettes
    ListSaved,
    /// Replace the live palette with a saved one
    LoadSaved(usize),
    /// Delete a saved palette
    DeleteSaved(usize),
    /// Seed the palette from RGBA8 pixels
    ExtractFromImage {
        /// Row-major RGBA bytes
        pixels: Vec<u8>,
        /// Colors wanted; defaults to the current palette length
        count: Option<usize>,
    },
    /// Render the palette in an export format
    Export(ExportFormat),
    /// Pairwise contrast report
    Contrast,
    /// Report the current state only
    Show,
}

/// Extra result carried by some commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Payload {
    /// Nothing beyond the snapshot
    None,
    /// New lock state of a toggled slot
    Locked {
        /// Slot index
        index: usize,
        /// Whether the slot is now locked
        locked: bool,
    },
    /// HSL of a newly selected slot
    Selected(Hsl),
    /// Color written by an HSL edit
    Applied(RgbColor),
    /// Saved palettes, most recent first
    Saved(Vec<Palette>),
    /// A removed saved palette
    Deleted(Palette),
    /// Rendered export text
    Export(String),
    /// Contrast of every slot pair
    Contrast(Vec<ContrastPair>),
}

/// Result of a successful command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    /// State after the command
    pub snapshot: PaletteSnapshot,
    /// Command-specific result
    pub payload: Payload,
}

/// Owner of the live palette, the saved log and the random source.
pub struct Session<S> {
    state: PaletteState,
    saved: SavedPalettes<S>,
    rng: Box<dyn RandomSource>,
    extractor: ImageColorExtractor,
}

impl<S: KeyValueStore> Session<S> {
    /// Creates a session around existing state and storage.
    pub fn new(state: PaletteState, saved: SavedPalettes<S>, rng: Box<dyn RandomSource>) -> Self {
        Self {
            state,
            saved,
            rng,
            extractor: ImageColorExtractor::default(),
        }
    }

    /// Replaces the extractor used by [`Command::ExtractFromImage`].
    #[must_use]
    pub fn with_extractor(mut self, extractor: ImageColorExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// The live palette state.
    pub const fn state(&self) -> &PaletteState {
        &self.state
    }

    /// The saved palette log.
    pub const fn saved(&self) -> &SavedPalettes<S> {
        &self.saved
    }

    /// Runs one command.
    ///
    /// # Errors
    ///
    /// Returns the [`PaletteError`] or storage failure that stopped the
    /// command. A failed command leaves the palette unchanged.
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        debug!(?command, "executing command");
        let result = self.apply(command);
        if let Err(e) = &result {
            warn!(error = %e, "command failed");
        }
        let payload = result?;
        Ok(Outcome {
            snapshot: self.state.snapshot(),
            payload,
        })
    }

    fn apply(&mut self, command: Command) -> Result<Payload> {
        let rng = &mut *self.rng;
        let payload = match command {
            Command::Generate => {
                self.state.regenerate(rng);
                Payload::None
            }
            Command::SetMode(mode) => {
                self.state.set_mode(mode, rng);
                Payload::None
            }
            Command::SetCount(count) => {
                self.state.set_count(count, rng)?;
                Payload::None
            }
            Command::ToggleLock(index) => {
                let locked = self.state.toggle_lock(index)?;
                Payload::Locked { index, locked }
            }
            Command::Select(index) => Payload::Selected(self.state.select(index)?),
            Command::ClearSelection => {
                self.state.clear_selection();
                Payload::None
            }
            Command::ApplyHsl(hsl) => Payload::Applied(self.state.apply_hsl(hsl)?),
            Command::Shuffle => {
                self.state.shuffle(rng);
                Payload::None
            }
            Command::Save => Payload::Saved(self.saved.save(self.state.palette())?),
            Command::ListSaved => Payload::Saved(self.saved.load()?),
            Command::LoadSaved(index) => {
                let palette = self.saved.get(index)?;
                self.state.replace_colors(palette.colors().to_vec())?;
                Payload::None
            }
            Command::DeleteSaved(index) => Payload::Deleted(self.saved.delete(index)?),
            Command::ExtractFromImage { pixels, count } => {
                let count = count.unwrap_or_else(|| self.state.len());
                let colors = self.extractor.extract(&pixels, count);
                if colors.is_empty() {
                    return Err(PaletteError::InvalidCount {
                        count: 0,
                        max: self.state.max_count(),
                    }
                    .into());
                }
                self.state.replace_colors(colors)?;
                Payload::None
            }
            Command::Export(format) => Payload::Export(export_palette(self.state.palette(), format)),
            Command::Contrast => Payload::Contrast(analyze(self.state.palette())),
            Command::Show => Payload::None,
        };
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::generators::SequenceSource;
    use crate::services::storage::MemoryStore;

    fn session_with(colors: &[&str]) -> Session<MemoryStore> {
        let palette = Palette::from_hex_list(colors).unwrap();
        let state = PaletteState::from_palette(palette, GenerationMode::Random, 10).unwrap();
        let saved = SavedPalettes::new(MemoryStore::new(), 5);
        let rng = SequenceSource::new(vec![0.1, 0.4, 0.7, 0.2, 0.9, 0.5]);
        Session::new(state, saved, Box::new(rng))
    }

    #[test]
    fn test_generate_keeps_locked_slot() {
        let mut session = session_with(&["#111111", "#222222", "#333333"]);
        session.execute(Command::ToggleLock(1)).unwrap();
        let outcome = session.execute(Command::Generate).unwrap();
        assert_eq!(outcome.snapshot.colors[1], RgbColor::new(0x22, 0x22, 0x22));
        assert_eq!(outcome.snapshot.locked, vec![1]);
    }

    #[test]
    fn test_toggle_lock_reports_state() {
        let mut session = session_with(&["#111111", "#222222"]);
        let first = session.execute(Command::ToggleLock(0)).unwrap();
        assert_eq!(first.payload, Payload::Locked { index: 0, locked: true });
        let second = session.execute(Command::ToggleLock(0)).unwrap();
        assert_eq!(second.payload, Payload::Locked { index: 0, locked: false });
    }

    #[test]
    fn test_failed_command_leaves_state_unchanged() {
        let mut session = session_with(&["#111111", "#222222"]);
        let before = session.state().snapshot();

        let err = session.execute(Command::ToggleLock(7)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PaletteError>(),
            Some(&PaletteError::IndexOutOfRange { index: 7, len: 2 })
        );
        assert!(session.execute(Command::SetCount(0)).is_err());
        assert!(session.execute(Command::ApplyHsl(Hsl::new(0, 100, 50))).is_err());

        assert_eq!(session.state().snapshot(), before);
    }

    #[test]
    fn test_select_then_apply_hsl() {
        let mut session = session_with(&["#111111", "#222222"]);
        let selected = session.execute(Command::Select(1)).unwrap();
        assert!(matches!(selected.payload, Payload::Selected(_)));

        let applied = session
            .execute(Command::ApplyHsl(Hsl::new(120, 100, 50)))
            .unwrap();
        assert_eq!(applied.payload, Payload::Applied(RgbColor::new(0, 255, 0)));
        assert_eq!(applied.snapshot.colors[1], RgbColor::new(0, 255, 0));
        assert_eq!(applied.snapshot.selected, Some(1));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut session = session_with(&["#AA0000", "#00AA00"]);
        session.execute(Command::Save).unwrap();
        session.execute(Command::Generate).unwrap();

        let outcome = session.execute(Command::LoadSaved(0)).unwrap();
        assert_eq!(
            outcome.snapshot.colors.to_hex_list(),
            vec!["#AA0000", "#00AA00"]
        );
    }

    #[test]
    fn test_saved_capacity_is_respected() {
        let mut session = session_with(&["#AA0000"]);
        for _ in 0..7 {
            session.execute(Command::Save).unwrap();
        }
        let outcome = session.execute(Command::ListSaved).unwrap();
        let Payload::Saved(list) = outcome.payload else {
            panic!("expected saved list");
        };
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_delete_saved() {
        let mut session = session_with(&["#AA0000"]);
        session.execute(Command::Save).unwrap();
        let outcome = session.execute(Command::DeleteSaved(0)).unwrap();
        assert_eq!(
            outcome.payload,
            Payload::Deleted(Palette::from_hex_list(&["#AA0000"]).unwrap())
        );
        assert!(session.saved().load().unwrap().is_empty());
        assert!(session.execute(Command::DeleteSaved(0)).is_err());
    }

    #[test]
    fn test_extract_replaces_palette() {
        let mut session = session_with(&["#111111", "#222222"])
            .with_extractor(ImageColorExtractor::with_sample_every(1));
        session.execute(Command::ToggleLock(1)).unwrap();

        // red, green, red, red
        let pixels = vec![
            255, 0, 0, 255, 0, 255, 0, 255, 255, 0, 0, 255, 255, 0, 0, 255,
        ];
        let outcome = session
            .execute(Command::ExtractFromImage {
                pixels,
                count: Some(3),
            })
            .unwrap();
        assert_eq!(
            outcome.snapshot.colors.to_hex_list(),
            vec!["#FF0000", "#00FF00"]
        );
        assert_eq!(outcome.snapshot.locked, vec![1]);
    }

    #[test]
    fn test_extract_from_empty_image_fails() {
        let mut session = session_with(&["#111111"]);
        let err = session
            .execute(Command::ExtractFromImage {
                pixels: Vec::new(),
                count: None,
            })
            .unwrap_err();
        assert!(err.downcast_ref::<PaletteError>().is_some());
        assert_eq!(session.state().palette().to_hex_list(), vec!["#111111"]);
    }

    #[test]
    fn test_export_and_contrast_payloads() {
        let mut session = session_with(&["#000000", "#FFFFFF"]);
        let export = session.execute(Command::Export(ExportFormat::Text)).unwrap();
        assert_eq!(export.payload, Payload::Export("#000000\n#FFFFFF\n".to_string()));

        let contrast = session.execute(Command::Contrast).unwrap();
        let Payload::Contrast(pairs) = contrast.payload else {
            panic!("expected contrast pairs");
        };
        assert_eq!(pairs.len(), 1);
        assert!((pairs[0].ratio - 21.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_mode_changes_mode() {
        let mut session = session_with(&["#000000", "#FFFFFF", "#808080"]);
        let outcome = session
            .execute(Command::SetMode(GenerationMode::Pastel))
            .unwrap();
        assert_eq!(outcome.snapshot.mode, GenerationMode::Pastel);
        assert_eq!(outcome.snapshot.colors.len(), 3);
    }

    #[test]
    fn test_outcome_serializes_payload_tag() {
        let mut session = session_with(&["#000000"]);
        let outcome = session.execute(Command::ToggleLock(0)).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["payload"]["kind"], "locked");
        assert_eq!(json["payload"]["value"]["locked"], true);
        assert_eq!(json["snapshot"]["colors"][0], "#000000");
    }
}
