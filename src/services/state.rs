//! Authoritative in-memory palette with locking and selection.
//!
//! `PaletteState` owns the current colors, the set of locked slot indices and
//! the optional selected slot. Every user-facing transition goes through it,
//! and it keeps locks and selection consistent with the palette length.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

use crate::error::{PaletteError, PaletteResult};
use crate::models::{GenerationMode, Hsl, Palette, RgbColor};
use crate::services::generators::{generate_batch, generate_color, RandomSource};

/// Draws per position before [`PaletteState::shuffle`] leaves it in place.
pub const MAX_SHUFFLE_REDRAWS: usize = 64;

/// Serializable view of a [`PaletteState`] after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteSnapshot {
    /// Active generation mode
    pub mode: GenerationMode,
    /// Current colors in slot order
    pub colors: Palette,
    /// Locked slot indices, ascending
    pub locked: Vec<usize>,
    /// Selected slot, if any
    pub selected: Option<usize>,
    /// HSL of the selected slot, if any
    pub selected_hsl: Option<Hsl>,
}

/// Palette, lock set and selection.
#[derive(Debug, Clone)]
pub struct PaletteState {
    palette: Palette,
    locked: BTreeSet<usize>,
    selected: Option<usize>,
    mode: GenerationMode,
    max_count: usize,
}

impl PaletteState {
    /// Creates a state with `count` freshly generated colors.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidCount`] unless `1 <= count <= max_count`.
    pub fn new<R: RandomSource + ?Sized>(
        mode: GenerationMode,
        count: usize,
        max_count: usize,
        rng: &mut R,
    ) -> PaletteResult<Self> {
        check_count(count, max_count)?;
        let palette = Palette::new(generate_batch(mode, count, rng));
        debug!(%mode, count, "created palette");
        Ok(Self {
            palette,
            locked: BTreeSet::new(),
            selected: None,
            mode,
            max_count,
        })
    }

    /// Creates a state around an existing palette, for example a saved one.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidCount`] if the palette is empty or longer
    /// than `max_count`.
    pub fn from_palette(
        palette: Palette,
        mode: GenerationMode,
        max_count: usize,
    ) -> PaletteResult<Self> {
        check_count(palette.len(), max_count)?;
        Ok(Self {
            palette,
            locked: BTreeSet::new(),
            selected: None,
            mode,
            max_count,
        })
    }

    /// Current palette.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.palette.len()
    }

    /// Always false for a constructed state; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.palette.is_empty()
    }

    /// Active generation mode.
    #[must_use]
    pub const fn mode(&self) -> GenerationMode {
        self.mode
    }

    /// Largest palette size accepted by [`Self::set_count`].
    #[must_use]
    pub const fn max_count(&self) -> usize {
        self.max_count
    }

    /// Returns true if slot `index` is locked.
    #[must_use]
    pub fn is_locked(&self, index: usize) -> bool {
        self.locked.contains(&index)
    }

    /// Locked slot indices in ascending order.
    #[must_use]
    pub fn locked_indices(&self) -> Vec<usize> {
        self.locked.iter().copied().collect()
    }

    /// Selected slot, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// HSL of the selected color, if a slot is selected.
    #[must_use]
    pub fn selected_hsl(&self) -> Option<Hsl> {
        self.selected
            .and_then(|i| self.palette.get(i))
            .map(Hsl::from_rgb)
    }

    /// Resizes the palette to `count` slots.
    ///
    /// Existing colors are kept. New slots are generated with the current
    /// mode; for coherent-batch modes they come from the tail of a fresh batch
    /// of the new size. Locks and selection pointing past the new end are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidCount`] unless `1 <= count <= max_count`.
    pub fn set_count<R: RandomSource + ?Sized>(
        &mut self,
        count: usize,
        rng: &mut R,
    ) -> PaletteResult<()> {
        check_count(count, self.max_count)?;
        let old_len = self.len();

        if count < old_len {
            self.palette.colors_mut().truncate(count);
        } else if count > old_len {
            let fresh: Vec<RgbColor> = if self.mode.is_coherent_batch() {
                generate_batch(self.mode, count, rng)
                    .into_iter()
                    .skip(old_len)
                    .collect()
            } else {
                (old_len..count)
                    .map(|_| generate_color(self.mode, rng))
                    .collect()
            };
            self.palette.colors_mut().extend(fresh);
        }

        self.trim_to_len();
        debug!(old_len, count, "resized palette");
        Ok(())
    }

    /// Switches the generation mode and regenerates immediately.
    pub fn set_mode<R: RandomSource + ?Sized>(&mut self, mode: GenerationMode, rng: &mut R) {
        self.mode = mode;
        debug!(%mode, "mode changed");
        self.regenerate(rng);
    }

    /// Draws new colors for the palette.
    ///
    /// Independent-slot modes keep every locked slot and redraw the rest.
    /// Coherent-batch modes replace the whole palette in one batch and ignore
    /// locks, since every slot derives from one shared base hue. Lock
    /// membership itself is left untouched.
    pub fn regenerate<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let mode = self.mode;
        if mode.is_coherent_batch() {
            *self.palette.colors_mut() = generate_batch(mode, self.len(), rng);
            debug!(%mode, locked = self.locked.len(), "regenerated batch, locks bypassed");
            return;
        }

        let locked = &self.locked;
        for (i, color) in self.palette.colors_mut().iter_mut().enumerate() {
            if !locked.contains(&i) {
                *color = generate_color(mode, rng);
            }
        }
        debug!(%mode, locked = self.locked.len(), "regenerated palette");
    }

    /// Flips the lock on slot `index` and returns the new lock state.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::IndexOutOfRange`] if `index` is past the end.
    pub fn toggle_lock(&mut self, index: usize) -> PaletteResult<bool> {
        self.palette.try_get(index)?;
        let now_locked = if self.locked.remove(&index) {
            false
        } else {
            self.locked.insert(index);
            true
        };
        debug!(index, now_locked, "toggled lock");
        Ok(now_locked)
    }

    /// Selects slot `index` for HSL editing and returns its HSL.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::IndexOutOfRange`] if `index` is past the end.
    /// The previous selection is kept in that case.
    pub fn select(&mut self, index: usize) -> PaletteResult<Hsl> {
        let color = self.palette.try_get(index)?;
        self.selected = Some(index);
        debug!(index, "selected slot");
        Ok(Hsl::from_rgb(color))
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Overwrites the selected slot with the color for `hsl`.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::NoSelection`] without touching the palette if no
    /// slot is selected.
    pub fn apply_hsl(&mut self, hsl: Hsl) -> PaletteResult<RgbColor> {
        let index = self.selected.ok_or(PaletteError::NoSelection)?;
        let color = hsl.to_rgb();
        let len = self.len();
        let slot = self
            .palette
            .colors_mut()
            .get_mut(index)
            .ok_or(PaletteError::IndexOutOfRange { index, len })?;
        *slot = color;
        debug!(index, %hsl, %color, "applied hsl");
        Ok(color)
    }

    /// Shuffles unlocked colors among unlocked positions.
    ///
    /// Fisher-Yates from the back; for each unlocked position the swap target
    /// is re-drawn until it is also unlocked. Locked slots keep both their
    /// color and their position. After [`MAX_SHUFFLE_REDRAWS`] locked draws
    /// the position stays where it is.
    pub fn shuffle<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let len = self.len();
        for i in (1..len).rev() {
            if self.locked.contains(&i) {
                continue;
            }
            let j = (0..MAX_SHUFFLE_REDRAWS)
                .map(|_| rng.index(i + 1))
                .find(|candidate| !self.locked.contains(candidate))
                .unwrap_or(i);
            self.palette.colors_mut().swap(i, j);
        }
        debug!(len, locked = self.locked.len(), "shuffled palette");
    }

    /// Installs colors produced elsewhere, unconditionally.
    ///
    /// Used for results that arrive after other transitions, such as image
    /// extraction. The last writer wins; locks and selection past the new end
    /// are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidCount`] if `colors` is empty or longer
    /// than the configured maximum.
    pub fn replace_colors(&mut self, colors: Vec<RgbColor>) -> PaletteResult<()> {
        check_count(colors.len(), self.max_count)?;
        let count = colors.len();
        self.palette = Palette::new(colors);
        self.trim_to_len();
        debug!(count, "replaced palette colors");
        Ok(())
    }

    /// Captures the current state.
    #[must_use]
    pub fn snapshot(&self) -> PaletteSnapshot {
        PaletteSnapshot {
            mode: self.mode,
            colors: self.palette.clone(),
            locked: self.locked_indices(),
            selected: self.selected,
            selected_hsl: self.selected_hsl(),
        }
    }

    fn trim_to_len(&mut self) {
        let len = self.len();
        self.locked.retain(|&i| i < len);
        if self.selected.is_some_and(|i| i >= len) {
            self.selected = None;
        }
    }
}

const fn check_count(count: usize, max: usize) -> PaletteResult<()> {
    if count == 0 || count > max {
        return Err(PaletteError::InvalidCount { count, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hsl_to_rgb;
    use crate::services::generators::SequenceSource;

    const BLACK: RgbColor = RgbColor::BLACK;
    const WHITE: RgbColor = RgbColor::WHITE;

    fn black_state(count: usize) -> PaletteState {
        let mut zeros = SequenceSource::new(vec![0.0]);
        PaletteState::new(GenerationMode::Random, count, 10, &mut zeros).unwrap()
    }

    fn distinct_state() -> PaletteState {
        let colors = vec![
            RgbColor::new(1, 0, 0),
            RgbColor::new(2, 0, 0),
            RgbColor::new(3, 0, 0),
            RgbColor::new(4, 0, 0),
            RgbColor::new(5, 0, 0),
        ];
        PaletteState::from_palette(Palette::new(colors), GenerationMode::Random, 10).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_counts() {
        let mut rng = SequenceSource::new(vec![0.3]);
        assert_eq!(
            PaletteState::new(GenerationMode::Random, 0, 10, &mut rng).unwrap_err(),
            PaletteError::InvalidCount { count: 0, max: 10 }
        );
        assert!(PaletteState::new(GenerationMode::Random, 11, 10, &mut rng).is_err());
        assert_eq!(
            PaletteState::new(GenerationMode::Random, 10, 10, &mut rng)
                .unwrap()
                .len(),
            10
        );
    }

    #[test]
    fn test_regenerate_keeps_locked_slots() {
        let mut state = black_state(5);
        state.toggle_lock(1).unwrap();
        state.toggle_lock(3).unwrap();

        let mut ones = SequenceSource::new(vec![0.99]);
        state.regenerate(&mut ones);

        let colors = state.palette().colors();
        assert_eq!(colors[1], BLACK);
        assert_eq!(colors[3], BLACK);
        for i in [0, 2, 4] {
            assert_eq!(colors[i], WHITE, "slot {i} should have been redrawn");
        }
    }

    #[test]
    fn test_regenerate_batch_mode_ignores_locks() {
        let mut state = black_state(3);
        assert!(state.toggle_lock(0).unwrap());

        // base hue 0.25 -> 90 degrees, s/l draws 0.5
        let mut rng = SequenceSource::new(vec![0.25, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5]);
        state.set_mode(GenerationMode::Triadic, &mut rng);

        let colors = state.palette().colors();
        assert_ne!(colors[0], BLACK);
        assert_eq!(colors[0], hsl_to_rgb(90.0, 65.0, 55.0));
        assert_eq!(colors[1], hsl_to_rgb(210.0, 65.0, 55.0));
        assert_eq!(colors[2], hsl_to_rgb(330.0, 65.0, 55.0));
        // The pin itself survives, it just has no effect here
        assert!(state.is_locked(0));
    }

    #[test]
    fn test_set_mode_regenerates() {
        let mut state = black_state(4);
        let mut rng = SequenceSource::new(vec![0.99]);
        state.set_mode(GenerationMode::Random, &mut rng);
        assert!(state.palette().iter().all(|c| *c == WHITE));
        assert_eq!(state.mode(), GenerationMode::Random);
    }

    #[test]
    fn test_toggle_lock_out_of_range() {
        let mut state = black_state(3);
        assert_eq!(
            state.toggle_lock(3).unwrap_err(),
            PaletteError::IndexOutOfRange { index: 3, len: 3 }
        );
        assert!(state.locked_indices().is_empty());
    }

    #[test]
    fn test_toggle_lock_flips() {
        let mut state = black_state(3);
        assert!(state.toggle_lock(2).unwrap());
        assert!(state.is_locked(2));
        assert!(!state.toggle_lock(2).unwrap());
        assert!(!state.is_locked(2));
    }

    #[test]
    fn test_set_count_shrinks_and_drops_locks_and_selection() {
        let mut state = distinct_state();
        state.toggle_lock(1).unwrap();
        state.toggle_lock(4).unwrap();
        state.select(3).unwrap();

        let mut rng = SequenceSource::new(vec![0.0]);
        state.set_count(3, &mut rng).unwrap();

        assert_eq!(state.len(), 3);
        assert_eq!(state.locked_indices(), vec![1]);
        assert_eq!(state.selected(), None);
        assert_eq!(state.palette()[2], RgbColor::new(3, 0, 0));
    }

    #[test]
    fn test_set_count_grows_with_new_colors() {
        let mut state = distinct_state();
        state.select(2).unwrap();
        let mut rng = SequenceSource::new(vec![0.99]);
        state.set_count(7, &mut rng).unwrap();

        assert_eq!(state.len(), 7);
        assert_eq!(state.palette()[4], RgbColor::new(5, 0, 0));
        assert_eq!(state.palette()[5], WHITE);
        assert_eq!(state.palette()[6], WHITE);
        assert_eq!(state.selected(), Some(2));
    }

    #[test]
    fn test_set_count_grows_batch_mode_from_batch_tail() {
        let colors = vec![BLACK, BLACK];
        let mut state =
            PaletteState::from_palette(Palette::new(colors), GenerationMode::Triadic, 10).unwrap();
        let mut rng = SequenceSource::new(vec![0.25, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5]);
        state.set_count(3, &mut rng).unwrap();

        assert_eq!(state.palette()[0], BLACK);
        assert_eq!(state.palette()[2], hsl_to_rgb(330.0, 65.0, 55.0));
    }

    #[test]
    fn test_set_count_rejects_out_of_bounds() {
        let mut state = distinct_state();
        let mut rng = SequenceSource::new(vec![0.0]);
        assert!(state.set_count(0, &mut rng).is_err());
        assert!(state.set_count(11, &mut rng).is_err());
        assert_eq!(state.len(), 5);
    }

    #[test]
    fn test_select_returns_hsl() {
        let colors = vec![RgbColor::new(255, 0, 0), RgbColor::new(0, 0, 255)];
        let mut state =
            PaletteState::from_palette(Palette::new(colors), GenerationMode::Random, 10).unwrap();
        assert_eq!(state.select(1).unwrap(), Hsl::new(240, 100, 50));
        assert_eq!(state.selected_hsl(), Some(Hsl::new(240, 100, 50)));
    }

    #[test]
    fn test_select_out_of_range_keeps_previous() {
        let mut state = distinct_state();
        state.select(1).unwrap();
        assert!(matches!(
            state.select(9),
            Err(PaletteError::IndexOutOfRange { index: 9, len: 5 })
        ));
        assert_eq!(state.selected(), Some(1));
    }

    #[test]
    fn test_apply_hsl_overwrites_selected() {
        let mut state = distinct_state();
        state.select(2).unwrap();
        let color = state.apply_hsl(Hsl::new(120, 100, 50)).unwrap();
        assert_eq!(color, RgbColor::new(0, 255, 0));
        assert_eq!(state.palette()[2], color);
        assert_eq!(state.palette()[1], RgbColor::new(2, 0, 0));
    }

    #[test]
    fn test_apply_hsl_without_selection_is_noop() {
        let mut state = distinct_state();
        let before = state.snapshot();
        assert_eq!(
            state.apply_hsl(Hsl::new(10, 10, 10)).unwrap_err(),
            PaletteError::NoSelection
        );
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_shuffle_all_locked_is_identity() {
        let mut state = distinct_state();
        for i in 0..5 {
            state.toggle_lock(i).unwrap();
        }
        let before = state.palette().clone();
        let mut rng = SequenceSource::new(vec![0.0, 0.3, 0.7]);
        state.shuffle(&mut rng);
        assert_eq!(state.palette(), &before);
    }

    #[test]
    fn test_shuffle_keeps_locked_positions() {
        let mut state = distinct_state();
        state.toggle_lock(0).unwrap();
        state.toggle_lock(2).unwrap();
        let before = state.palette().clone();

        let mut rng = SequenceSource::new(vec![0.0, 0.1, 0.45, 0.9, 0.6]);
        state.shuffle(&mut rng);

        let after = state.palette();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);

        let mut moved: Vec<RgbColor> = [1, 3, 4].iter().map(|&i| after[i]).collect();
        let mut original: Vec<RgbColor> = [1, 3, 4].iter().map(|&i| before[i]).collect();
        moved.sort();
        original.sort();
        assert_eq!(moved, original);
    }

    #[test]
    fn test_shuffle_rejects_locked_targets() {
        // Slots 0 and 1 locked; for i = 2 the first draws hit 0 and 1,
        // then 0.9 picks 2 itself
        let mut state = distinct_state();
        state.set_count(3, &mut SequenceSource::new(vec![0.0])).unwrap();
        state.toggle_lock(0).unwrap();
        state.toggle_lock(1).unwrap();

        let mut rng = SequenceSource::new(vec![0.0, 0.5, 0.9]);
        state.shuffle(&mut rng);
        assert_eq!(rng.draws(), 3);
        assert_eq!(state.palette()[2], RgbColor::new(3, 0, 0));
    }

    #[test]
    fn test_shuffle_gives_up_on_source_stuck_on_locked_slot() {
        let mut state = distinct_state();
        state.toggle_lock(0).unwrap();
        let before = state.palette().clone();

        let mut rng = SequenceSource::new(vec![0.0]);
        state.shuffle(&mut rng);
        assert_eq!(state.palette(), &before);
        assert_eq!(rng.draws(), 4 * MAX_SHUFFLE_REDRAWS);
    }

    #[test]
    fn test_replace_colors_trims_locks_and_selection() {
        let mut state = distinct_state();
        state.toggle_lock(0).unwrap();
        state.toggle_lock(4).unwrap();
        state.select(4).unwrap();

        state.replace_colors(vec![WHITE, BLACK]).unwrap();
        assert_eq!(state.palette().colors(), &[WHITE, BLACK]);
        assert_eq!(state.locked_indices(), vec![0]);
        assert_eq!(state.selected(), None);

        assert!(state.replace_colors(Vec::new()).is_err());
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = distinct_state();
        state.toggle_lock(1).unwrap();
        state.select(0).unwrap();
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["mode"], "random");
        assert_eq!(json["colors"][0], "#010000");
        assert_eq!(json["locked"], serde_json::json!([1]));
        assert_eq!(json["selected"], 0);
        assert!(json["selected_hsl"]["h"].is_number());
    }
}
