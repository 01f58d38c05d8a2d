//! Property tests for the palette core through the public library API.

use palettegen::models::{GenerationMode, Hsl, Palette, RgbColor};
use palettegen::services::contrast::analyze;
use palettegen::services::generators::generate_batch;
use palettegen::services::state::PaletteState;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn independent_mode() -> impl Strategy<Value = GenerationMode> {
    prop_oneof![
        Just(GenerationMode::Random),
        Just(GenerationMode::Pastel),
        Just(GenerationMode::Vibrant),
        Just(GenerationMode::Dark),
        Just(GenerationMode::Monochrome),
    ]
}

fn any_mode() -> impl Strategy<Value = GenerationMode> {
    proptest::sample::select(GenerationMode::all().to_vec())
}

fn rgb() -> impl Strategy<Value = RgbColor> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| RgbColor::new(r, g, b))
}

fn sorted_hex(palette: &Palette) -> Vec<String> {
    let mut hexes = palette.to_hex_list();
    hexes.sort();
    hexes
}

proptest! {
    #[test]
    fn hex_roundtrip(color in rgb()) {
        let hex = color.to_hex();
        prop_assert_eq!(RgbColor::from_hex(&hex).unwrap(), color);
        prop_assert_eq!(RgbColor::from_hex(&hex.to_lowercase()).unwrap(), color);
        prop_assert_eq!(RgbColor::from_hex(&hex[1..]).unwrap(), color);
    }

    #[test]
    fn hsl_components_stay_in_range(color in rgb()) {
        let hsl = Hsl::from_rgb(color);
        prop_assert!(hsl.h <= 359);
        prop_assert!(hsl.s <= 100);
        prop_assert!(hsl.l <= 100);
    }

    #[test]
    fn hsl_roundtrip_reaches_fixed_point(color in rgb()) {
        let roundtrip = |c: RgbColor| Hsl::from_rgb(c).to_rgb();
        let mut current = color;
        let mut steps = 0;
        loop {
            let next = roundtrip(current);
            if next == current {
                break;
            }
            current = next;
            steps += 1;
            prop_assert!(steps <= 32, "{} still drifting at {}", color, current);
        }
        prop_assert_eq!(roundtrip(current), current);
        prop_assert_eq!(Hsl::from_rgb(roundtrip(current)), Hsl::from_rgb(current));
    }

    #[test]
    fn contrast_is_symmetric_and_bounded(a in rgb(), b in rgb()) {
        let ratio = a.contrast_ratio(&b);
        prop_assert!((ratio - b.contrast_ratio(&a)).abs() < f64::EPSILON);
        prop_assert!((1.0..=21.0).contains(&ratio));
        prop_assert!((a.contrast_ratio(&a) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn contrast_pair_count(colors in prop::collection::vec(rgb(), 1..=10)) {
        let n = colors.len();
        prop_assert_eq!(analyze(&Palette::new(colors)).len(), n * (n - 1) / 2);
    }

    #[test]
    fn batch_has_requested_length(mode in any_mode(), count in 1usize..=10, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        prop_assert_eq!(generate_batch(mode, count, &mut rng).len(), count);
    }

    #[test]
    fn locked_slots_survive_regenerate_and_shuffle(
        mode in independent_mode(),
        count in 2usize..=10,
        locks in prop::collection::vec(0usize..10, 0..5),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = PaletteState::new(mode, count, 10, &mut rng).unwrap();
        for index in locks.into_iter().filter(|&i| i < count) {
            if !state.is_locked(index) {
                state.toggle_lock(index).unwrap();
            }
        }
        let before = state.palette().clone();
        let locked = state.locked_indices();

        state.regenerate(&mut rng);
        for &i in &locked {
            prop_assert_eq!(state.palette()[i], before[i]);
        }

        let regenerated = state.palette().clone();
        state.shuffle(&mut rng);
        for &i in &locked {
            prop_assert_eq!(state.palette()[i], before[i]);
        }
        prop_assert_eq!(sorted_hex(state.palette()), sorted_hex(&regenerated));
        prop_assert_eq!(state.len(), count);
    }

    #[test]
    fn set_count_keeps_prefix(start in 1usize..=10, target in 1usize..=10, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = PaletteState::new(GenerationMode::Random, start, 10, &mut rng).unwrap();
        let before = state.palette().clone();

        state.set_count(target, &mut rng).unwrap();
        prop_assert_eq!(state.len(), target);
        let kept = start.min(target);
        prop_assert_eq!(&state.palette().colors()[..kept], &before.colors()[..kept]);
        prop_assert!(state.locked_indices().iter().all(|&i| i < target));
    }
}
