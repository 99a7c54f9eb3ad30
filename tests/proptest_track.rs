//! Property tests for track generation and scoring

use glam::Vec2;
use marble_track::consts::*;
use marble_track::track::{
    alignment_window, base_half_width, best_start_index, build_track_data, rotate_to_best_straight,
};
use marble_track::{Band, TrackGenerator, evaluate_quality};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

fn wobbly_ring(n: usize, radius: f32, wobble: f32, lobes: f32) -> Vec<Vec2> {
    (0..n)
        .map(|i| {
            let a = TAU * i as f32 / n as f32;
            let r = radius * (1.0 + wobble * (lobes * a).sin());
            Vec2::new(a.cos(), a.sin()) * r
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn generated_tracks_are_long_enough(
        seed in any::<u64>(),
        variant in -50i32..50,
        hx in 0.0f32..80.0,
        hy in 0.0f32..80.0,
    ) {
        let generator: TrackGenerator = TrackGenerator::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let (track, diag) = generator.build_with_diagnostics(hx, hy, &mut rng, variant);

        prop_assert!(track.sample_count() >= MIN_CANDIDATE_SAMPLES);
        if diag.fallback_used {
            prop_assert_eq!(track.sample_count(), FALLBACK_SAMPLES);
            prop_assert_eq!(diag.segment_count, 0);
        }

        let base = base_half_width(hx.max(MIN_ARENA_HALF_EXTENT), hy.max(MIN_ARENA_HALF_EXTENT));
        for &hw in track.half_width() {
            prop_assert!(hw >= HALF_WIDTH_MIN_FACTOR * base - 1e-4);
            prop_assert!(hw <= HALF_WIDTH_MAX_FACTOR * base + 1e-4);
        }
    }

    #[test]
    fn generation_is_deterministic(seed in any::<u64>(), variant in -10i32..10) {
        let generator: TrackGenerator = TrackGenerator::default();
        let a = generator.build(36.0, 24.0, &mut Pcg32::seed_from_u64(seed), variant);
        let b = generator.build(36.0, 24.0, &mut Pcg32::seed_from_u64(seed), variant);
        prop_assert_eq!(a, b);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn wrap_and_forward_delta_laws(n in 8usize..300, i in -2000isize..2000, a in 0usize..300, d in 0usize..300) {
        let track = build_track_data(wobbly_ring(n, 20.0, 0.0, 1.0), 30.0, 30.0).unwrap();
        let w = track.wrap(i);
        prop_assert!(w < n);
        prop_assert_eq!(track.wrap(i + n as isize), w);
        prop_assert_eq!(track.wrap(i - n as isize), w);

        let a = a % n;
        let d = d % n;
        let b = track.wrap((a + d) as isize);
        prop_assert_eq!(track.forward_delta(a, b), d);
        prop_assert!(track.forward_delta(b, a) < n);
    }

    #[test]
    fn start_alignment_is_idempotent(
        n in 40usize..240,
        wobble in 0.0f32..0.3,
        lobes in 2u32..6,
    ) {
        let mut track = build_track_data(wobbly_ring(n, 22.0, wobble, lobes as f32), 30.0, 30.0).unwrap();
        rotate_to_best_straight(&mut track);
        let window = alignment_window(track.sample_count());
        prop_assert_eq!(best_start_index(&track, window), 0);

        let before = track.clone();
        rotate_to_best_straight(&mut track);
        prop_assert_eq!(track, before);
    }

    #[test]
    fn quality_is_pure_and_bounded(
        n in 8usize..200,
        radius in 3.0f32..30.0,
        wobble in 0.0f32..0.4,
        lobes in 1u32..7,
    ) {
        let track = build_track_data(wobbly_ring(n, radius, wobble, lobes as f32), 40.0, 40.0).unwrap();
        let first = evaluate_quality(&track);
        let second = evaluate_quality(&track);
        prop_assert!((0..=100).contains(&first.score));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn band_follows_score(score in -20i32..130) {
        let band = Band::from_score(score);
        let expected = if score >= 80 {
            Band::Green
        } else if score >= 60 {
            Band::Yellow
        } else {
            Band::Red
        };
        prop_assert_eq!(band, expected);
    }
}
