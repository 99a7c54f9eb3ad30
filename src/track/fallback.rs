//! Deterministic fallback loop
//!
//! Used whenever the synthesized candidate is rejected. The shape is a
//! gently warped ellipse whose parameters come from an RNG seeded by the
//! variant alone, so the same variant always falls back to the same track
//! no matter how far the caller's RNG has advanced.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use super::data::Track;
use super::derive::derive_nonempty;
use crate::consts::FALLBACK_SAMPLES;

const SEED_SALT_A: u64 = 0x9E37_79B9_7F4A_7C15;
const SEED_SALT_B: u64 = 0xBF58_476D_1CE4_E5B9;
const SEED_SALT_C: u64 = 0x94D0_49BB_1331_11EB;

/// Stable seed for the fallback RNG of a variant
pub fn fallback_seed(variant: i32) -> u64 {
    let mut h = (variant as i64 as u64) ^ SEED_SALT_A;
    h = (h ^ (h >> 30)).wrapping_mul(SEED_SALT_B);
    h = (h ^ (h >> 27)).wrapping_mul(SEED_SALT_C);
    h ^ (h >> 31)
}

/// The 512 centerline samples of the fallback loop.
///
/// Radius fractions stay within 0.5..0.72 of each half-extent and the warp
/// amplitudes stay below 13%, which keeps the loop simple.
pub fn fallback_points(half_width: f32, half_height: f32, variant: i32) -> Vec<Vec2> {
    let mut rng = Pcg32::seed_from_u64(fallback_seed(variant));
    let radius_x = half_width * rng.random_range(0.5..0.72);
    let radius_y = half_height * rng.random_range(0.5..0.72);
    let warp_x = rng.random_range(0.05..0.13);
    let warp_y = rng.random_range(0.04..0.11);
    let phase = rng.random_range(0.0..TAU);

    (0..FALLBACK_SAMPLES)
        .map(|i| {
            let theta = TAU * i as f32 / FALLBACK_SAMPLES as f32;
            let lobe = 2.0 * theta + phase;
            Vec2::new(
                radius_x * theta.cos() * (1.0 + warp_x * lobe.sin()),
                radius_y * theta.sin() * (1.0 + warp_y * lobe.cos()),
            )
        })
        .collect()
}

/// Build the fallback track for a variant. Never fails.
pub fn build_fallback_rounded_rectangle(half_width: f32, half_height: f32, variant: i32) -> Track {
    derive_nonempty(
        fallback_points(half_width, half_height, variant),
        half_width,
        half_height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::intersect::crossing_pairs;

    #[test]
    fn test_fallback_seed_is_stable_and_spread() {
        assert_eq!(fallback_seed(7), fallback_seed(7));
        assert_ne!(fallback_seed(7), fallback_seed(8));
        assert_ne!(fallback_seed(-1), fallback_seed(1));
    }

    #[test]
    fn test_fallback_has_fixed_sample_count() {
        let track = build_fallback_rounded_rectangle(40.0, 25.0, 3);
        assert_eq!(track.sample_count(), FALLBACK_SAMPLES);
    }

    #[test]
    fn test_fallback_is_deterministic_per_variant() {
        let a = fallback_points(30.0, 30.0, 11);
        let b = fallback_points(30.0, 30.0, 11);
        let c = fallback_points(30.0, 30.0, 12);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_fallback_stays_inside_arena() {
        for variant in 0..16 {
            for p in fallback_points(40.0, 20.0, variant) {
                assert!(p.x.abs() <= 40.0 * 0.72 * 1.13 + 1e-3);
                assert!(p.y.abs() <= 20.0 * 0.72 * 1.11 + 1e-3);
            }
        }
    }

    #[test]
    fn test_fallback_centerline_is_simple() {
        for variant in [0, 1, 5, 42, -9] {
            let points = fallback_points(40.0, 40.0, variant);
            assert!(crossing_pairs(&points).is_empty(), "variant {variant} crosses itself");
        }
    }
}
