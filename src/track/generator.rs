//! Track generator
//!
//! One build = one synthesis attempt. The candidate is accepted only if it
//! is long enough and passes the coarse crossing test; otherwise the
//! deterministic fallback loop is used. Either way the result is rotated so
//! the start line sits on the best straight.

use rand::Rng;
use serde::Serialize;

use super::align::rotate_to_best_straight;
use super::data::Track;
use super::derive::derive_nonempty;
use super::fallback::build_fallback_rounded_rectangle;
use super::intersect::coarse_self_intersects;
use super::synth::{CandidateSynthesizer, ControlLoopSynthesizer};
use crate::consts::*;

/// The diagnostic record emitted once per build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationDiagnostics {
    pub variant: i32,
    pub fallback_used: bool,
    /// Synthesizer segment count (0 when the fallback was used)
    pub segment_count: usize,
    /// Synthesizer diagonal count (0 when the fallback was used)
    pub diagonal_count: usize,
}

/// Builds finished tracks from a pluggable candidate synthesizer
#[derive(Debug, Clone, Default)]
pub struct TrackGenerator<S = ControlLoopSynthesizer> {
    synthesizer: S,
}

impl<S: CandidateSynthesizer> TrackGenerator<S> {
    pub fn new(synthesizer: S) -> Self {
        Self { synthesizer }
    }

    pub fn synthesizer(&self) -> &S {
        &self.synthesizer
    }

    /// Build a finished track for the arena extents
    pub fn build<R: Rng + ?Sized>(
        &self,
        half_width: f32,
        half_height: f32,
        rng: &mut R,
        variant: i32,
    ) -> Track {
        self.build_with_diagnostics(half_width, half_height, rng, variant)
            .0
    }

    /// Build a finished track and return the diagnostic record that was logged for it
    pub fn build_with_diagnostics<R: Rng + ?Sized>(
        &self,
        half_width: f32,
        half_height: f32,
        rng: &mut R,
        variant: i32,
    ) -> (Track, GenerationDiagnostics) {
        let half_width = half_width.max(MIN_ARENA_HALF_EXTENT);
        let half_height = half_height.max(MIN_ARENA_HALF_EXTENT);

        let candidate = self
            .synthesizer
            .synthesize(half_width, half_height, rng, variant);
        let sample_count = candidate.points.len();
        let accepted =
            sample_count >= MIN_CANDIDATE_SAMPLES && !coarse_self_intersects(&candidate.points);

        let (mut track, diagnostics) = if accepted {
            let diagnostics = GenerationDiagnostics {
                variant,
                fallback_used: false,
                segment_count: candidate.diagnostics.segment_count,
                diagonal_count: candidate.diagnostics.diagonal_count,
            };
            (
                derive_nonempty(candidate.points, half_width, half_height),
                diagnostics,
            )
        } else {
            log::debug!(
                "Variant {}: candidate rejected ({} samples), using fallback loop",
                variant,
                sample_count
            );
            let diagnostics = GenerationDiagnostics {
                variant,
                fallback_used: true,
                segment_count: 0,
                diagonal_count: 0,
            };
            (
                build_fallback_rounded_rectangle(half_width, half_height, variant),
                diagnostics,
            )
        };

        rotate_to_best_straight(&mut track);

        log::info!(
            "Track generated: variant={}, fallback={}, segments={}, diagonals={}",
            diagnostics.variant,
            diagnostics.fallback_used,
            diagnostics.segment_count,
            diagnostics.diagonal_count
        );

        (track, diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::derive::base_half_width;
    use crate::track::fallback::fallback_points;
    use crate::track::intersect::crossing_pairs;
    use crate::renderer::TrackBoundary;
    use crate::track::synth::{Candidate, SynthesisDiagnostics};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::TAU;

    /// Returns a fixed point list regardless of inputs
    struct FixedSynthesizer(Vec<Vec2>);

    impl CandidateSynthesizer for FixedSynthesizer {
        fn synthesize<R: Rng + ?Sized>(&self, _: f32, _: f32, _: &mut R, _: i32) -> Candidate {
            Candidate {
                points: self.0.clone(),
                diagnostics: SynthesisDiagnostics {
                    segment_count: 9,
                    diagonal_count: 4,
                },
            }
        }
    }

    fn ellipse(n: usize, rx: f32, ry: f32) -> Vec<Vec2> {
        (0..n)
            .map(|i| {
                let a = TAU * i as f32 / n as f32;
                Vec2::new(a.cos() * rx, a.sin() * ry)
            })
            .collect()
    }

    #[test]
    fn test_accepts_valid_candidate() {
        let generator = TrackGenerator::new(FixedSynthesizer(ellipse(200, 25.0, 15.0)));
        let mut rng = Pcg32::seed_from_u64(5);
        let (track, diag) = generator.build_with_diagnostics(30.0, 20.0, &mut rng, 3);
        assert!(!diag.fallback_used);
        assert_eq!(diag.segment_count, 9);
        assert_eq!(diag.diagonal_count, 4);
        assert_eq!(track.sample_count(), 200);
    }

    #[test]
    fn test_short_candidate_falls_back() {
        // Scenario: 40x40 arena, synthesizer returns fewer than 120 points
        let generator = TrackGenerator::new(FixedSynthesizer(ellipse(60, 25.0, 25.0)));
        let mut rng = Pcg32::seed_from_u64(9);
        let (track, diag) = generator.build_with_diagnostics(40.0, 40.0, &mut rng, 1);
        assert!(diag.fallback_used);
        assert_eq!(diag.segment_count, 0);
        assert_eq!(diag.diagonal_count, 0);
        assert_eq!(track.sample_count(), FALLBACK_SAMPLES);
        assert!(crossing_pairs(track.center()).is_empty());

        let n = track.sample_count();
        let boundary = TrackBoundary::from_track(&track);
        assert!(crossing_pairs(&boundary.inner_points()[..n]).is_empty());
        assert!(crossing_pairs(&boundary.outer_points()[..n]).is_empty());
    }

    #[test]
    fn test_fallback_edges_stay_simple_in_square_arena() {
        let generator = TrackGenerator::new(FixedSynthesizer(Vec::new()));
        for variant in -6..=6 {
            let mut rng = Pcg32::seed_from_u64(variant as u64);
            let track = generator.build(40.0, 40.0, &mut rng, variant);
            let n = track.sample_count();
            let boundary = TrackBoundary::from_track(&track);
            assert!(
                crossing_pairs(&boundary.inner_points()[..n]).is_empty(),
                "variant {variant}: inner edge folds"
            );
            assert!(
                crossing_pairs(&boundary.outer_points()[..n]).is_empty(),
                "variant {variant}: outer edge folds"
            );
        }
    }

    #[test]
    fn test_crossing_candidate_falls_back() {
        let eight: Vec<Vec2> = (0..256)
            .map(|i| {
                let a = TAU * (i as f32 + 0.5) / 256.0;
                Vec2::new(a.sin(), a.sin() * a.cos()) * 25.0
            })
            .collect();
        let generator = TrackGenerator::new(FixedSynthesizer(eight));
        let (track, diag) =
            generator.build_with_diagnostics(40.0, 40.0, &mut Pcg32::seed_from_u64(0), 0);
        assert!(diag.fallback_used);
        assert_eq!(track.sample_count(), FALLBACK_SAMPLES);
    }

    #[test]
    fn test_fallback_ignores_rng_cursor() {
        let generator = TrackGenerator::new(FixedSynthesizer(Vec::new()));
        let a = generator.build(40.0, 40.0, &mut Pcg32::seed_from_u64(1), 6);
        let b = generator.build(40.0, 40.0, &mut Pcg32::seed_from_u64(999), 6);
        assert_eq!(a, b);
    }

    #[test]
    fn test_extents_are_clamped() {
        let generator = TrackGenerator::new(FixedSynthesizer(Vec::new()));
        let tiny = generator.build(1.0, 2.0, &mut Pcg32::seed_from_u64(1), 4);
        let clamped = generator.build(12.0, 12.0, &mut Pcg32::seed_from_u64(1), 4);
        assert_eq!(tiny, clamped);
        let expected: Vec<Vec2> = fallback_points(12.0, 12.0, 4);
        assert!(tiny.center().iter().all(|p| expected.contains(p)));
    }

    #[test]
    fn test_default_generator_output() {
        let generator: TrackGenerator = TrackGenerator::default();
        let mut rng = Pcg32::seed_from_u64(2024);
        for variant in 0..6 {
            let track = generator.build(35.0, 25.0, &mut rng, variant);
            assert!(track.sample_count() >= MIN_CANDIDATE_SAMPLES);
            let base = base_half_width(35.0, 25.0);
            for hw in track.half_width() {
                assert!(*hw >= 0.82 * base - 1e-5 && *hw <= 1.6 * base + 1e-5);
            }
        }
    }

    #[test]
    fn test_start_is_aligned() {
        let generator: TrackGenerator = TrackGenerator::default();
        let track = generator.build(30.0, 30.0, &mut Pcg32::seed_from_u64(8), 2);
        let window = crate::track::align::alignment_window(track.sample_count());
        assert_eq!(crate::track::align::best_start_index(&track, window), 0);
    }
}
