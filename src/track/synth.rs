//! Candidate centerline synthesis
//!
//! The generator asks a [`CandidateSynthesizer`] for one raw loop per build.
//! A synthesizer may legitimately return too few points or a loop that
//! crosses itself; the generator treats both as a signal to fall back, not
//! as errors.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;
use std::f32::consts::TAU;

use crate::heading_deg;

/// Counters reported by the synthesizer alongside its points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SynthesisDiagnostics {
    /// Control segments making up the loop
    pub segment_count: usize,
    /// Control segments that run off-axis (more than 10° from horizontal/vertical)
    pub diagonal_count: usize,
}

/// A raw candidate loop
#[derive(Debug, Clone, Default)]
pub struct Candidate {
    /// Ordered centerline points; the last point implicitly joins the first
    pub points: Vec<Vec2>,
    pub diagnostics: SynthesisDiagnostics,
}

/// Strategy proposing a raw closed centerline for an arena
pub trait CandidateSynthesizer {
    fn synthesize<R: Rng + ?Sized>(
        &self,
        half_width: f32,
        half_height: f32,
        rng: &mut R,
        variant: i32,
    ) -> Candidate;
}

/// Headings within this many degrees of an axis are not diagonal
const AXIS_TOLERANCE_DEG: f32 = 10.0;

/// Default synthesizer: a jittered control polygon around the arena
/// ellipse, smoothed with a closed Catmull-Rom spline.
#[derive(Debug, Clone)]
pub struct ControlLoopSynthesizer {
    pub min_controls: usize,
    pub max_controls: usize,
    /// Lower bound on the number of emitted samples
    pub target_samples: usize,
}

impl Default for ControlLoopSynthesizer {
    fn default() -> Self {
        Self {
            min_controls: 7,
            max_controls: 12,
            target_samples: 240,
        }
    }
}

impl ControlLoopSynthesizer {
    /// Radial jitter grows with the variant style (0..=3)
    fn radial_jitter(variant: i32) -> f32 {
        0.12 + 0.06 * variant.rem_euclid(4) as f32
    }

    fn control_points<R: Rng + ?Sized>(
        &self,
        half_width: f32,
        half_height: f32,
        rng: &mut R,
        variant: i32,
    ) -> Vec<Vec2> {
        let min = self.min_controls.max(3);
        let max = self.max_controls.max(min);
        let count = rng.random_range(min..=max);
        let jitter = Self::radial_jitter(variant);

        (0..count)
            .map(|j| {
                let slot = j as f32 + rng.random_range(-0.3..0.3);
                let angle = TAU * slot / count as f32;
                let frac = rng.random_range((0.7 - jitter)..0.85);
                Vec2::new(
                    half_width * frac * angle.cos(),
                    half_height * frac * angle.sin(),
                )
            })
            .collect()
    }
}

impl CandidateSynthesizer for ControlLoopSynthesizer {
    fn synthesize<R: Rng + ?Sized>(
        &self,
        half_width: f32,
        half_height: f32,
        rng: &mut R,
        variant: i32,
    ) -> Candidate {
        let controls = self.control_points(half_width, half_height, rng, variant);
        let count = controls.len();

        let diagonal_count = count_diagonals(&controls);
        let per_segment = self.target_samples.div_ceil(count).max(1);
        let points = catmull_rom_closed(&controls, per_segment);

        Candidate {
            points,
            diagnostics: SynthesisDiagnostics {
                segment_count: count,
                diagonal_count,
            },
        }
    }
}

/// Closed-polygon edges running more than 10° off both axes
fn count_diagonals(controls: &[Vec2]) -> usize {
    let n = controls.len();
    (0..n)
        .filter(|&j| {
            let heading = heading_deg(controls[(j + 1) % n] - controls[j]);
            let off_axis = (heading % 90.0).min(90.0 - heading % 90.0);
            off_axis > AXIS_TOLERANCE_DEG
        })
        .count()
}

/// Sample a closed uniform Catmull-Rom spline through `controls`
fn catmull_rom_closed(controls: &[Vec2], per_segment: usize) -> Vec<Vec2> {
    let n = controls.len();
    let mut points = Vec::with_capacity(n * per_segment);
    for j in 0..n {
        let p0 = controls[(j + n - 1) % n];
        let p1 = controls[j];
        let p2 = controls[(j + 1) % n];
        let p3 = controls[(j + 2) % n];
        for s in 0..per_segment {
            let t = s as f32 / per_segment as f32;
            let t2 = t * t;
            let t3 = t2 * t;
            let p = 0.5
                * (2.0 * p1
                    + (p2 - p0) * t
                    + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
                    + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3);
            points.push(p);
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_candidate_has_enough_samples() {
        let synth = ControlLoopSynthesizer::default();
        let mut rng = Pcg32::seed_from_u64(1);
        for variant in 0..8 {
            let candidate = synth.synthesize(40.0, 30.0, &mut rng, variant);
            assert!(candidate.points.len() >= 240);
            let d = candidate.diagnostics;
            assert!((7..=12).contains(&d.segment_count));
            assert!(d.diagonal_count <= d.segment_count);
        }
    }

    #[test]
    fn test_candidate_is_seed_deterministic() {
        let synth = ControlLoopSynthesizer::default();
        let a = synth.synthesize(30.0, 30.0, &mut Pcg32::seed_from_u64(77), 2);
        let b = synth.synthesize(30.0, 30.0, &mut Pcg32::seed_from_u64(77), 2);
        assert_eq!(a.points, b.points);
        assert_eq!(a.diagnostics, b.diagnostics);
    }

    #[test]
    fn test_catmull_rom_passes_through_controls() {
        let controls = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let points = catmull_rom_closed(&controls, 5);
        assert_eq!(points.len(), 20);
        for (j, c) in controls.iter().enumerate() {
            assert!((points[j * 5] - *c).length() < 1e-4);
        }
    }

    #[test]
    fn test_diagonal_count() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        assert_eq!(count_diagonals(&square), 0);
        let diamond = [
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(-10.0, 0.0),
            Vec2::new(0.0, -10.0),
        ];
        assert_eq!(count_diagonals(&diamond), 4);
    }
}
