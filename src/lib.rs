//! Marble Track - procedural racetrack generation for a top-down marble racer
//!
//! Core modules:
//! - `track`: Track data model, candidate synthesis, derivation, fallback and start alignment
//! - `validate`: Structural validity gates and drivability scoring
//! - `renderer`: Boundary strips and vertex data for the external line renderer
//! - `authoring`: Generate/validate/regenerate loop used by tooling
//! - `settings`: Generation settings loaded from JSON

pub mod authoring;
pub mod renderer;
pub mod settings;
pub mod track;
pub mod validate;

pub use authoring::{AttemptRecord, AuthoredTrack, author_track};
pub use renderer::{BoundaryProvider, TrackBoundary};
pub use settings::{Settings, SettingsError};
pub use track::{
    CandidateSynthesizer, ControlLoopSynthesizer, CrossoverLayer, GenerationDiagnostics, Track,
    TrackGenerator,
};
pub use validate::{Band, QualityReport, Severity, ValidationResult, evaluate_quality, validate};

use glam::Vec2;

/// Track configuration constants
pub mod consts {
    /// Smallest accepted arena half-extent (both axes)
    pub const MIN_ARENA_HALF_EXTENT: f32 = 12.0;
    /// Candidates shorter than this are rejected in favour of the fallback loop
    pub const MIN_CANDIDATE_SAMPLES: usize = 120;
    /// Sample count of the fallback loop
    pub const FALLBACK_SAMPLES: usize = 512;

    /// Stride between coarse self-intersection segments
    pub const COARSE_STRIDE: usize = 4;
    /// Coarse segments closer than this many strides (around the ring) are not compared
    pub const COARSE_NEIGHBOR_IGNORE: usize = 10;

    /// Base half-width as a fraction of the smaller arena dimension
    pub const BASE_WIDTH_FRACTION: f32 = 0.035;
    pub const BASE_WIDTH_MIN: f32 = 0.9;
    pub const BASE_WIDTH_MAX: f32 = 2.2;
    /// Half-width clamp relative to base
    pub const HALF_WIDTH_MIN_FACTOR: f32 = 0.82;
    pub const HALF_WIDTH_MAX_FACTOR: f32 = 1.6;

    /// Marble collision radius used for start-grid checks
    pub const MARBLE_RADIUS: f32 = 0.55;
    /// Minimum score for a track to be accepted
    pub const PASS_SCORE: i32 = 70;
    /// Tracks with fewer samples than this are rejected outright
    pub const MIN_VALIDATION_SAMPLES: usize = 8;
}

/// Wrap a (possibly negative) index onto a ring of `len` samples.
///
/// `len` must be non-zero.
#[inline]
pub fn wrap_index(i: isize, len: usize) -> usize {
    i.rem_euclid(len as isize) as usize
}

/// Heading of a direction vector in degrees, in [0, 360)
#[inline]
pub fn heading_deg(dir: Vec2) -> f32 {
    let deg = dir.y.atan2(dir.x).to_degrees();
    if deg < 0.0 { deg + 360.0 } else { deg % 360.0 }
}

/// Unsigned angle between two vectors in radians, in [0, π]
#[inline]
pub fn unsigned_angle(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b).atan2(a.dot(b)).abs()
}

#[inline]
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_index_negative_and_overflow() {
        assert_eq!(wrap_index(-1, 10), 9);
        assert_eq!(wrap_index(10, 10), 0);
        assert_eq!(wrap_index(-21, 10), 9);
        assert_eq!(wrap_index(3, 1), 0);
    }

    #[test]
    fn test_heading_quadrants() {
        assert!((heading_deg(Vec2::X) - 0.0).abs() < 1e-4);
        assert!((heading_deg(Vec2::Y) - 90.0).abs() < 1e-4);
        assert!((heading_deg(-Vec2::X) - 180.0).abs() < 1e-4);
        assert!((heading_deg(-Vec2::Y) - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_unsigned_angle() {
        let a = unsigned_angle(Vec2::X, Vec2::Y);
        assert!((a - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        let b = unsigned_angle(Vec2::X, Vec2::new(0.0, -3.0));
        assert!((b - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert!(unsigned_angle(Vec2::X, Vec2::X) < 1e-6);
    }
}
