//! Width and curvature derivation
//!
//! Turns a raw ordered centerline into the full parallel-array [`Track`]:
//! tangents by central difference, left-hand normals, normalized curvature
//! and a per-sample half-width that narrows through turns and widens on
//! straights.

use glam::Vec2;

use super::data::{Track, TrackError};
use crate::consts::*;
use crate::{clamp01, unsigned_angle, wrap_index};

/// Half-window (in samples) used to detect overtaking straights
const OVERTAKE_WINDOW: isize = 6;
/// Samples below this curvature count as straight for overtaking zones
const OVERTAKE_CURVATURE: f32 = 0.03;
/// Straight samples needed inside the window to mark an overtaking zone
const OVERTAKE_MIN_STRAIGHT: usize = 10;
const OVERTAKE_BOOST: f32 = 0.18;

/// Base half-width for an arena, before per-sample shaping
pub fn base_half_width(half_width: f32, half_height: f32) -> f32 {
    let min_dimension = 2.0 * half_width.min(half_height);
    (min_dimension * BASE_WIDTH_FRACTION).clamp(BASE_WIDTH_MIN, BASE_WIDTH_MAX)
}

/// Derive a full track from an ordered, implicitly closed centerline
pub fn build_track_data(
    points: Vec<Vec2>,
    half_width: f32,
    half_height: f32,
) -> Result<Track, TrackError> {
    if points.is_empty() {
        return Err(TrackError::Empty);
    }
    Ok(derive_nonempty(points, half_width, half_height))
}

/// Derivation body; `points` must not be empty
pub(crate) fn derive_nonempty(points: Vec<Vec2>, half_width: f32, half_height: f32) -> Track {
    let n = points.len();
    let mut tangent = Vec::with_capacity(n);
    let mut previous = Vec2::X;
    for i in 0..n {
        let next = points[wrap_index(i as isize + 1, n)];
        let prev = points[wrap_index(i as isize - 1, n)];
        let mut t = (next - prev).try_normalize().unwrap_or(previous);
        // Keep the tangent field sign-continuous along the ring
        if i > 0 && t.dot(previous) < 0.0 {
            t = -t;
        }
        tangent.push(t);
        previous = t;
    }

    let normal: Vec<Vec2> = tangent.iter().map(|t| t.perp()).collect();

    let curvature: Vec<f32> = (0..n)
        .map(|i| {
            let prev = tangent[wrap_index(i as isize - 1, n)];
            unsigned_angle(prev, tangent[i]) / std::f32::consts::PI
        })
        .collect();

    let base = base_half_width(half_width, half_height);
    let widths: Vec<f32> = (0..n)
        .map(|i| {
            let curv = curvature[i];
            let turn_penalty = clamp01(curv * 6.0) * 0.24;
            let straight_boost = clamp01((0.04 - curv) / 0.04) * 0.2;
            let overtake_boost = if is_overtaking_zone(&curvature, i) {
                OVERTAKE_BOOST
            } else {
                0.0
            };
            let t = tangent[i];
            let wobble = ((t.x + t.y) * 3.2).sin().abs() * 0.04;
            let factor = 1.0 + straight_boost + overtake_boost + wobble - turn_penalty;
            (base * factor).clamp(HALF_WIDTH_MIN_FACTOR * base, HALF_WIDTH_MAX_FACTOR * base)
        })
        .collect();

    Track::from_derived(points, tangent, normal, widths, curvature)
}

/// True when the ±6 window around `i` is mostly straight
fn is_overtaking_zone(curvature: &[f32], i: usize) -> bool {
    let n = curvature.len();
    let straight = (-OVERTAKE_WINDOW..=OVERTAKE_WINDOW)
        .filter(|k| curvature[wrap_index(i as isize + k, n)] < OVERTAKE_CURVATURE)
        .count();
    straight >= OVERTAKE_MIN_STRAIGHT
}
