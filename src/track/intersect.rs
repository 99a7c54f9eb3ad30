//! Segment intersection tests for closed centerlines
//!
//! Two scans share one parametric predicate:
//! - a coarse stride-4 scan used by the generator to reject candidates
//! - a fine all-pairs scan used by validation

use glam::Vec2;

use crate::consts::{COARSE_NEIGHBOR_IGNORE, COARSE_STRIDE};

/// Determinant tolerance for the fine scan
pub const FINE_DET_EPSILON: f32 = 1e-4;
/// Parametric margin for the fine scan; hits closer than this to an endpoint are ignored
pub const FINE_PARAM_MARGIN: f32 = 0.001;

/// Parametric location of an intersection between segments `a` and `b`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Fraction along segment `a`
    pub t: f32,
    /// Fraction along segment `b`
    pub u: f32,
    pub point: Vec2,
}

impl SegmentHit {
    /// True when the hit lies strictly inside both segments, `margin` away from the ends
    #[inline]
    pub fn is_interior(&self, margin: f32) -> bool {
        self.t > margin && self.t < 1.0 - margin && self.u > margin && self.u < 1.0 - margin
    }
}

/// Intersect the supporting lines of `a0→a1` and `b0→b1`.
///
/// Returns `None` for parallel (or nearly parallel) segments whose cross
/// product magnitude is not above `det_epsilon`.
pub fn segment_intersection(
    a0: Vec2,
    a1: Vec2,
    b0: Vec2,
    b1: Vec2,
    det_epsilon: f32,
) -> Option<SegmentHit> {
    let r = a1 - a0;
    let s = b1 - b0;
    let det = r.perp_dot(s);
    if det.abs() <= det_epsilon {
        return None;
    }
    let qp = b0 - a0;
    let t = qp.perp_dot(s) / det;
    let u = qp.perp_dot(r) / det;
    Some(SegmentHit {
        t,
        u,
        point: a0 + r * t,
    })
}

/// Coarse self-intersection test over stride-4 segments of a closed loop.
///
/// Segments whose start indices are within `10 * 4` samples of each other
/// (measured around the ring) are never compared.
pub fn coarse_self_intersects(points: &[Vec2]) -> bool {
    let n = points.len();
    if n < 2 * COARSE_STRIDE {
        return false;
    }
    let starts: Vec<usize> = (0..n).step_by(COARSE_STRIDE).collect();
    let ignore = COARSE_NEIGHBOR_IGNORE * COARSE_STRIDE;

    for (a, &ia) in starts.iter().enumerate() {
        let a0 = points[ia];
        let a1 = points[(ia + COARSE_STRIDE) % n];
        for &ib in &starts[a + 1..] {
            let gap = ib - ia;
            if gap.min(n - gap) <= ignore {
                continue;
            }
            let b0 = points[ib];
            let b1 = points[(ib + COARSE_STRIDE) % n];
            if segment_intersection(a0, a1, b0, b1, f32::EPSILON)
                .is_some_and(|hit| hit.is_interior(0.0))
            {
                log::debug!("Coarse crossing between segments at {} and {}", ia, ib);
                return true;
            }
        }
    }
    false
}

/// All crossing segment pairs `(i, j)` of a closed loop, fine tolerance.
///
/// Segment `i` runs from `points[i]` to `points[i + 1]` (wrapping). Only
/// pairs with `j >= i + 2` that are not adjacent across the seam are tested.
pub fn crossing_pairs(points: &[Vec2]) -> Vec<(usize, usize)> {
    let n = points.len();
    let mut pairs = Vec::new();
    if n < 4 {
        return pairs;
    }
    for i in 0..n {
        let a0 = points[i];
        let a1 = points[(i + 1) % n];
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let b0 = points[j];
            let b1 = points[(j + 1) % n];
            if segment_intersection(a0, a1, b0, b1, FINE_DET_EPSILON)
                .is_some_and(|hit| hit.is_interior(FINE_PARAM_MARGIN))
            {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
