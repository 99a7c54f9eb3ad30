//! Drivability scoring
//!
//! Starts every track at 100 and subtracts fixed penalties for sharp turns,
//! tight radii, boxy layouts, jittery steering and low directional variety.
//! The thresholds and penalty sizes are fixed; tooling compares scores
//! across builds.

use glam::Vec2;
use serde::Serialize;

use super::result::QualityIssue;
use crate::track::Track;
use crate::{heading_deg, wrap_index};

const MAX_TURN_FAIL_DEG: f32 = 75.0;
const MAX_TURN_WARN_DEG: f32 = 60.0;
const SHARP_CORNER_DEG: f32 = 55.0;
const SHARP_CORNERS_FAIL: usize = 10;
const SHARP_CORNERS_WARN: usize = 5;
/// Minimum radius relative to the average track width
const MIN_RADIUS_WIDTH_FACTOR: f32 = 1.5;
const RADIUS_PERCENTILE: f32 = 0.14;
const AXIS_TOLERANCE_DEG: f32 = 10.0;
const BOXY_FAIL_RATIO: f32 = 0.72;
const BOXY_WARN_RATIO: f32 = 0.48;
const JITTER_LIMIT_DEG: f32 = 20.0;
const DIRECTION_BINS: usize = 8;
const MIN_ENTROPY: f32 = 0.58;
const MIN_OCCUPIED_BINS: usize = 5;
/// Neighbours further than this are never used to measure a turn
const TURN_REACH: isize = 2;

/// Drivability metrics and the score derived from them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    /// 0..=100
    pub score: i32,
    pub max_turn_angle_deg: f32,
    pub sharp_corner_count: usize,
    pub min_radius: f32,
    pub axis_aligned_ratio: f32,
    /// Average change in turning angle between consecutive samples, degrees
    pub smoothness_jitter: f32,
    /// Heading entropy normalized to 0..=1
    pub direction_entropy: f32,
    pub unique_direction_bins: usize,
    pub boxy_fail: bool,
    pub issues: Vec<QualityIssue>,
    pub sharp_corner_indices: Vec<usize>,
    pub axis_aligned_indices: Vec<usize>,
    pub min_radius_indices: Vec<usize>,
}

impl QualityReport {
    /// Report for a track that cannot be scored at all
    pub(crate) fn degenerate(reason: &str) -> Self {
        Self {
            score: 0,
            max_turn_angle_deg: 0.0,
            sharp_corner_count: 0,
            min_radius: 0.0,
            axis_aligned_ratio: 0.0,
            smoothness_jitter: 0.0,
            direction_entropy: 0.0,
            unique_direction_bins: 0,
            boxy_fail: true,
            issues: vec![QualityIssue::fail(reason)],
            sharp_corner_indices: Vec::new(),
            axis_aligned_indices: Vec::new(),
            min_radius_indices: Vec::new(),
        }
    }
}

/// Score a track. Pure: the same track always yields the same report.
pub fn evaluate_quality(track: &Track) -> QualityReport {
    let n = track.sample_count();
    if n < crate::consts::MIN_VALIDATION_SAMPLES {
        return QualityReport::degenerate(super::DEGENERATE_REASON);
    }
    let center = track.center();

    let turns = signed_turns_deg(center);
    let mut issues = Vec::new();
    let mut score = 100;

    // Turn sharpness
    let max_turn = turns.iter().fold(0.0_f32, |m, t| m.max(t.abs()));
    if max_turn >= MAX_TURN_FAIL_DEG {
        score -= 24;
        issues.push(QualityIssue::fail(format!(
            "max turn angle {max_turn:.1}° >= {MAX_TURN_FAIL_DEG}°"
        )));
    } else if max_turn >= MAX_TURN_WARN_DEG {
        score -= 12;
        issues.push(QualityIssue::warn(format!(
            "max turn angle {max_turn:.1}° >= {MAX_TURN_WARN_DEG}°"
        )));
    }

    let sharp_corner_indices: Vec<usize> = (0..n)
        .filter(|&i| turns[i].abs() >= SHARP_CORNER_DEG)
        .collect();
    let sharp = sharp_corner_indices.len();
    if sharp >= SHARP_CORNERS_FAIL {
        score -= 20;
        issues.push(QualityIssue::fail(format!(
            "{sharp} sharp corners (>= {SHARP_CORNER_DEG}°)"
        )));
    } else if sharp >= SHARP_CORNERS_WARN {
        score -= 10;
        issues.push(QualityIssue::warn(format!(
            "{sharp} sharp corners (>= {SHARP_CORNER_DEG}°)"
        )));
    }

    // Tight radius
    let radius_limit = MIN_RADIUS_WIDTH_FACTOR * track.average_width();
    let (min_radius, min_radius_indices) = robust_min_radius(center, radius_limit);
    if min_radius < radius_limit {
        score -= 20;
        issues.push(QualityIssue::fail(format!(
            "min curvature radius {min_radius:.2} below {MIN_RADIUS_WIDTH_FACTOR}x track width ({radius_limit:.2})"
        )));
    }

    // Boxy layouts
    let headings = segment_headings(center);
    let axis_aligned_indices: Vec<usize> = headings
        .iter()
        .enumerate()
        .filter_map(|(i, h)| h.filter(|&h| is_axis_aligned(h)).map(|_| i))
        .collect();
    let valid_segments = headings.iter().flatten().count().max(1);
    let axis_aligned_ratio = axis_aligned_indices.len() as f32 / valid_segments as f32;
    let boxy_fail = axis_aligned_ratio >= BOXY_FAIL_RATIO;
    if boxy_fail {
        score -= 26;
        issues.push(QualityIssue::fail(format!(
            "boxy layout: {:.0}% of segments axis-aligned",
            axis_aligned_ratio * 100.0
        )));
    } else if axis_aligned_ratio >= BOXY_WARN_RATIO {
        score -= 12;
        issues.push(QualityIssue::warn(format!(
            "{:.0}% of segments axis-aligned",
            axis_aligned_ratio * 100.0
        )));
    }

    // Steering jitter
    let smoothness_jitter = (0..n)
        .map(|i| (turns[i] - turns[wrap_index(i as isize - 1, n)]).abs())
        .sum::<f32>()
        / n as f32;
    if smoothness_jitter > JITTER_LIMIT_DEG {
        score -= 14;
        issues.push(QualityIssue::warn(format!(
            "jittery turning: average turn change {smoothness_jitter:.1}° > {JITTER_LIMIT_DEG}°"
        )));
    }

    // Directional variety
    let (direction_entropy, unique_direction_bins) = direction_entropy(&headings);
    if direction_entropy < MIN_ENTROPY || unique_direction_bins < MIN_OCCUPIED_BINS {
        score -= 16;
        issues.push(QualityIssue::warn(format!(
            "low direction variety: entropy {direction_entropy:.2}, {unique_direction_bins} of {DIRECTION_BINS} bins"
        )));
    }

    QualityReport {
        score: score.clamp(0, 100),
        max_turn_angle_deg: max_turn,
        sharp_corner_count: sharp,
        min_radius,
        axis_aligned_ratio,
        smoothness_jitter,
        direction_entropy,
        unique_direction_bins,
        boxy_fail,
        issues,
        sharp_corner_indices,
        axis_aligned_indices,
        min_radius_indices,
    }
}

/// Nearest non-degenerate step from `i` in direction `dir` (±1), at most two samples away
fn reach(center: &[Vec2], i: usize, dir: isize) -> Option<Vec2> {
    let n = center.len();
    (1..=TURN_REACH).find_map(|k| {
        let other = center[wrap_index(i as isize + dir * k, n)];
        let step = (other - center[i]) * dir as f32;
        (step.length_squared() > f32::EPSILON).then_some(step)
    })
}

/// Signed deflection at every sample, degrees
fn signed_turns_deg(center: &[Vec2]) -> Vec<f32> {
    (0..center.len())
        .map(|i| match (reach(center, i, -1), reach(center, i, 1)) {
            (Some(incoming), Some(outgoing)) => incoming
                .perp_dot(outgoing)
                .atan2(incoming.dot(outgoing))
                .to_degrees(),
            _ => 0.0,
        })
        .collect()
}

/// Heading of each segment `i → i + 1`; `None` for zero-length segments
fn segment_headings(center: &[Vec2]) -> Vec<Option<f32>> {
    let n = center.len();
    (0..n)
        .map(|i| {
            let d = center[(i + 1) % n] - center[i];
            (d.length_squared() > f32::EPSILON).then(|| heading_deg(d))
        })
        .collect()
}

fn is_axis_aligned(heading: f32) -> bool {
    let rem = heading % 90.0;
    rem.min(90.0 - rem) <= AXIS_TOLERANCE_DEG
}

/// Normalized Shannon entropy of the heading histogram and the number of occupied bins
fn direction_entropy(headings: &[Option<f32>]) -> (f32, usize) {
    let mut bins = [0usize; DIRECTION_BINS];
    let bin_width = 360.0 / DIRECTION_BINS as f32;
    for h in headings.iter().flatten() {
        bins[(h / bin_width) as usize % DIRECTION_BINS] += 1;
    }
    let total: usize = bins.iter().sum();
    if total == 0 {
        return (0.0, 0);
    }
    let entropy: f32 = bins
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f32 / total as f32;
            -p * p.log2()
        })
        .sum();
    let occupied = bins.iter().filter(|&&c| c > 0).count();
    (entropy / (DIRECTION_BINS as f32).log2(), occupied)
}

/// Radius of the circle through three points; infinite when they are collinear
pub fn circumradius(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    let cross = (b - a).perp_dot(c - a).abs();
    if cross <= f32::EPSILON {
        return f32::INFINITY;
    }
    (a - b).length() * (b - c).length() * (c - a).length() / (2.0 * cross)
}

/// Smaller of the per-sample minimum radius and the 14th-percentile radius
/// of a stride-2, ±2-sample sweep. Also returns the samples whose local
/// radius is under `limit` (or the tightest sample when none is).
fn robust_min_radius(center: &[Vec2], limit: f32) -> (f32, Vec<usize>) {
    let n = center.len();
    let at = |i: usize, k: isize| center[wrap_index(i as isize + k, n)];

    let local: Vec<f32> = (0..n)
        .map(|i| circumradius(at(i, -1), center[i], at(i, 1)))
        .collect();
    let (tightest, local_min) = local
        .iter()
        .enumerate()
        .fold((0, f32::INFINITY), |(bi, bv), (i, &v)| {
            if v < bv { (i, v) } else { (bi, bv) }
        });

    let mut wide: Vec<f32> = (0..n)
        .step_by(2)
        .map(|i| circumradius(at(i, -2), center[i], at(i, 2)))
        .collect();
    wide.sort_by(|a, b| a.total_cmp(b));
    let idx = (((wide.len() - 1) as f32) * RADIUS_PERCENTILE).round() as usize;
    let percentile = wide[idx];

    let mut indices: Vec<usize> = (0..n).filter(|&i| local[i] < limit).collect();
    if indices.is_empty() {
        indices.push(tightest);
    }
    (local_min.min(percentile), indices)
}
