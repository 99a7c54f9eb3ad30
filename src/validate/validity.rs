//! Structural validity gates
//!
//! Each gate appends human-readable reasons; an empty list means the track is
//! structurally sound. All gates run even when an earlier one fails.

use crate::consts::MARBLE_RADIUS;
use crate::renderer::BoundaryProvider;
use crate::track::{Track, crossing_pairs};

/// Maximum distance between a start line endpoint midpoint and the center sample
const START_MIDPOINT_TOLERANCE: f32 = 0.01;
/// Clearance kept between the outermost marble and the road edge
const SPAWN_EDGE_MARGIN: f32 = 0.25;
/// Minimum lane spacing, in marble radii
const SPAWN_MIN_SPACING_RADII: f32 = 2.1;
const MAX_SPAWN_COLUMNS: usize = 4;
/// Allowed difference between rendered strip length and `N + 1`
const COLLIDER_COUNT_SLACK: usize = 2;
/// Allowed distance between a rendered edge point and the track edge
const COLLIDER_TOLERANCE: f32 = 0.1;

/// Start/finish line sits on the road and is centered on sample 0
pub fn check_start_on_road(track: &Track, reasons: &mut Vec<String>) {
    let half_width = track.half_width()[0];
    if half_width <= MARBLE_RADIUS {
        reasons.push(format!(
            "Start/finish is off-road: half-width {half_width:.3} does not exceed marble radius {MARBLE_RADIUS}"
        ));
    }
    let midpoint = (track.edge_point(0, 1.0) + track.edge_point(0, -1.0)) * 0.5;
    let offset = (midpoint - track.center()[0]).length();
    if offset > START_MIDPOINT_TOLERANCE {
        reasons.push(format!(
            "Start/finish line is not centered on the track: midpoint off by {offset:.3}"
        ));
    }
}

/// Usable half-extent for lane centers at the start line
fn usable_half_extent(half_width: f32) -> f32 {
    half_width - MARBLE_RADIUS - SPAWN_EDGE_MARGIN
}

fn lane_spacing(usable: f32, columns: usize) -> f32 {
    if columns > 1 {
        2.0 * usable / (columns - 1) as f32
    } else {
        f32::INFINITY
    }
}

/// Number of spawn columns that fit across a start line of the given half-width
pub fn spawn_columns(half_width: f32, marble_count: usize) -> usize {
    let usable = usable_half_extent(half_width);
    let mut columns = MAX_SPAWN_COLUMNS.min(marble_count);
    while columns > 1 && lane_spacing(usable, columns) < SPAWN_MIN_SPACING_RADII * MARBLE_RADIUS {
        columns -= 1;
    }
    columns
}

/// Lateral offsets (along the start normal) of each spawn lane
pub fn spawn_lane_offsets(half_width: f32, marble_count: usize) -> Vec<f32> {
    let columns = spawn_columns(half_width, marble_count);
    let usable = usable_half_extent(half_width);
    match columns {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let spacing = lane_spacing(usable, columns);
            (0..columns).map(|k| -usable + k as f32 * spacing).collect()
        }
    }
}

/// Every spawn lane keeps its marble on the road
pub fn check_spawn_fits(track: &Track, marble_count: usize, reasons: &mut Vec<String>) {
    let half_width = track.half_width()[0];
    let offsets = spawn_lane_offsets(half_width, marble_count);
    if let Some(worst) = offsets
        .iter()
        .map(|o| o.abs() + MARBLE_RADIUS)
        .find(|&extent| extent > half_width)
    {
        reasons.push(format!(
            "Spawn grid does not fit: {} columns reach {worst:.3}, half-width is {half_width:.3}",
            offsets.len()
        ));
    }
}

/// No two same-layer segments cross
pub fn check_self_intersection(track: &Track, reasons: &mut Vec<String>) {
    let n = track.sample_count();
    let layer = track.layer();
    for (i, j) in crossing_pairs(track.center()) {
        if layer[i] == layer[j] {
            reasons.push(format!(
                "Self-intersection: segment {}-{} crosses segment {}-{} on layer '{}'",
                i,
                (i + 1) % n,
                j,
                (j + 1) % n,
                layer[i].as_str()
            ));
        } else {
            log::debug!(
                "Segments {} and {} cross on different layers ({} / {})",
                i,
                j,
                layer[i].as_str(),
                layer[j].as_str()
            );
        }
    }
}

/// Rendered edge strips agree with the track they were built from
pub fn check_collider(
    track: &Track,
    boundary: Option<&dyn BoundaryProvider>,
    reasons: &mut Vec<String>,
) {
    let Some(boundary) = boundary else {
        reasons.push("Collider check failed: no rendered track boundary available".to_string());
        return;
    };

    let n = track.sample_count();
    let expected_len = n + 1;
    let edges = [("inner", 1.0, boundary.inner()), ("outer", -1.0, boundary.outer())];

    for (name, side, points) in edges {
        let Some(points) = points else {
            reasons.push(format!("Collider check failed: rendered boundary has no {name} edge"));
            continue;
        };
        if points.len().abs_diff(expected_len) > COLLIDER_COUNT_SLACK {
            reasons.push(format!(
                "Collider check failed: {name} edge has {} points, expected {expected_len}",
                points.len()
            ));
            continue;
        }
        let deviation = points
            .iter()
            .take(expected_len)
            .enumerate()
            .map(|(i, p)| (i, (*p - track.edge_point(i % n, side)).length()))
            .find(|&(_, d)| d > COLLIDER_TOLERANCE);
        if let Some((i, d)) = deviation {
            reasons.push(format!(
                "Collider check failed: {name} edge point {i} is {d:.3} away from the track edge"
            ));
        }
    }
}

/// Run every validity gate
pub fn validity_reasons(
    track: &Track,
    marble_count: usize,
    boundary: Option<&dyn BoundaryProvider>,
) -> Vec<String> {
    let mut reasons = Vec::new();
    check_start_on_road(track, &mut reasons);
    check_spawn_fits(track, marble_count, &mut reasons);
    check_self_intersection(track, &mut reasons);
    check_collider(track, boundary, &mut reasons);
    reasons
}
