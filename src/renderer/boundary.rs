//! Track boundary strips
//!
//! The inner and outer edges are closed strips of `N + 1` points (the last
//! point repeats the first) following the centerline winding. The same
//! strips feed the line renderer and the collider consistency check.

use glam::Vec2;
use serde::Serialize;

use super::shapes::{band, circle, line_list};
use super::vertex::{Vertex, colors};
use crate::track::{CrossoverLayer, Track};
use crate::validate::QualityReport;

/// Source of rendered edge strips for validation
pub trait BoundaryProvider {
    /// Inner (left, `+normal`) edge strip, if one was rendered
    fn inner(&self) -> Option<&[Vec2]>;
    /// Outer (right, `-normal`) edge strip, if one was rendered
    fn outer(&self) -> Option<&[Vec2]>;
}

/// Inner and outer edge strips of a track
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackBoundary {
    inner: Vec<Vec2>,
    outer: Vec<Vec2>,
}

impl TrackBoundary {
    /// Offset the centerline by `±normal · half_width` and close both strips
    pub fn from_track(track: &Track) -> Self {
        let n = track.sample_count();
        let edge = |side: f32| -> Vec<Vec2> {
            (0..=n).map(|i| track.edge_point(i % n, side)).collect()
        };
        Self {
            inner: edge(1.0),
            outer: edge(-1.0),
        }
    }

    /// Wrap edge strips produced elsewhere
    pub fn from_edges(inner: Vec<Vec2>, outer: Vec<Vec2>) -> Self {
        Self { inner, outer }
    }

    pub fn inner_points(&self) -> &[Vec2] {
        &self.inner
    }

    pub fn outer_points(&self) -> &[Vec2] {
        &self.outer
    }
}

impl BoundaryProvider for TrackBoundary {
    fn inner(&self) -> Option<&[Vec2]> {
        Some(&self.inner)
    }

    fn outer(&self) -> Option<&[Vec2]> {
        Some(&self.outer)
    }
}

/// Start/finish line endpoints, inner edge first
pub fn start_finish_segment(track: &Track) -> (Vec2, Vec2) {
    (track.edge_point(0, 1.0), track.edge_point(0, -1.0))
}

/// Line-list vertices for the center line, both edges and the start line
pub fn line_vertices(track: &Track, boundary: &TrackBoundary) -> Vec<Vertex> {
    let mut vertices = line_list(track.center(), true, colors::CENTER_LINE);
    vertices.extend(line_list(boundary.inner_points(), false, colors::INNER_EDGE));
    vertices.extend(line_list(boundary.outer_points(), false, colors::OUTER_EDGE));
    let (a, b) = start_finish_segment(track);
    vertices.push(Vertex::at(a, colors::START_LINE));
    vertices.push(Vertex::at(b, colors::START_LINE));
    vertices
}

/// Filled road surface, tinted by crossover layer
pub fn road_vertices(track: &Track, boundary: &TrackBoundary) -> Vec<Vertex> {
    band(boundary.inner_points(), boundary.outer_points(), |i| {
        match track.layer()[i % track.sample_count()] {
            CrossoverLayer::Ground => colors::ROAD,
            CrossoverLayer::Bridge => colors::BRIDGE,
            CrossoverLayer::Tunnel => colors::TUNNEL,
        }
    })
}

/// Marker discs at the samples a quality report flagged
pub fn debug_markers(track: &Track, report: &QualityReport) -> Vec<Vertex> {
    let radius = track.average_width() * 0.25;
    let groups = [
        (&report.sharp_corner_indices, colors::SHARP_CORNER),
        (&report.axis_aligned_indices, colors::AXIS_ALIGNED),
        (&report.min_radius_indices, colors::MIN_RADIUS),
    ];
    let mut vertices = Vec::new();
    for (indices, color) in groups {
        for &i in indices.iter() {
            if i < track.sample_count() {
                vertices.extend(circle(track.center()[i], radius, color, 8));
            }
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::build_track_data;
    use crate::validate::evaluate_quality;
    use std::f32::consts::TAU;

    fn circle_track(n: usize, radius: f32) -> Track {
        let points = (0..n)
            .map(|i| {
                let a = TAU * i as f32 / n as f32;
                Vec2::new(a.cos(), a.sin()) * radius
            })
            .collect();
        build_track_data(points, 30.0, 30.0).unwrap()
    }

    #[test]
    fn test_boundary_strips_are_closed() {
        let track = circle_track(40, 20.0);
        let boundary = TrackBoundary::from_track(&track);
        assert_eq!(boundary.inner_points().len(), 41);
        assert_eq!(boundary.outer_points().len(), 41);
        assert_eq!(boundary.inner_points()[0], boundary.inner_points()[40]);
    }

    #[test]
    fn test_inner_edge_is_inside_circle() {
        let track = circle_track(40, 20.0);
        let boundary = TrackBoundary::from_track(&track);
        for (inner, outer) in boundary.inner_points().iter().zip(boundary.outer_points()) {
            assert!(inner.length() < 20.0);
            assert!(outer.length() > 20.0);
        }
    }

    #[test]
    fn test_start_finish_spans_full_width() {
        let track = circle_track(40, 20.0);
        let (a, b) = start_finish_segment(&track);
        assert!(((a - b).length() - 2.0 * track.half_width()[0]).abs() < 1e-4);
        assert!(((a + b) * 0.5 - track.center()[0]).length() < 1e-4);
    }

    #[test]
    fn test_vertex_counts() {
        let track = circle_track(40, 20.0);
        let boundary = TrackBoundary::from_track(&track);
        // center (closed, 40 segs) + two open strips of 40 segs + start line
        assert_eq!(line_vertices(&track, &boundary).len(), 80 + 80 + 80 + 2);
        assert_eq!(road_vertices(&track, &boundary).len(), 40 * 6);
    }

    #[test]
    fn test_bridge_segments_are_tinted() {
        let track = circle_track(40, 20.0).with_layer_range(10, 5, CrossoverLayer::Bridge);
        let boundary = TrackBoundary::from_track(&track);
        let road = road_vertices(&track, &boundary);
        assert_eq!(road[10 * 6].color, colors::BRIDGE);
        assert_eq!(road[0].color, colors::ROAD);
    }

    #[test]
    fn test_debug_markers_follow_report() {
        let track = circle_track(40, 20.0);
        let report = evaluate_quality(&track);
        let markers = debug_markers(&track, &report);
        let flagged = report.sharp_corner_indices.len()
            + report.axis_aligned_indices.len()
            + report.min_radius_indices.len();
        assert_eq!(markers.len(), flagged * 24);
    }
}
