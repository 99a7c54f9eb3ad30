//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Line-list vertices (two per segment) along a polyline
pub fn line_list(points: &[Vec2], closed: bool, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }
    let segments = if closed {
        points.len()
    } else {
        points.len() - 1
    };
    let mut vertices = Vec::with_capacity(segments * 2);
    for i in 0..segments {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        vertices.push(Vertex::at(a, color));
        vertices.push(Vertex::at(b, color));
    }
    vertices
}

/// Filled quad strip between two parallel edges, two triangles per segment.
///
/// `color_for` picks the color of segment `i` (from sample `i` to `i + 1`).
pub fn band<F>(inner: &[Vec2], outer: &[Vec2], color_for: F) -> Vec<Vertex>
where
    F: Fn(usize) -> [f32; 4],
{
    let segments = inner.len().min(outer.len()).saturating_sub(1);
    let mut vertices = Vec::with_capacity(segments * 6);

    for i in 0..segments {
        let color = color_for(i);
        let (inner1, inner2) = (inner[i], inner[i + 1]);
        let (outer1, outer2) = (outer[i], outer[i + 1]);

        // Two triangles per segment
        vertices.push(Vertex::at(inner1, color));
        vertices.push(Vertex::at(outer1, color));
        vertices.push(Vertex::at(inner2, color));

        vertices.push(Vertex::at(inner2, color));
        vertices.push(Vertex::at(outer1, color));
        vertices.push(Vertex::at(outer2, color));
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::at(
            center + radius * Vec2::new(theta1.cos(), theta1.sin()),
            color,
        ));
        vertices.push(Vertex::at(
            center + radius * Vec2::new(theta2.cos(), theta2.sin()),
            color,
        ));
    }

    vertices
}
