//! Vertex types for 2D track rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    #[inline]
    pub fn at(p: Vec2, color: [f32; 4]) -> Self {
        Self::new(p.x, p.y, color)
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::from(self.position)
    }
}

/// Raw bytes of a vertex slice, ready for upload to a GPU buffer
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Colors for track elements
pub mod colors {
    pub const CENTER_LINE: [f32; 4] = [0.9, 0.9, 0.9, 0.35];
    pub const INNER_EDGE: [f32; 4] = [0.95, 0.3, 0.25, 1.0];
    pub const OUTER_EDGE: [f32; 4] = [0.25, 0.55, 0.95, 1.0];
    pub const ROAD: [f32; 4] = [0.18, 0.18, 0.22, 1.0];
    pub const START_LINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BRIDGE: [f32; 4] = [0.55, 0.4, 0.25, 1.0];
    pub const TUNNEL: [f32; 4] = [0.1, 0.1, 0.12, 1.0];
    /// Debug markers
    pub const SHARP_CORNER: [f32; 4] = [1.0, 0.2, 0.2, 1.0];
    pub const AXIS_ALIGNED: [f32; 4] = [1.0, 0.85, 0.2, 1.0];
    pub const MIN_RADIUS: [f32; 4] = [0.8, 0.3, 1.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        let vertices = [Vertex::new(1.0, 2.0, colors::ROAD); 3];
        assert_eq!(as_bytes(&vertices).len(), 72);
    }

    #[test]
    fn test_vertex_pos_roundtrip() {
        let v = Vertex::at(Vec2::new(3.0, -4.0), colors::START_LINE);
        assert_eq!(v.pos(), Vec2::new(3.0, -4.0));
    }
}
