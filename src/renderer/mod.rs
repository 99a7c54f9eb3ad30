//! Track rendering data
//!
//! Produces the edge strips and vertex lists an external line renderer
//! draws. No GPU work happens here; vertices are `Pod` so they can be
//! uploaded as-is.

pub mod boundary;
pub mod shapes;
pub mod vertex;

pub use boundary::{
    BoundaryProvider, TrackBoundary, debug_markers, line_vertices, road_vertices,
    start_finish_segment,
};
pub use vertex::{Vertex, as_bytes, colors};
