//! Track data model
//!
//! A track is a sampled closed ring. Every per-sample quantity lives in its
//! own parallel array, indexed the same way as `center`; index `N - 1`
//! adjoins index `0`.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wrap_index;

/// Crossover zone tag.
///
/// Two segments may cross each other only when they sit on different layers
/// (a bridge over a tunnel, for example).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossoverLayer {
    #[default]
    #[serde(rename = "none")]
    Ground,
    Bridge,
    Tunnel,
}

impl CrossoverLayer {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrossoverLayer::Ground => "none",
            CrossoverLayer::Bridge => "bridge",
            CrossoverLayer::Tunnel => "tunnel",
        }
    }
}

/// Errors from checked track construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
    #[error("track must contain at least one sample")]
    Empty,
    #[error("`{name}` has {len} samples, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        len: usize,
        expected: usize,
    },
}

/// A finished, sampled track.
///
/// Built once by the generator (or by [`Track::from_parts`] for hand-made
/// layouts) and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TrackParts")]
pub struct Track {
    center: Vec<Vec2>,
    tangent: Vec<Vec2>,
    normal: Vec<Vec2>,
    half_width: Vec<f32>,
    curvature: Vec<f32>,
    layer: Vec<CrossoverLayer>,
}

/// Unchecked wire form of a [`Track`]; deserialized tracks pass through [`Track::from_parts`]
#[derive(Deserialize)]
struct TrackParts {
    center: Vec<Vec2>,
    tangent: Vec<Vec2>,
    normal: Vec<Vec2>,
    half_width: Vec<f32>,
    curvature: Vec<f32>,
    #[serde(default)]
    layer: Option<Vec<CrossoverLayer>>,
}

impl TryFrom<TrackParts> for Track {
    type Error = TrackError;

    fn try_from(parts: TrackParts) -> Result<Self, Self::Error> {
        let layer = parts
            .layer
            .unwrap_or_else(|| vec![CrossoverLayer::default(); parts.center.len()]);
        Track::from_parts(
            parts.center,
            parts.tangent,
            parts.normal,
            parts.half_width,
            parts.curvature,
            layer,
        )
    }
}

impl Track {
    /// Assemble a track from explicit parallel arrays.
    ///
    /// All arrays must have the same, non-zero length.
    pub fn from_parts(
        center: Vec<Vec2>,
        tangent: Vec<Vec2>,
        normal: Vec<Vec2>,
        half_width: Vec<f32>,
        curvature: Vec<f32>,
        layer: Vec<CrossoverLayer>,
    ) -> Result<Self, TrackError> {
        let expected = center.len();
        if expected == 0 {
            return Err(TrackError::Empty);
        }
        let lengths = [
            ("tangent", tangent.len()),
            ("normal", normal.len()),
            ("half_width", half_width.len()),
            ("curvature", curvature.len()),
            ("layer", layer.len()),
        ];
        for (name, len) in lengths {
            if len != expected {
                return Err(TrackError::LengthMismatch {
                    name,
                    len,
                    expected,
                });
            }
        }
        Ok(Self {
            center,
            tangent,
            normal,
            half_width,
            curvature,
            layer,
        })
    }

    /// Internal constructor for arrays already known to be parallel and non-empty
    pub(crate) fn from_derived(
        center: Vec<Vec2>,
        tangent: Vec<Vec2>,
        normal: Vec<Vec2>,
        half_width: Vec<f32>,
        curvature: Vec<f32>,
    ) -> Self {
        debug_assert!(!center.is_empty());
        let layer = vec![CrossoverLayer::default(); center.len()];
        Self {
            center,
            tangent,
            normal,
            half_width,
            curvature,
            layer,
        }
    }

    /// Tag samples `start..start + count` (wrapping) with a crossover layer
    pub fn with_layer_range(mut self, start: usize, count: usize, layer: CrossoverLayer) -> Self {
        for k in 0..count.min(self.sample_count()) {
            let i = self.wrap((start + k) as isize);
            self.layer[i] = layer;
        }
        self
    }

    #[inline]
    pub fn sample_count(&self) -> usize {
        self.center.len()
    }

    /// Map any integer index onto `[0, sample_count)`
    #[inline]
    pub fn wrap(&self, i: isize) -> usize {
        wrap_index(i, self.sample_count())
    }

    /// Number of forward steps needed to go from sample `a` to sample `b`
    #[inline]
    pub fn forward_delta(&self, a: usize, b: usize) -> usize {
        self.wrap(b as isize - a as isize)
    }

    pub fn center(&self) -> &[Vec2] {
        &self.center
    }

    pub fn tangent(&self) -> &[Vec2] {
        &self.tangent
    }

    pub fn normal(&self) -> &[Vec2] {
        &self.normal
    }

    pub fn half_width(&self) -> &[f32] {
        &self.half_width
    }

    pub fn curvature(&self) -> &[f32] {
        &self.curvature
    }

    pub fn layer(&self) -> &[CrossoverLayer] {
        &self.layer
    }

    /// Center point at a wrapped index
    #[inline]
    pub fn center_at(&self, i: isize) -> Vec2 {
        self.center[self.wrap(i)]
    }

    /// Edge point at sample `i`: `side = 1.0` for the inner (left) edge, `-1.0` for the outer edge
    #[inline]
    pub fn edge_point(&self, i: usize, side: f32) -> Vec2 {
        self.center[i] + self.normal[i] * self.half_width[i] * side
    }

    /// Mean drivable width (twice the mean half-width)
    pub fn average_width(&self) -> f32 {
        2.0 * self.half_width.iter().sum::<f32>() / self.sample_count() as f32
    }

    /// Rotate every parallel array so that sample `start` becomes index 0
    pub(crate) fn rotate_start(&mut self, start: usize) {
        let start = start % self.sample_count();
        if start == 0 {
            return;
        }
        self.center.rotate_left(start);
        self.tangent.rotate_left(start);
        self.normal.rotate_left(start);
        self.half_width.rotate_left(start);
        self.curvature.rotate_left(start);
        self.layer.rotate_left(start);
    }
}
