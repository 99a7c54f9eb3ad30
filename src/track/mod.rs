//! Track generation module
//!
//! Everything that turns arena extents, a seeded RNG and a variant into a
//! finished [`Track`]. This module must stay pure and deterministic:
//! - Seeded RNG only (the fallback path derives its own seed from the variant)
//! - One synthesis attempt per build, bounded work
//! - No rendering or platform dependencies

pub mod align;
pub mod data;
pub mod derive;
pub mod fallback;
pub mod generator;
pub mod intersect;
pub mod synth;

pub use align::{alignment_window, best_start_index, rotate_to_best_straight};
pub use data::{CrossoverLayer, Track, TrackError};
pub use derive::{base_half_width, build_track_data};
pub use fallback::{build_fallback_rounded_rectangle, fallback_points, fallback_seed};
pub use generator::{GenerationDiagnostics, TrackGenerator};
pub use intersect::{SegmentHit, coarse_self_intersects, crossing_pairs, segment_intersection};
pub use synth::{Candidate, CandidateSynthesizer, ControlLoopSynthesizer, SynthesisDiagnostics};
