//! Start/finish placement
//!
//! The start line goes where the track is straightest and widest: every
//! sample is scored by the curvature it sits in minus a small reward for
//! width, and the lowest-scoring sample is rotated to index 0.

use super::data::Track;

/// Weight of summed half-width against summed curvature
const WIDTH_REWARD: f32 = 0.02;

/// Half-window size used for a track of `sample_count` samples
pub fn alignment_window(sample_count: usize) -> usize {
    (sample_count / 28).clamp(6, 24)
}

fn window_score(track: &Track, i: usize, window: usize) -> f32 {
    let w = window as isize;
    let mut curvature = 0.0;
    let mut width = 0.0;
    for k in -w..=w {
        let j = track.wrap(i as isize + k);
        curvature += track.curvature()[j];
        width += track.half_width()[j];
    }
    curvature - WIDTH_REWARD * width
}

/// Index whose window scores lowest; the earliest index wins ties
pub fn best_start_index(track: &Track, window: usize) -> usize {
    let mut best = 0;
    let mut best_score = f32::INFINITY;
    for i in 0..track.sample_count() {
        let score = window_score(track, i, window);
        if score < best_score {
            best_score = score;
            best = i;
        }
    }
    best
}

/// Rotate the track so the best start index becomes sample 0.
///
/// Returns the index (in the original order) that was moved to the front.
pub fn rotate_to_best_straight(track: &mut Track) -> usize {
    let window = alignment_window(track.sample_count());
    let start = best_start_index(track, window);
    track.rotate_start(start);
    log::debug!(
        "Start line moved to sample {} of {} (window ±{})",
        start,
        track.sample_count(),
        window
    );
    start
}
