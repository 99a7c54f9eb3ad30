//! Track validation
//!
//! Two layers:
//! - Validity gates (start placement, spawn grid, same-layer crossings,
//!   collider agreement) which are pass/fail
//! - Drivability scoring (0-100) with graded `FAIL`/`WARN` issues
//!
//! A track passes when every gate passes and the score is at least
//! [`PASS_SCORE`](crate::consts::PASS_SCORE).

pub mod quality;
pub mod result;
pub mod validity;

pub use quality::{QualityReport, circumradius, evaluate_quality};
pub use result::{Band, QualityIssue, Severity, ValidationResult};
pub use validity::{spawn_columns, spawn_lane_offsets, validity_reasons};

use crate::consts::MIN_VALIDATION_SAMPLES;
use crate::renderer::BoundaryProvider;
use crate::track::Track;

/// Reason reported for a missing or undersized track
pub(crate) const DEGENERATE_REASON: &str = "track is missing or has fewer than 8 samples";

/// Validate a track against its rendered boundary.
///
/// A missing track, or one with fewer than
/// [`MIN_VALIDATION_SAMPLES`](crate::consts::MIN_VALIDATION_SAMPLES) samples,
/// fails with score 0 and no further checks.
pub fn validate(
    track: Option<&Track>,
    marble_count: usize,
    boundary: Option<&dyn BoundaryProvider>,
) -> ValidationResult {
    let Some(track) = track.filter(|t| t.sample_count() >= MIN_VALIDATION_SAMPLES) else {
        log::debug!("Validation skipped: degenerate track");
        let report = QualityReport::degenerate(DEGENERATE_REASON);
        let reasons = report.issues.iter().map(|i| i.to_string()).collect();
        return ValidationResult::new(reasons, report);
    };

    let reasons = validity_reasons(track, marble_count, boundary);
    let report = evaluate_quality(track);
    let result = ValidationResult::new(reasons, report);

    log::debug!(
        "Validated {} samples: passed={}, score={} ({}), {} reasons",
        track.sample_count(),
        result.passed,
        result.quality_score,
        result.band.as_str(),
        result.reasons.len()
    );

    result
}
