//! Authoring loop
//!
//! Regenerates with successive seeds and variants until a track passes
//! validation. When none does, the best-scoring attempt is kept.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::renderer::TrackBoundary;
use crate::settings::Settings;
use crate::track::{CandidateSynthesizer, GenerationDiagnostics, Track, TrackGenerator};
use crate::validate::{ValidationResult, validate};

/// Summary of one generation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttemptRecord {
    pub seed: u64,
    pub variant: i32,
    pub fallback_used: bool,
    pub passed: bool,
    pub quality_score: i32,
}

/// The track the authoring loop settled on
#[derive(Debug, Clone, Serialize)]
pub struct AuthoredTrack {
    pub track: Track,
    pub boundary: TrackBoundary,
    pub result: ValidationResult,
    pub diagnostics: GenerationDiagnostics,
    /// Index into `attempts` of the kept attempt
    pub chosen: usize,
    /// Every attempt made, in order
    pub attempts: Vec<AttemptRecord>,
}

/// Build, render and validate a single attempt
fn run_attempt<S: CandidateSynthesizer>(
    settings: &Settings,
    generator: &TrackGenerator<S>,
    k: u32,
) -> (AuthoredTrack, AttemptRecord) {
    let seed = settings.seed.wrapping_add(u64::from(k));
    let variant = settings.variant.wrapping_add(k as i32);
    let mut rng = Pcg32::seed_from_u64(seed);

    let (track, diagnostics) = generator.build_with_diagnostics(
        settings.half_width,
        settings.half_height,
        &mut rng,
        variant,
    );
    let boundary = TrackBoundary::from_track(&track);
    let result = validate(Some(&track), settings.marble_count, Some(&boundary));

    log::info!(
        "Attempt {}: seed={}, variant={}, passed={}, score={} ({})",
        k + 1,
        seed,
        variant,
        result.passed,
        result.quality_score,
        result.band.as_str()
    );
    for reason in &result.reasons {
        log::debug!("  {}", reason);
    }

    let record = AttemptRecord {
        seed,
        variant,
        fallback_used: diagnostics.fallback_used,
        passed: result.passed,
        quality_score: result.quality_score,
    };
    let authored = AuthoredTrack {
        track,
        boundary,
        result,
        diagnostics,
        chosen: k as usize,
        attempts: Vec::new(),
    };
    (authored, record)
}

/// Generate and validate until a track passes or attempts run out.
///
/// Attempt `k` seeds a fresh `Pcg32` with `seed + k` and uses `variant + k`.
/// At least one attempt is always made.
pub fn author_track<S: CandidateSynthesizer>(
    settings: &Settings,
    generator: &TrackGenerator<S>,
) -> AuthoredTrack {
    let attempts_allowed = settings.max_attempts.max(1);

    let (mut best, first) = run_attempt(settings, generator, 0);
    let mut attempts = vec![first];

    for k in 1..attempts_allowed {
        if best.result.passed {
            break;
        }
        let (candidate, record) = run_attempt(settings, generator, k);
        attempts.push(record);
        // Strictly better only, so the earliest attempt wins ties
        if candidate.result.passed || candidate.result.quality_score > best.result.quality_score {
            best = candidate;
        }
    }

    if !best.result.passed {
        log::warn!(
            "No attempt passed validation after {} tries; keeping variant {} with score {}",
            attempts.len(),
            best.diagnostics.variant,
            best.result.quality_score
        );
    }

    best.attempts = attempts;
    best
}
