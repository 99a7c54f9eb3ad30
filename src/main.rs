//! Marble Track command line
//!
//! Authors a track from settings and prints the validation report as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use marble_track::{
    AttemptRecord, AuthoredTrack, GenerationDiagnostics, Settings, TrackGenerator,
    ValidationResult, author_track,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "marble-track")]
#[command(about = "Author a track and print its validation report as JSON")]
#[command(version)]
struct Args {
    /// Load settings from a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed of the first attempt
    #[arg(long)]
    seed: Option<u64>,

    /// Layout variant of the first attempt
    #[arg(long, allow_hyphen_values = true)]
    variant: Option<i32>,

    /// Arena half-width
    #[arg(long = "width")]
    half_width: Option<f32>,

    /// Arena half-height
    #[arg(long = "height")]
    half_height: Option<f32>,

    /// Marbles on the start grid
    #[arg(long)]
    marbles: Option<usize>,

    /// Maximum generation attempts
    #[arg(long)]
    attempts: Option<u32>,

    /// Include the full track arrays in the output
    #[arg(long)]
    track: bool,

    /// Print the effective settings and exit
    #[arg(long)]
    print_settings: bool,
}

impl Args {
    /// Apply command line overrides on top of loaded settings
    fn apply(&self, settings: &mut Settings) {
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(variant) = self.variant {
            settings.variant = variant;
        }
        if let Some(half_width) = self.half_width {
            settings.half_width = half_width;
        }
        if let Some(half_height) = self.half_height {
            settings.half_height = half_height;
        }
        if let Some(marbles) = self.marbles {
            settings.marble_count = marbles;
        }
        if let Some(attempts) = self.attempts {
            settings.max_attempts = attempts;
        }
    }
}

/// JSON document printed on success
#[derive(Serialize)]
struct Report<'a> {
    settings: &'a Settings,
    #[serde(flatten)]
    authored: ReportBody<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ReportBody<'a> {
    Full(&'a AuthoredTrack),
    Summary {
        diagnostics: &'a GenerationDiagnostics,
        result: &'a ValidationResult,
        chosen: usize,
        attempts: &'a [AttemptRecord],
        sample_count: usize,
        average_width: f32,
    },
}

fn run(args: &Args) -> Result<bool, String> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path).map_err(|e| format!("{}: {e}", path.display()))?,
        None => Settings::default(),
    };
    args.apply(&mut settings);

    if args.print_settings {
        println!("{}", settings.to_json().map_err(|e| e.to_string())?);
        return Ok(true);
    }

    log::info!(
        "Authoring track: arena {}x{}, seed={}, variant={}, marbles={}",
        settings.half_width,
        settings.half_height,
        settings.seed,
        settings.variant,
        settings.marble_count
    );

    let generator: TrackGenerator = TrackGenerator::default();
    let authored = author_track(&settings, &generator);

    let body = if args.track {
        ReportBody::Full(&authored)
    } else {
        ReportBody::Summary {
            diagnostics: &authored.diagnostics,
            result: &authored.result,
            chosen: authored.chosen,
            attempts: &authored.attempts,
            sample_count: authored.track.sample_count(),
            average_width: authored.track.average_width(),
        }
    };
    let report = Report {
        settings: &settings,
        authored: body,
    };
    let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
    println!("{json}");

    Ok(authored.result.passed)
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            log::warn!("Track did not pass validation");
            ExitCode::from(1)
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
