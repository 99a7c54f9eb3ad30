//! Generation settings
//!
//! Read from a JSON file; any field left out keeps its default.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Track generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Arena half-extent along x
    pub half_width: f32,
    /// Arena half-extent along y
    pub half_height: f32,

    // === Generation ===
    /// RNG seed of the first attempt
    pub seed: u64,
    /// Layout variant of the first attempt
    pub variant: i32,
    /// Regeneration attempts before settling for the best score
    pub max_attempts: u32,

    // === Race ===
    /// Marbles placed on the start grid
    pub marble_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            half_width: 40.0,
            half_height: 30.0,

            seed: 1,
            variant: 0,
            max_attempts: 8,

            marble_count: 8,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
