//! Demo scenario settings
//!
//! Loaded from `scenario.toml` in the working directory when present,
//! falling back to defaults otherwise.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Parameters for one headless simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Length of one in-game day in celestial seconds
    pub day_length_seconds: f32,
    /// Days in a year
    pub days_per_year: u32,
    /// Days each season lasts
    pub days_per_season: u32,
    /// Seconds advanced per simulation tick
    pub tick_seconds: f32,
    /// Days to simulate before exiting
    pub simulate_days: u32,
    /// Seed for the weather scheduler
    pub weather_seed: u64,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            day_length_seconds: 7200.0,
            days_per_year: 240,
            days_per_season: 60,
            tick_seconds: 600.0,
            simulate_days: 90,
            weather_seed: 7,
        }
    }
}

impl Scenario {
    /// Load a scenario from disk, or return defaults if missing or invalid
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("no scenario file at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(scenario) => {
                    info!("loaded scenario from {:?}", path);
                    scenario
                }
                Err(e) => {
                    warn!("failed to parse scenario: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("failed to read scenario file: {}, using defaults", e);
                Self::default()
            }
        }
    }
}
