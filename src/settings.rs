//! Engine settings
//!
//! Stored as JSON next to the level plans. Missing fields fall back to
//! their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{FINISH_DELAY, MAX_STEP};
use crate::error::EngineError;
use crate::sim::{ActorRegistry, LevelParser};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for coin phases (same seed, same level)
    pub seed: u64,
    /// Seconds between a win/loss and the level reporting finished
    pub finish_delay: f64,
    /// Largest simulation sub-step in seconds
    pub max_step: f64,
    /// How long the headless driver runs
    pub demo_seconds: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            finish_delay: FINISH_DELAY,
            max_step: MAX_STEP,
            demo_seconds: 10.0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings in {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("No settings at {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Parser configured from these settings
    pub fn parser(&self, registry: ActorRegistry) -> LevelParser {
        LevelParser::new(registry)
            .with_seed(self.seed)
            .with_finish_delay(self.finish_delay)
    }
}
