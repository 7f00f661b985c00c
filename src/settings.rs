//! Match settings
//!
//! Stored as JSON. Every field has a default, so a partial file only needs
//! the values it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{PhysicsParams, Team};

/// Settings loading/validation failure
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Match configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Ends in a match
    pub total_ends: u32,
    /// Stones each team throws per end
    pub stones_per_team: u32,

    // === Opponent ===
    /// Team played by the computer (`None` for two human teams)
    pub ai_team: Option<Team>,
    /// Opponent accuracy, 0.5 (wild) to 1.2 (sharp)
    pub ai_difficulty: f32,
    /// Ticks the opponent waits before its stone is released
    pub ai_think_ticks: u32,
    /// Seed for the opponent's shot variation
    pub seed: u64,

    // === Physics ===
    pub physics: PhysicsParams,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            total_ends: 8,
            stones_per_team: STONES_PER_TEAM,

            ai_team: Some(Team::Blue),
            ai_difficulty: 1.0,
            // 600 ms at 60 ticks per second
            ai_think_ticks: TICKS_PER_SECOND * 6 / 10,
            seed: 0x5EED,

            physics: PhysicsParams::default(),
        }
    }
}

impl MatchSettings {
    /// Settings for a match between two human teams
    pub fn two_player() -> Self {
        Self {
            ai_team: None,
            ..Self::default()
        }
    }

    /// Check ranges that would otherwise break the match flow
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.total_ends == 0 {
            return Err(SettingsError::Invalid("total_ends must be at least 1".into()));
        }
        if self.stones_per_team == 0 || self.stones_per_team > STONES_PER_TEAM {
            return Err(SettingsError::Invalid(format!(
                "stones_per_team must be between 1 and {STONES_PER_TEAM}, got {}",
                self.stones_per_team
            )));
        }
        if !(0.0..=1.2).contains(&self.ai_difficulty) {
            return Err(SettingsError::Invalid(format!(
                "ai_difficulty must be within [0, 1.2], got {}",
                self.ai_difficulty
            )));
        }
        let p = &self.physics;
        for (name, value) in [
            ("friction", p.friction),
            ("sweep_friction", p.sweep_friction),
            ("angular_drag", p.angular_drag),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(SettingsError::Invalid(format!(
                    "{name} must be within (0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
