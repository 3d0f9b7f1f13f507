//! Game settings, stored as TOML.

use std::path::Path;
use std::time::Duration;

use chess_core::Color;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Search depths the hard tier accepts from settings.
pub const MIN_HARD_DEPTH: u8 = 2;
pub const MAX_HARD_DEPTH: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    HumanVsHuman,
    HumanVsComputer,
    ComputerVsComputer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Settings for the minimax tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardSettings {
    pub max_depth: u8,
    /// Pause a host should leave before showing a computer move
    pub move_delay_ms: u64,
    pub use_alpha_beta: bool,
}

impl HardSettings {
    pub fn depth(&self) -> u8 {
        self.max_depth.clamp(MIN_HARD_DEPTH, MAX_HARD_DEPTH)
    }

    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
    }
}

impl Default for HardSettings {
    fn default() -> Self {
        Self {
            max_depth: 2,
            move_delay_ms: 800,
            use_alpha_beta: true,
        }
    }
}

/// Credentials for the external move-suggestion service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionSettings {
    pub api_key: String,
    pub model: String,
}

impl SuggestionSettings {
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.model.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub mode: GameMode,
    /// Side played by the computer in human-vs-computer games
    pub computer_color: Color,
    pub white_level: Difficulty,
    pub black_level: Difficulty,
    pub hard: HardSettings,
    pub suggestion: SuggestionSettings,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            mode: GameMode::HumanVsHuman,
            computer_color: Color::Black,
            white_level: Difficulty::Easy,
            black_level: Difficulty::Easy,
            hard: HardSettings::default(),
            suggestion: SuggestionSettings::default(),
        }
    }
}

impl GameSettings {
    /// Whether the computer moves for `color` under the current mode.
    pub fn is_computer(&self, color: Color) -> bool {
        match self.mode {
            GameMode::HumanVsHuman => false,
            GameMode::HumanVsComputer => color == self.computer_color,
            GameMode::ComputerVsComputer => true,
        }
    }

    pub fn level_for(&self, color: Color) -> Difficulty {
        match color {
            Color::White => self.white_level,
            Color::Black => self.black_level,
        }
    }

    /// Pulls out-of-range values back into range.
    pub fn normalized(mut self) -> Self {
        self.hard.max_depth = self.hard.depth();
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: GameSettings = toml::from_str(text)?;
        Ok(settings.normalized())
    }

    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod settings_tests;
