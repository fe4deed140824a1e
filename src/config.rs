//! Player-facing settings shared by calibration, classification and audio.
//!
//! Settings have sensible defaults, can be loaded from a JSON file, and are
//! validated through newtypes so a session never sees an out-of-range value.

use std::fs;
use std::path::Path;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Difficulty;

/// Errors raised while building or loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Sensitivity must be a finite positive multiplier.
    #[error("sensitivity must be finite and greater than zero, got {0}")]
    InvalidSensitivity(f32),
    /// Volume must lie in `[0, 1]`.
    #[error("volume must lie between 0 and 1, got {0}")]
    InvalidVolume(f32),
    /// A calibration baseline must be a normalised height in `[0, 1]`.
    #[error("baseline must lie between 0 and 1, got {0}")]
    InvalidBaseline(f32),
    /// The settings file could not be read.
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    /// The settings file is not valid JSON for [`RunnerSettings`].
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Multiplier scaling the jump/duck thresholds inversely.
///
/// Values above 1 make the controls twitchier; values below 1 demand larger
/// movements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Sensitivity(f32);

impl Sensitivity {
    /// Lowest value offered by the settings screen.
    pub const MIN_SUGGESTED: f32 = 0.5;
    /// Highest value offered by the settings screen.
    pub const MAX_SUGGESTED: f32 = 2.0;

    /// Validates a sensitivity multiplier.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidSensitivity`] unless `value` is finite
    /// and strictly positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use neon_runner::config::Sensitivity;
    /// assert!(Sensitivity::new(1.5).is_ok());
    /// assert!(Sensitivity::new(0.0).is_err());
    /// ```
    pub fn new(value: f32) -> Result<Self, SettingsError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(SettingsError::InvalidSensitivity(value))
        }
    }

    /// Returns the multiplier.
    #[must_use]
    pub const fn get(self) -> f32 {
        self.0
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self(1.0)
    }
}

impl TryFrom<f32> for Sensitivity {
    type Error = SettingsError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Sensitivity> for f32 {
    fn from(value: Sensitivity) -> Self {
        value.0
    }
}

/// Master volume in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Volume(f32);

impl Volume {
    /// Levels below this are treated as muted.
    pub const SILENT_BELOW: f32 = 0.1;

    /// Validates a volume level.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidVolume`] outside `[0, 1]`.
    pub fn new(value: f32) -> Result<Self, SettingsError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SettingsError::InvalidVolume(value))
        }
    }

    /// Returns the level.
    #[must_use]
    pub const fn get(self) -> f32 {
        self.0
    }

    /// Whether the level is too low to be worth playing.
    #[must_use]
    pub const fn is_silent(self) -> bool {
        self.0 < Self::SILENT_BELOW
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(0.5)
    }
}

impl TryFrom<f32> for Volume {
    type Error = SettingsError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Volume> for f32 {
    fn from(value: Volume) -> Self {
        value.0
    }
}

/// Settings chosen before a session starts.
///
/// # Examples
///
/// ```
/// use neon_runner::config::RunnerSettings;
/// use neon_runner::Difficulty;
///
/// let settings: RunnerSettings =
///     serde_json::from_str(r#"{"difficulty":"HARD","sensitivity":1.5}"#).unwrap();
/// assert_eq!(settings.difficulty, Difficulty::Hard);
/// assert!(!settings.muted);
/// ```
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerSettings {
    /// Difficulty tier for the next session.
    pub difficulty: Difficulty,
    /// Pose threshold multiplier.
    pub sensitivity: Sensitivity,
    /// Master volume.
    pub volume: Volume,
    /// Silences cues and music.
    pub muted: bool,
}

impl RunnerSettings {
    /// Loads settings from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`SettingsError`] when the file is unreadable, malformed, or
    /// holds out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
