//! Difficulty tiers and the numeric parameter sets they select.
//!
//! A tier is chosen before a session starts and its [`DifficultySettings`]
//! stay fixed for the whole run. The simulation reads the speed curve, spawn
//! pacing and the physics modifiers from here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::numeric::unit_clamp;
use crate::{GRAVITY, JUMP_FORCE, SPAWN_RATE_MAX, SPAWN_RATE_MIN};

/// Named difficulty preset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    /// Slow world, floaty jumps, sparse spawns.
    Easy,
    /// The default tier.
    #[default]
    Medium,
    /// Fast world with unmodified physics.
    Hard,
}

impl Difficulty {
    /// All tiers in ascending order.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Returns the parameter record for this tier.
    #[must_use]
    pub fn settings(self) -> DifficultySettings {
        match self {
            Self::Easy => DifficultySettings::from_table(4.0, 8.0, 0.001, 1.4, 0.5),
            Self::Medium => DifficultySettings::from_table(7.0, 14.0, 0.003, 1.1, 0.8),
            Self::Hard => DifficultySettings::from_table(10.0, 20.0, 0.005, 0.9, 1.0),
        }
    }

    /// Upper-case label used by the leaderboard and HUD.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Physics and pacing parameters for one tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultySettings {
    /// World speed at session start.
    pub initial_speed: f32,
    /// Ceiling of the speed curve.
    pub max_speed: f32,
    /// Speed gained per unit of distance.
    pub acceleration: f32,
    /// Multiplier applied to the spawn interval.
    pub spawn_rate_modifier: f32,
    /// Multiplier applied to [`GRAVITY`].
    pub gravity_modifier: f32,
    /// Multiplier applied to [`JUMP_FORCE`].
    ///
    /// Always the square root of `gravity_modifier`, which keeps the apex
    /// `v² / 2g` identical across tiers while slowing the arc.
    pub jump_modifier: f32,
}

impl DifficultySettings {
    fn from_table(
        initial_speed: f32,
        max_speed: f32,
        acceleration: f32,
        spawn_rate_modifier: f32,
        gravity_modifier: f32,
    ) -> Self {
        Self {
            initial_speed,
            max_speed,
            acceleration,
            spawn_rate_modifier,
            gravity_modifier,
            jump_modifier: gravity_modifier.sqrt(),
        }
    }

    /// Base speed after travelling `distance`.
    ///
    /// Monotonically non-decreasing in `distance` and capped at `max_speed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use neon_runner::Difficulty;
    /// let easy = Difficulty::Easy.settings();
    /// assert!((easy.speed_at(0.0) - 4.0).abs() < 1e-6);
    /// assert!((easy.speed_at(1_000_000.0) - 8.0).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn speed_at(&self, distance: f32) -> f32 {
        self.max_speed
            .min(self.initial_speed + distance.max(0.0) * self.acceleration)
    }

    /// Frames between spawns at the given base speed.
    #[must_use]
    pub fn spawn_interval(&self, speed: f32) -> f32 {
        SPAWN_RATE_MIN.max(SPAWN_RATE_MAX - speed * 2.0) * self.spawn_rate_modifier
    }

    /// Per-frame gravity for this tier.
    #[must_use]
    pub fn gravity(&self) -> f32 {
        GRAVITY * self.gravity_modifier
    }

    /// Initial vertical velocity of a jump for this tier (negative is up).
    #[must_use]
    pub fn jump_force(&self) -> f32 {
        JUMP_FORCE * self.jump_modifier
    }

    /// Height of a jump's apex above the floor, `v² / 2g`.
    #[must_use]
    pub fn jump_apex(&self) -> f32 {
        let v = self.jump_force();
        v * v / (2.0 * self.gravity())
    }

    /// Position of `speed` between the initial and maximum speed, in `[0, 1]`.
    #[must_use]
    pub fn speed_progress(&self, speed: f32) -> f32 {
        let span = self.max_speed - self.initial_speed;
        if span <= 0.0 {
            return 1.0;
        }
        unit_clamp((speed - self.initial_speed) / span)
    }
}

impl Default for DifficultySettings {
    fn default() -> Self {
        Difficulty::default().settings()
    }
}
