//! Scalar run state owned by the simulation.

use crate::difficulty::DifficultySettings;
use crate::numeric::floor_distance;

/// Hue of the background at the initial speed; it falls to 0 at max speed.
pub const BASE_HUE: f32 = 180.0;

/// Progress, pacing and scoring counters for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    /// Cleared on the first fatal collision; never set again.
    pub is_playing: bool,
    /// Base world speed before slow motion.
    pub speed: f32,
    /// Distance travelled in world units.
    pub distance: f32,
    /// Accumulated points.
    pub score: u64,
    /// Simulation steps executed.
    pub frames: u64,
    /// Frame of the most recent spawn.
    pub last_spawn_frame: u64,
    /// Obstacles passed in a row.
    pub combo: u64,
    /// Background hue in degrees.
    pub hue: f32,
    /// Remaining frames of screen shake.
    pub shake_timer: u32,
}

impl GameState {
    /// Fresh state at the tier's initial speed.
    #[must_use]
    pub const fn new(settings: &DifficultySettings) -> Self {
        Self {
            is_playing: true,
            speed: settings.initial_speed,
            distance: 0.0,
            score: 0,
            frames: 0,
            last_spawn_frame: 0,
            combo: 0,
            hue: BASE_HUE,
            shake_timer: 0,
        }
    }

    /// Distance floored to whole units, as reported at the session boundary.
    #[must_use]
    pub fn distance_floor(&self) -> u64 {
        floor_distance(self.distance)
    }
}
