//! Spawn scheduling and the weighted choice of what enters the world.

use rand::Rng;

use crate::numeric::frames_as_f32;
use crate::world::{ObstacleKind, PowerUp, PowerUpKind};
use crate::POWERUP_SPAWN_CHANCE;

/// Outcome of a spawn roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnChoice {
    /// Spawn an obstacle.
    Obstacle(ObstacleKind),
    /// Spawn a power-up with its top edge at `lane_y`.
    PowerUp {
        /// Kind.
        kind: PowerUpKind,
        /// Top edge.
        lane_y: f32,
    },
}

/// Whether enough frames have elapsed since the last spawn.
///
/// The comparison is strict, so a spawn lands on the first whole frame past
/// the interval.
///
/// # Examples
///
/// ```
/// use neon_runner::sim::spawn_due;
/// assert!(!spawn_due(156, 0, 156.8));
/// assert!(spawn_due(157, 0, 156.8));
/// ```
#[must_use]
pub fn spawn_due(frames: u64, last_spawn_frame: u64, interval: f32) -> bool {
    frames_as_f32(frames.saturating_sub(last_spawn_frame)) > interval
}

/// Rolls the next entity.
pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> SpawnChoice {
    if rng.gen::<f32>() < POWERUP_SPAWN_CHANCE {
        let kind = PowerUpKind::from_roll(rng.gen());
        let [high, low] = PowerUp::LANES;
        let lane_y = if rng.gen_bool(0.5) { high } else { low };
        SpawnChoice::PowerUp { kind, lane_y }
    } else if rng.gen_bool(0.5) {
        SpawnChoice::Obstacle(ObstacleKind::GroundSpike)
    } else {
        SpawnChoice::Obstacle(ObstacleKind::AerialDrone)
    }
}
