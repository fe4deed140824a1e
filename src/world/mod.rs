//! Entity and world model: the player, obstacles, power-ups, particles and
//! scenery, plus the geometry and colour types they share.

mod background;
mod color;
mod geometry;
mod obstacle;
mod particle;
mod player;
mod power_up;

use std::fmt;

pub use background::{Background, MountainLayer, Star, MOUNTAIN_PERIOD, STAR_COUNT};
pub use color::{Hsla, Paint, Rgb};
pub use geometry::Aabb;
pub use obstacle::{Obstacle, ObstacleKind};
pub use particle::{Particle, ParticleField, DEFAULT_BURST_SPEED};
pub use player::PlayerState;
pub use power_up::{ActiveEffects, PowerUp, PowerUpKind, POWER_UP_SIZE};

/// Session-unique identifier of a spawned entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
