//! Obstacles scrolling towards the player.

use super::{Aabb, EntityId, Rgb};
use crate::GROUND_Y;

/// Obstacle archetype; fixes the vertical band and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    /// Sits on the floor; jump over it.
    GroundSpike,
    /// Hovers above head height of a standing player; hits jumpers.
    AerialDrone,
}

impl ObstacleKind {
    /// Both kinds, for equal-probability selection.
    pub const ALL: [Self; 2] = [Self::GroundSpike, Self::AerialDrone];

    /// Top edge of the obstacle's band.
    #[must_use]
    pub const fn top(self) -> f32 {
        match self {
            Self::GroundSpike => GROUND_Y - 50.0,
            Self::AerialDrone => GROUND_Y - 140.0,
        }
    }

    /// Width and height.
    #[must_use]
    pub const fn size(self) -> (f32, f32) {
        match self {
            Self::GroundSpike => (50.0, 50.0),
            Self::AerialDrone => (60.0, 40.0),
        }
    }
}

/// A live obstacle.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Stable identity.
    pub id: EntityId,
    /// Hitbox in canvas coordinates.
    pub rect: Aabb,
    /// Archetype.
    pub kind: ObstacleKind,
    /// Set once the obstacle was scored or absorbed by a shield. Never reset.
    pub passed: bool,
    /// Fill colour.
    pub colour: Rgb,
}

impl Obstacle {
    /// Creates an obstacle of `kind` with its left edge at `x`.
    #[must_use]
    pub const fn new(id: EntityId, kind: ObstacleKind, x: f32) -> Self {
        let (width, height) = kind.size();
        Self {
            id,
            rect: Aabb::new(x, kind.top(), width, height),
            kind,
            passed: false,
            colour: Rgb::NEON_RED,
        }
    }

    /// Left edge.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.rect.min.x
    }

    /// Whether the obstacle lies entirely left of column `x`.
    #[must_use]
    pub fn is_behind(&self, x: f32) -> bool {
        self.rect.max().x < x
    }

    /// Marks the obstacle as handled.
    ///
    /// Returns `false` if it was already handled, so callers can treat the
    /// flag as the single source of truth for scoring and damage.
    pub fn mark_passed(&mut self) -> bool {
        !std::mem::replace(&mut self.passed, true)
    }
}
