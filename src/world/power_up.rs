//! Collectable power-ups and the effects they install.

use std::time::Duration;

use hashbrown::HashMap;

use super::{Aabb, EntityId, Rgb};
use crate::GROUND_Y;

/// Side length of a power-up's square hitbox.
pub const POWER_UP_SIZE: f32 = 40.0;

/// Power-up archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Absorbs the next obstacle impact.
    Shield,
    /// Doubles points awarded for passing obstacles.
    Multiplier,
    /// Halves the effective world speed and pauses acceleration.
    SlowMo,
}

impl PowerUpKind {
    /// Relative spawn weights; they sum to 100.
    pub const WEIGHTS: [(Self, f32); 3] = [
        (Self::Shield, 40.0),
        (Self::Multiplier, 42.0),
        (Self::SlowMo, 18.0),
    ];

    /// Picks a kind from a uniform roll in `[0, 1)` using cumulative weights.
    ///
    /// # Examples
    ///
    /// ```
    /// use neon_runner::world::PowerUpKind;
    /// assert_eq!(PowerUpKind::from_roll(0.0), PowerUpKind::Shield);
    /// assert_eq!(PowerUpKind::from_roll(0.5), PowerUpKind::Multiplier);
    /// assert_eq!(PowerUpKind::from_roll(0.95), PowerUpKind::SlowMo);
    /// ```
    #[must_use]
    pub fn from_roll(roll: f32) -> Self {
        let total: f32 = Self::WEIGHTS.iter().map(|(_, w)| w).sum();
        let target = roll.clamp(0.0, 1.0) * total;
        let mut acc = 0.0;
        for (kind, weight) in Self::WEIGHTS {
            acc += weight;
            if target < acc {
                return kind;
            }
        }
        Self::SlowMo
    }

    /// HUD label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shield => "SHIELD",
            Self::Multiplier => "SCORE x2",
            Self::SlowMo => "SLOW MO",
        }
    }

    /// Glow colour of the pickup and its particles.
    #[must_use]
    pub const fn colour(self) -> Rgb {
        match self {
            Self::Shield => Rgb::NEON_CYAN,
            Self::Multiplier => Rgb::NEON_YELLOW,
            Self::SlowMo => Rgb::NEON_PURPLE,
        }
    }
}

/// A pickup scrolling towards the player.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    /// Stable identity.
    pub id: EntityId,
    /// Hitbox in canvas coordinates.
    pub rect: Aabb,
    /// Archetype.
    pub kind: PowerUpKind,
    /// Cleared on collection; inactive pickups are removed on the next motion
    /// phase.
    pub active: bool,
}

impl PowerUp {
    /// Spawn heights, chosen with equal probability.
    pub const LANES: [f32; 2] = [GROUND_Y - 150.0, GROUND_Y - 50.0];

    /// Creates an active pickup with its top-left corner at `(x, y)`.
    #[must_use]
    pub const fn new(id: EntityId, kind: PowerUpKind, x: f32, y: f32) -> Self {
        Self {
            id,
            rect: Aabb::new(x, y, POWER_UP_SIZE, POWER_UP_SIZE),
            kind,
            active: true,
        }
    }
}

/// Power-up effects currently in force, keyed by kind.
///
/// Holds at most one expiry per kind, measured on the session clock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveEffects {
    expiries: HashMap<PowerUpKind, Duration>,
}

impl ActiveEffects {
    /// Installs `kind` until `expires_at`, or extends an existing entry to the
    /// later of the two expiries. Returns the expiry now in force.
    pub fn install(&mut self, kind: PowerUpKind, expires_at: Duration) -> Duration {
        let slot = self.expiries.entry(kind).or_insert(expires_at);
        *slot = (*slot).max(expires_at);
        *slot
    }

    /// Drops every effect whose expiry is at or before `now`.
    pub fn expire(&mut self, now: Duration) -> usize {
        let before = self.expiries.len();
        self.expiries.retain(|_, expiry| *expiry > now);
        before - self.expiries.len()
    }

    /// Removes `kind`, returning whether it was installed.
    pub fn remove(&mut self, kind: PowerUpKind) -> bool {
        self.expiries.remove(&kind).is_some()
    }

    /// Whether `kind` is in force.
    #[must_use]
    pub fn contains(&self, kind: PowerUpKind) -> bool {
        self.expiries.contains_key(&kind)
    }

    /// Expiry of `kind`, if installed.
    #[must_use]
    pub fn expiry(&self, kind: PowerUpKind) -> Option<Duration> {
        self.expiries.get(&kind).copied()
    }

    /// Number of effects in force.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expiries.len()
    }

    /// Whether no effect is in force.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expiries.is_empty()
    }

    /// Effects in a stable display order.
    #[must_use]
    pub fn kinds(&self) -> Vec<PowerUpKind> {
        PowerUpKind::WEIGHTS
            .iter()
            .map(|(kind, _)| *kind)
            .filter(|kind| self.contains(*kind))
            .collect()
    }
}
