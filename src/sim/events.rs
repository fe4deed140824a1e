//! What happened during a simulation step.

use std::time::Duration;

use crate::audio::SoundCue;
use crate::world::{EntityId, ObstacleKind, PowerUpKind};

/// Entity produced by the spawn phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spawned {
    /// An obstacle of the given kind.
    Obstacle(ObstacleKind),
    /// A power-up of the given kind.
    PowerUp(PowerUpKind),
}

/// A notable change raised by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// A jump started.
    Jumped,
    /// The player touched down.
    Landed,
    /// The player started ducking.
    Ducked,
    /// An entity entered at the spawn column.
    Spawned {
        /// New entity.
        id: EntityId,
        /// What was spawned.
        what: Spawned,
    },
    /// A shield absorbed an obstacle and was consumed.
    ShieldBroken {
        /// Absorbed obstacle.
        obstacle: EntityId,
    },
    /// An obstacle scrolled past the player and was scored.
    ObstaclePassed {
        /// Scored obstacle.
        obstacle: EntityId,
        /// Points awarded.
        points: u64,
        /// Combo after the pass.
        combo: u64,
    },
    /// A power-up was picked up.
    PowerUpCollected {
        /// Kind collected.
        kind: PowerUpKind,
        /// Expiry now in force for that kind.
        expires_at: Duration,
    },
    /// Unshielded collision; the run is over.
    GameOver {
        /// Final score.
        score: u64,
        /// Final distance, floored.
        distance_floor: u64,
    },
}

impl SimEvent {
    /// Sound cue raised by this event, if any.
    #[must_use]
    pub const fn cue(&self) -> Option<SoundCue> {
        match self {
            Self::Jumped => Some(SoundCue::Jump),
            Self::Ducked => Some(SoundCue::Duck),
            Self::ShieldBroken { .. } => Some(SoundCue::Explosion),
            Self::PowerUpCollected { .. } => Some(SoundCue::PowerUp),
            Self::GameOver { .. } => Some(SoundCue::GameOver),
            Self::Landed | Self::Spawned { .. } | Self::ObstaclePassed { .. } => None,
        }
    }
}

/// Events of one step, in the order they occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Raised events.
    pub events: Vec<SimEvent>,
}

impl StepReport {
    /// Sound cues in event order.
    pub fn cues(&self) -> impl Iterator<Item = SoundCue> + '_ {
        self.events.iter().filter_map(SimEvent::cue)
    }

    /// Final `(score, distance_floor)` if the run ended on this step.
    #[must_use]
    pub fn game_over(&self) -> Option<(u64, u64)> {
        self.events.iter().find_map(|event| match event {
            SimEvent::GameOver {
                score,
                distance_floor,
            } => Some((*score, *distance_floor)),
            _ => None,
        })
    }

    /// Whether any event matches `pred`.
    pub fn any(&self, pred: impl Fn(&SimEvent) -> bool) -> bool {
        self.events.iter().any(pred)
    }
}
