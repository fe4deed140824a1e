//! Per-frame game simulation.
//!
//! [`Simulation::step`] advances the world by one display frame given the
//! latest pose action and the session clock. The phases run in a fixed order:
//! effect expiry, speed and distance, player physics, spawning, entity motion,
//! collision, particles, shake, and termination. Every observable change is
//! reported as a [`SimEvent`] so hosts can drive audio and HUD updates without
//! inspecting the world.

mod events;
mod phases;
mod spawn;
mod state;

#[cfg(test)]
mod tests;

use std::time::Duration;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use phases::FrameEffects;
use crate::difficulty::DifficultySettings;
use crate::pose::PoseAction;
use crate::world::{ActiveEffects, EntityId, Obstacle, ParticleField, PlayerState, PowerUp};

pub use events::{SimEvent, Spawned, StepReport};
pub use phases::pass_points;
pub use spawn::{choose as choose_spawn, spawn_due, SpawnChoice};
pub use state::{GameState, BASE_HUE};

/// The simulated world for one session.
#[derive(Debug, Clone)]
pub struct Simulation {
    settings: DifficultySettings,
    state: GameState,
    player: PlayerState,
    obstacles: Vec<Obstacle>,
    power_ups: Vec<PowerUp>,
    effects: ActiveEffects,
    particles: ParticleField,
    rng: StdRng,
    next_id: u64,
}

impl Simulation {
    /// Starts a run seeded from OS entropy.
    #[must_use]
    pub fn new(settings: DifficultySettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Starts a reproducible run.
    #[must_use]
    pub fn seeded(settings: DifficultySettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: DifficultySettings, rng: StdRng) -> Self {
        Self {
            settings,
            state: GameState::new(&settings),
            player: PlayerState::default(),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            effects: ActiveEffects::default(),
            particles: ParticleField::default(),
            rng,
            next_id: 0,
        }
    }

    /// Advances the world by one frame.
    ///
    /// `now` is the session clock used for power-up expiries. Once the run
    /// has ended this returns an empty report and leaves the world untouched,
    /// so the last frame stays available for rendering.
    pub fn step(&mut self, action: PoseAction, now: Duration) -> StepReport {
        let mut report = StepReport::default();
        if !self.state.is_playing {
            return report;
        }
        let events = &mut report.events;

        self.effects.expire(now);
        let frame = FrameEffects::of(&self.effects);
        let effective_speed = self.advance_distance(frame.slow_mo);
        self.update_player(action, events);
        self.spawn_if_due(events);
        self.move_entities(effective_speed);
        let fatal = self.resolve_collisions(frame, now, events);
        self.particles.update();
        self.state.shake_timer = self.state.shake_timer.saturating_sub(1);

        if fatal {
            self.finish(events);
        }
        report
    }

    fn finish(&mut self, events: &mut Vec<SimEvent>) {
        self.state.is_playing = false;
        self.state.shake_timer = crate::SHAKE_INTENSITY;
        let (score, distance_floor) = (self.state.score, self.state.distance_floor());
        info!("run over: score {score}, distance {distance_floor}");
        events.push(SimEvent::GameOver {
            score,
            distance_floor,
        });
    }

    fn next_entity_id(&mut self) -> EntityId {
        self.next_id += 1;
        EntityId(self.next_id)
    }

    /// Tier parameters for this run.
    #[must_use]
    pub const fn settings(&self) -> &DifficultySettings {
        &self.settings
    }

    /// Run counters.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Live obstacles, oldest first.
    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Live power-ups, oldest first.
    #[must_use]
    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    /// Effects in force.
    #[must_use]
    pub const fn effects(&self) -> &ActiveEffects {
        &self.effects
    }

    /// Live particles.
    #[must_use]
    pub const fn particles(&self) -> &ParticleField {
        &self.particles
    }

    /// Whether the run is still in progress.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.state.is_playing
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Simulation {
    /// Places an obstacle with its left edge at `x`, bypassing the spawner.
    pub fn insert_obstacle(&mut self, kind: crate::world::ObstacleKind, x: f32) -> EntityId {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle::new(id, kind, x));
        id
    }

    /// Places an active power-up at `(x, y)`, bypassing the spawner.
    pub fn insert_power_up(&mut self, kind: crate::world::PowerUpKind, x: f32, y: f32) -> EntityId {
        let id = self.next_entity_id();
        self.power_ups.push(PowerUp::new(id, kind, x, y));
        id
    }

    /// Installs an effect directly.
    pub fn grant_effect(&mut self, kind: crate::world::PowerUpKind, expires_at: Duration) {
        self.effects.install(kind, expires_at);
    }
}
