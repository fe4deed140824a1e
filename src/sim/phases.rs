//! The individual phases of [`Simulation::step`].

use std::time::Duration;

use glam::Vec2;
use log::debug;

use super::events::{SimEvent, Spawned};
use super::spawn::{choose, spawn_due, SpawnChoice};
use super::Simulation;
use crate::numeric::frames_as_f32;
use crate::pose::PoseAction;
use crate::world::{ActiveEffects, Obstacle, PowerUp, PowerUpKind, Rgb, DEFAULT_BURST_SPEED};
use crate::{
    COMBO_BONUS_POINTS, DESPAWN_X, DISTANCE_SCALE, GROUND_Y, MULTIPLIER_FACTOR, PASS_BASE_POINTS,
    PLAYER_X, POWERUP_DURATION, SHAKE_INTENSITY, SLOW_MO_FACTOR, SPAWN_X,
};

const FOOTFALL: Vec2 = Vec2::new(PLAYER_X + 25.0, GROUND_Y);

/// Effects in force for a whole frame, read once after expiry.
///
/// A shield consumed mid-frame still covers every later contact in the same
/// frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct FrameEffects {
    pub(super) shield: bool,
    pub(super) multiplier: bool,
    pub(super) slow_mo: bool,
}

impl FrameEffects {
    pub(super) fn of(effects: &ActiveEffects) -> Self {
        Self {
            shield: effects.contains(PowerUpKind::Shield),
            multiplier: effects.contains(PowerUpKind::Multiplier),
            slow_mo: effects.contains(PowerUpKind::SlowMo),
        }
    }
}

/// Points for passing an obstacle at the given combo.
///
/// # Examples
///
/// ```
/// use neon_runner::sim::pass_points;
/// assert_eq!(pass_points(0, false), 100);
/// assert_eq!(pass_points(3, true), 260);
/// ```
#[must_use]
pub const fn pass_points(combo: u64, multiplier: bool) -> u64 {
    let base = PASS_BASE_POINTS.saturating_add(combo.saturating_mul(COMBO_BONUS_POINTS));
    if multiplier {
        base.saturating_mul(MULTIPLIER_FACTOR)
    } else {
        base
    }
}

impl Simulation {
    /// Counts the frame, accumulates distance and ramps the speed.
    ///
    /// Returns the effective speed used for this frame's motion. Slow motion
    /// halves it and pauses the ramp.
    pub(super) fn advance_distance(&mut self, slow_mo: bool) -> f32 {
        let state = &mut self.state;
        state.frames += 1;
        let effective = if slow_mo {
            state.speed * SLOW_MO_FACTOR
        } else {
            state.speed
        };
        state.distance += effective * DISTANCE_SCALE;
        if !slow_mo {
            state.speed = self.settings.speed_at(state.distance);
        }
        state.hue = super::BASE_HUE - self.settings.speed_progress(state.speed) * super::BASE_HUE;
        effective
    }

    pub(super) fn update_player(&mut self, action: PoseAction, events: &mut Vec<SimEvent>) {
        if action == PoseAction::Jump && self.player.can_jump() {
            self.player.launch(self.settings.jump_force());
            self.particles.burst(
                &mut self.rng,
                FOOTFALL,
                Rgb::NEON_CYAN,
                5,
                DEFAULT_BURST_SPEED,
            );
            events.push(SimEvent::Jumped);
        }
        if self.player.set_ducking(action == PoseAction::Duck) {
            events.push(SimEvent::Ducked);
        }
        if self.player.integrate(self.settings.gravity()) {
            self.particles.burst(
                &mut self.rng,
                FOOTFALL,
                Rgb::NEON_CYAN,
                8,
                DEFAULT_BURST_SPEED,
            );
            events.push(SimEvent::Landed);
        }
    }

    pub(super) fn spawn_if_due(&mut self, events: &mut Vec<SimEvent>) {
        let interval = self.settings.spawn_interval(self.state.speed);
        if !spawn_due(self.state.frames, self.state.last_spawn_frame, interval) {
            return;
        }
        self.state.last_spawn_frame = self.state.frames;
        let id = self.next_entity_id();
        let what = match choose(&mut self.rng) {
            SpawnChoice::Obstacle(kind) => {
                self.obstacles.push(Obstacle::new(id, kind, SPAWN_X));
                Spawned::Obstacle(kind)
            }
            SpawnChoice::PowerUp { kind, lane_y } => {
                self.power_ups.push(PowerUp::new(id, kind, SPAWN_X, lane_y));
                Spawned::PowerUp(kind)
            }
        };
        debug!("spawned {what:?} {id} at frame {}", self.state.frames);
        events.push(SimEvent::Spawned { id, what });
    }

    pub(super) fn move_entities(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.rect.min.x -= speed;
        }
        self.obstacles.retain(|o| o.x() > DESPAWN_X);

        let bob = (frames_as_f32(self.state.frames) * 0.1).sin() * 2.0;
        for power_up in &mut self.power_ups {
            power_up.rect.min.x -= speed;
            power_up.rect.min.y += bob;
        }
        self.power_ups.retain(|p| p.active && p.rect.min.x > DESPAWN_X);
    }

    /// Resolves obstacle and power-up contacts.
    ///
    /// Returns `true` on an unshielded hit. Once that happens no further
    /// obstacle is scored this frame; power-ups are still collected. A shield
    /// held at the start of the frame absorbs every hit in that frame and is
    /// removed on the first.
    pub(super) fn resolve_collisions(
        &mut self,
        frame: FrameEffects,
        now: Duration,
        events: &mut Vec<SimEvent>,
    ) -> bool {
        let player = self.player.rect();
        let mut fatal = false;

        for obstacle in &mut self.obstacles {
            if obstacle.passed {
                continue;
            }
            if player.overlaps(&obstacle.rect) {
                if frame.shield {
                    if self.effects.remove(PowerUpKind::Shield) {
                        debug!("shield consumed at {now:?}");
                    }
                    obstacle.mark_passed();
                    self.particles.burst(
                        &mut self.rng,
                        player.min + Vec2::new(25.0, 40.0),
                        Rgb::NEON_CYAN,
                        20,
                        10.0,
                    );
                    self.state.shake_timer = SHAKE_INTENSITY;
                    debug!("shield absorbed {}", obstacle.id);
                    events.push(SimEvent::ShieldBroken {
                        obstacle: obstacle.id,
                    });
                } else {
                    fatal = true;
                }
            } else if !fatal && obstacle.is_behind(player.min.x) && obstacle.mark_passed() {
                let points = pass_points(self.state.combo, frame.multiplier);
                self.state.score = self.state.score.saturating_add(points);
                self.state.combo += 1;
                events.push(SimEvent::ObstaclePassed {
                    obstacle: obstacle.id,
                    points,
                    combo: self.state.combo,
                });
            }
        }

        for power_up in &mut self.power_ups {
            if !power_up.active || !player.overlaps(&power_up.rect) {
                continue;
            }
            power_up.active = false;
            self.particles.burst(
                &mut self.rng,
                power_up.rect.min,
                power_up.kind.colour(),
                15,
                DEFAULT_BURST_SPEED,
            );
            let expires_at = self
                .effects
                .install(power_up.kind, now.saturating_add(POWERUP_DURATION));
            debug!("collected {:?} until {expires_at:?}", power_up.kind);
            events.push(SimEvent::PowerUpCollected {
                kind: power_up.kind,
                expires_at,
            });
        }

        fatal
    }
}
