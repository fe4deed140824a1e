//! Behavioural tests for the shield power-up.
//!
//! A spike placed just ahead of a standing player collides on the next step.
//! With a shield the hit is absorbed once; without one the run ends.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use neon_runner::pose::PoseAction;
use neon_runner::sim::{SimEvent, Simulation};
use neon_runner::world::{ObstacleKind, PowerUpKind};
use neon_runner::{Difficulty, PLAYER_X, POWERUP_DURATION, SHAKE_INTENSITY};
use rspec_runner::{lock, run_serial};

const NOW: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
struct Fixture {
    shielded: bool,
    sim: Arc<Mutex<Simulation>>,
    events: Arc<Mutex<Vec<SimEvent>>>,
}

impl Fixture {
    fn new(shielded: bool) -> Self {
        Self {
            shielded,
            sim: Arc::new(Mutex::new(Self::world(shielded))),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn world(shielded: bool) -> Simulation {
        let mut sim = test_utils::seeded(Difficulty::Medium, 11);
        if shielded {
            sim.grant_effect(PowerUpKind::Shield, NOW + POWERUP_DURATION);
        }
        sim.insert_obstacle(ObstacleKind::GroundSpike, PLAYER_X + 50.0);
        sim
    }

    fn reset_and_step(&self) {
        *lock(&self.sim) = Self::world(self.shielded);
        lock(&self.events).clear();
        self.step();
    }

    fn step(&self) {
        let report = lock(&self.sim).step(PoseAction::Idle, NOW);
        lock(&self.events).extend(report.events);
    }

    fn saw(&self, pred: impl Fn(&SimEvent) -> bool) -> bool {
        lock(&self.events).iter().any(pred)
    }
}

#[test]
fn shield_absorbs_a_single_hit() {
    run_serial(&rspec::given(
        "a shielded player facing a spike",
        Fixture::new(true),
        |scenario| {
            scenario.when("the spike reaches the player", |ctx| {
                ctx.before_each(|fx| fx.reset_and_step());

                ctx.then("the shield breaks instead of the run ending", |fx| {
                    assert!(fx.saw(|e| matches!(e, SimEvent::ShieldBroken { .. })));
                    assert!(!fx.saw(|e| matches!(e, SimEvent::GameOver { .. })));
                    assert!(lock(&fx.sim).is_playing());
                });

                ctx.then("the shield is gone and the screen shakes", |fx| {
                    let sim = lock(&fx.sim);
                    assert!(!sim.effects().contains(PowerUpKind::Shield));
                    assert_eq!(sim.state().shake_timer, SHAKE_INTENSITY - 1);
                    assert!(sim.obstacles().iter().all(|o| o.passed));
                    assert!(!sim.particles().is_empty());
                });

                ctx.then("the absorbed spike is never scored", |fx| {
                    let sim = lock(&fx.sim);
                    assert_eq!(sim.state().score, 0);
                    assert_eq!(sim.state().combo, 0);
                });
            });
        },
    ));
}

#[test]
fn unshielded_hit_ends_the_run() {
    run_serial(&rspec::given(
        "an unshielded player facing a spike",
        Fixture::new(false),
        |scenario| {
            scenario.when("the spike reaches the player", |ctx| {
                ctx.before_each(|fx| fx.reset_and_step());

                ctx.then("the run ends with the score so far", |fx| {
                    assert!(fx.saw(|e| matches!(e, SimEvent::GameOver { score: 0, .. })));
                    let sim = lock(&fx.sim);
                    assert!(!sim.is_playing());
                    assert_eq!(sim.state().shake_timer, SHAKE_INTENSITY);
                });

                ctx.then("further steps leave the world frozen", |fx| {
                    let before = *lock(&fx.sim).state();
                    fx.step();
                    assert_eq!(lock(&fx.sim).state(), &before);
                });
            });
        },
    ));
}
