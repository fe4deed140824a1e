//! Simulation drivers.

use std::time::Duration;

use neon_runner::pose::PoseAction;
use neon_runner::sim::{SimEvent, Simulation};
use neon_runner::Difficulty;

/// Nominal display frame.
pub const FRAME: Duration = Duration::from_millis(16);

/// Reproducible simulation for `tier`.
pub fn seeded(tier: Difficulty, seed: u64) -> Simulation {
    Simulation::seeded(tier.settings(), seed)
}

/// Runs `n` steps with `action`, advancing the clock by [`FRAME`] from `start`.
///
/// Returns every event raised, in order.
pub fn step_n(sim: &mut Simulation, action: PoseAction, n: u32, start: Duration) -> Vec<SimEvent> {
    (1..=n)
        .flat_map(|i| sim.step(action, start + FRAME * i).events)
        .collect()
}

/// Steps with `action` until `stop` matches an event or `max` steps pass.
///
/// Returns the number of steps taken when `stop` matched.
pub fn step_until(
    sim: &mut Simulation,
    action: PoseAction,
    max: u32,
    stop: impl Fn(&SimEvent) -> bool,
) -> Option<u32> {
    (1..=max).find(|i| sim.step(action, FRAME * *i).any(&stop))
}
