//! Helpers for observing session outcomes in tests.
use bevy::ecs::prelude::On;
use bevy::prelude::*;
use neon_runner::{SessionFinished, SessionOutcome};

/// Outcomes delivered to observers, in order.
#[derive(Resource, Default, Debug)]
pub struct CapturedOutcomes(pub Vec<SessionOutcome>);

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_outcome(event: On<SessionFinished>, mut outcomes: ResMut<CapturedOutcomes>) {
    outcomes.0.push(event.event().0);
}

/// Installs the outcome-capturing observer and resource on the provided app.
pub fn install_outcome_observer(app: &mut App) {
    app.insert_resource(CapturedOutcomes::default());
    app.world_mut().add_observer(record_outcome);
}
