//! Bevy plugin hosting a session inside an `App` frame loop.
//!
//! The session is an ECS resource; the pose feed and the audio output are
//! non-send resources because their backends need not be thread-safe. Each
//! `Update` runs the pose loop, then one session tick, then composes the
//! frame. The terminal outcome is delivered to observers as
//! [`SessionFinished`].

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::info;

use crate::audio::AudioOutput;
use crate::pose::{PoseLoop, PoseSource};
use crate::render::{compose, shake_offset, Frame, Hud};
use crate::session::{Session, SessionConfig, SessionOutcome};
use crate::sim::SimEvent;

/// The session driven by [`RunnerPlugin`].
#[derive(Resource, Debug)]
pub struct RunnerSession(pub Session);

/// Pose source and the loop classifying its samples.
pub struct PoseFeed {
    source: Box<dyn PoseSource>,
    pose_loop: PoseLoop,
}

impl std::fmt::Debug for PoseFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoseFeed")
            .field("pose_loop", &self.pose_loop)
            .finish_non_exhaustive()
    }
}

impl PoseFeed {
    /// Binds `source` to the pose loop returned by [`Session::new`].
    #[must_use]
    pub fn new(source: Box<dyn PoseSource>, pose_loop: PoseLoop) -> Self {
        Self { source, pose_loop }
    }

    /// Loop state, for the calibration preview.
    #[must_use]
    pub const fn pose_loop(&self) -> &PoseLoop {
        &self.pose_loop
    }
}

/// Draw list and HUD of the most recent update.
#[derive(Resource, Debug, Default)]
pub struct LatestFrame {
    /// World draw commands.
    pub frame: Frame,
    /// Overlay text, once a session exists.
    pub hud: Option<Hud>,
}

/// Raised once when the running session reports its outcome.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionFinished(pub SessionOutcome);

/// Creates a session and installs it with its pose feed and optional audio.
///
/// Replaces any session already installed.
pub fn start_session(
    world: &mut World,
    config: SessionConfig,
    source: Box<dyn PoseSource>,
    audio: Option<AudioOutput>,
) {
    let (session, pose_loop) = Session::new(config);
    world.insert_resource(RunnerSession(session));
    world.insert_non_send_resource(PoseFeed::new(source, pose_loop));
    if let Some(output) = audio {
        world.insert_non_send_resource(output);
    }
}

fn sample_pose_system(feed: Option<NonSendMut<PoseFeed>>) {
    if let Some(mut installed) = feed {
        let PoseFeed { source, pose_loop } = &mut *installed;
        pose_loop.sample(source.as_mut());
    }
}

fn advance_session_system(
    time: Res<Time>,
    session: Option<ResMut<RunnerSession>>,
    audio: Option<NonSendMut<AudioOutput>>,
    mut commands: Commands,
) {
    let Some(mut runner) = session else {
        return;
    };
    if runner.0.is_halted() {
        return;
    }
    let report = runner.0.tick(time.delta());
    if let Some(mut output) = audio {
        for cue in report.events.iter().filter_map(SimEvent::cue) {
            output.play(cue);
        }
        output.set_tempo(runner.0.music_tempo());
        if runner.0.is_halted() {
            output.close();
        }
    }
    if let Some(outcome) = report.outcome {
        commands.trigger(SessionFinished(outcome));
    }
}

fn compose_frame_system(session: Option<Res<RunnerSession>>, mut latest: ResMut<LatestFrame>) {
    let Some(runner) = session else {
        return;
    };
    let sim = runner.0.simulation();
    let offset = shake_offset(&mut rand::thread_rng(), sim.state().shake_timer);
    latest.frame = compose(sim, runner.0.background(), offset);
    latest.hud = Some(Hud::from_session(&runner.0));
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
fn log_session_finished(event: On<SessionFinished>) {
    let SessionFinished(outcome) = event.event();
    info!(
        "final score {} over {}m",
        outcome.final_score, outcome.final_distance
    );
}

/// Plugin wiring the pose loop, session tick and frame composition.
#[derive(Default)]
pub struct RunnerPlugin;

impl Plugin for RunnerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LatestFrame>();
        app.add_observer(log_session_finished);
        app.add_systems(
            Update,
            (
                sample_pose_system,
                advance_session_system,
                compose_frame_system,
            )
                .chain(),
        );
    }
}
