//! One play session: countdown, simulation ticks, and the terminal report.
//!
//! A [`Session`] is driven by an explicit [`Session::tick`] from the host's
//! frame loop. Each tick while running consumes the latest pose action from
//! the shared slot and executes exactly one simulation step; `dt` only moves
//! the session clock that power-up expiries and the game-over delay use.

use std::time::Duration;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::audio;
use crate::config::Sensitivity;
use crate::pose::{
    action_slot, ActionReader, CalibrationBaseline, PoseAction, PoseClassifier, PoseLoop,
};
use crate::sim::{SimEvent, Simulation};
use crate::world::Background;
use crate::{Difficulty, GAME_OVER_DELAY, START_COUNTDOWN};

/// Parameters fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// Pose threshold multiplier.
    pub sensitivity: Sensitivity,
    /// Calibrated neutral stance.
    pub baseline: CalibrationBaseline,
    /// Delay before the first simulation step.
    pub countdown: Duration,
    /// Seed for spawns and scenery; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl SessionConfig {
    /// Configuration with the standard countdown and a random seed.
    #[must_use]
    pub const fn new(
        difficulty: Difficulty,
        sensitivity: Sensitivity,
        baseline: CalibrationBaseline,
    ) -> Self {
        Self {
            difficulty,
            sensitivity,
            baseline,
            countdown: START_COUNTDOWN,
            seed: None,
        }
    }

    /// Fixes the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the pre-start countdown.
    #[must_use]
    pub const fn with_countdown(mut self, countdown: Duration) -> Self {
        self.countdown = countdown;
        self
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the pre-start countdown.
    Countdown,
    /// Simulation steps are running.
    Running,
    /// The run ended at `since`; the outcome is held back for the delay.
    Ending {
        /// Session time of the fatal collision.
        since: Duration,
    },
    /// The outcome has been reported.
    Finished,
    /// Stopped by the host; no outcome is ever reported.
    Cancelled,
}

/// Final result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Score at the fatal collision.
    pub final_score: u64,
    /// Distance at the fatal collision, floored.
    pub final_distance: u64,
}

/// Output of one [`Session::tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Simulation events raised this tick.
    pub events: Vec<SimEvent>,
    /// Set on exactly one tick per finished session.
    pub outcome: Option<SessionOutcome>,
}

/// A running session.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    sim: Simulation,
    background: Background,
    reader: ActionReader,
    phase: SessionPhase,
    countdown_left: Duration,
    clock: Duration,
    pending: Option<SessionOutcome>,
}

impl Session {
    /// Creates a session and the pose loop that feeds it.
    ///
    /// The returned [`PoseLoop`] owns the only writer of the action slot; the
    /// session keeps the reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use neon_runner::session::{Session, SessionConfig, SessionPhase};
    /// use neon_runner::{config::Sensitivity, pose::CalibrationBaseline, Difficulty};
    ///
    /// let config = SessionConfig::new(
    ///     Difficulty::Easy,
    ///     Sensitivity::default(),
    ///     CalibrationBaseline::default(),
    /// )
    /// .with_seed(1);
    /// let (session, _pose) = Session::new(config);
    /// assert_eq!(session.phase(), SessionPhase::Countdown);
    /// ```
    #[must_use]
    pub fn new(config: SessionConfig) -> (Self, PoseLoop) {
        let (writer, reader) = action_slot(PoseAction::Idle);
        let classifier = PoseClassifier::new(config.baseline, config.sensitivity);
        let mut rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let background = Background::generate(&mut rng);
        let sim = Simulation::seeded(config.difficulty.settings(), rng.gen());
        info!(
            "session created: {} difficulty, sensitivity {:.2}, baseline {:.3}",
            config.difficulty,
            config.sensitivity.get(),
            config.baseline.get()
        );
        let phase = if config.countdown.is_zero() {
            SessionPhase::Running
        } else {
            SessionPhase::Countdown
        };
        let session = Self {
            config,
            sim,
            background,
            reader,
            phase,
            countdown_left: config.countdown,
            clock: Duration::ZERO,
            pending: None,
        };
        (session, PoseLoop::new(classifier, writer))
    }

    /// Advances the session by one host frame of length `dt`.
    pub fn tick(&mut self, dt: Duration) -> TickReport {
        match self.phase {
            SessionPhase::Countdown => {
                self.countdown_left = self.countdown_left.saturating_sub(dt);
                if self.countdown_left.is_zero() {
                    info!("countdown over, run started");
                    self.phase = SessionPhase::Running;
                }
                TickReport::default()
            }
            SessionPhase::Running => {
                self.clock += dt;
                let report = self.sim.step(self.reader.latest(), self.clock);
                if let Some((final_score, final_distance)) = report.game_over() {
                    self.pending = Some(SessionOutcome {
                        final_score,
                        final_distance,
                    });
                    self.phase = SessionPhase::Ending { since: self.clock };
                }
                TickReport {
                    events: report.events,
                    outcome: None,
                }
            }
            SessionPhase::Ending { since } => {
                self.clock += dt;
                if self.clock.saturating_sub(since) < GAME_OVER_DELAY {
                    return TickReport::default();
                }
                self.phase = SessionPhase::Finished;
                let outcome = self.pending.take();
                if let Some(result) = outcome {
                    info!(
                        "session finished: score {}, distance {}",
                        result.final_score, result.final_distance
                    );
                }
                TickReport {
                    events: Vec::new(),
                    outcome,
                }
            }
            SessionPhase::Finished | SessionPhase::Cancelled => TickReport::default(),
        }
    }

    /// Stops the session. A session cancelled before finishing never
    /// reports an outcome.
    pub fn cancel(&mut self) {
        if !self.is_halted() {
            info!("session cancelled in phase {:?}", self.phase);
            self.phase = SessionPhase::Cancelled;
            self.pending = None;
        }
    }

    /// Whether the host may stop ticking.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        matches!(self.phase, SessionPhase::Finished | SessionPhase::Cancelled)
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whole seconds left on the pre-start countdown, rounded up.
    #[must_use]
    pub fn countdown_seconds(&self) -> u64 {
        let left = self.countdown_left;
        left.as_secs() + u64::from(left.subsec_nanos() > 0)
    }

    /// Session time elapsed since the run started.
    #[must_use]
    pub const fn clock(&self) -> Duration {
        self.clock
    }

    /// Music tempo for the current speed.
    #[must_use]
    pub fn music_tempo(&self) -> f32 {
        audio::music_tempo(self.sim.state().speed, self.sim.settings().initial_speed)
    }

    /// Latest action published by the pose loop.
    #[must_use]
    pub fn latest_action(&self) -> PoseAction {
        self.reader.latest()
    }

    /// Read-only view of the world.
    #[must_use]
    pub const fn simulation(&self) -> &Simulation {
        &self.sim
    }

    /// Scenery generated for this session.
    #[must_use]
    pub const fn background(&self) -> &Background {
        &self.background
    }

    /// Configuration the session was created with.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Mutable access to the world for scripted scenarios.
    #[cfg(any(test, feature = "test-support"))]
    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }
}
