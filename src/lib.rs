#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate for Neon Runner, a motion-controlled arcade runner.
//!
//! Pose samples are calibrated and classified into discrete actions, handed
//! to the simulation through a single-slot channel, and advanced one frame at
//! a time by a [`Session`]. The render pass and audio cues are derived from
//! the simulation's read-only state.
pub mod audio;
pub mod config;
pub mod constants;
pub mod difficulty;
pub mod leaderboard;
pub mod logging;
pub mod numeric;
pub mod plugin;
pub mod pose;
pub mod render;
pub mod session;
pub mod sim;
pub mod world;

pub use constants::*;

// Re-export commonly used items
pub use audio::{AudioOutput, AudioSink, LogAudio, SoundCue};
pub use config::{RunnerSettings, Sensitivity, SettingsError, Volume};
pub use difficulty::{Difficulty, DifficultySettings};
pub use leaderboard::{JsonFileStore, LeaderboardEntry, LeaderboardError, MemoryStore, ScoreStore};
pub use logging::init as init_logging;
pub use plugin::{
    start_session, LatestFrame, PoseFeed, RunnerPlugin, RunnerSession, SessionFinished,
};
pub use pose::{CalibrationBaseline, PoseAction, PoseClassifier, PoseSource};
pub use session::{Session, SessionConfig, SessionOutcome, SessionPhase, TickReport};
pub use sim::{GameState, SimEvent, Simulation, StepReport};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use neon_runner::prelude::*;
    //! ```

    pub use crate::pose::{Calibration, PoseSample, ReplayPoseSource};
    pub use crate::CalibrationBaseline;
    pub use crate::Difficulty;
    pub use crate::PoseAction;
    pub use crate::RunnerPlugin;
    pub use crate::Sensitivity;
    pub use crate::Session;
    pub use crate::SessionConfig;
    pub use crate::Simulation;
}
