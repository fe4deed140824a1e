//! Headless Neon Runner.
//!
//! Calibrates against a pose feed (or takes a baseline from the command
//! line), plays one session inside a Bevy app driven at a fixed frame length,
//! and records the result on the leaderboard.
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use bevy::ecs::prelude::On;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use log::{info, warn};
use neon_runner::pose::{calibrate, NoPoseSource, PoseSource, ReplayPoseSource};
use neon_runner::{
    init_logging, start_session, AudioOutput, CalibrationBaseline, Difficulty, JsonFileStore,
    LeaderboardEntry, LogAudio, RunnerPlugin, RunnerSession, RunnerSettings, ScoreStore,
    Sensitivity, SessionConfig, SessionFinished, SessionOutcome, Volume, CALIBRATION_COUNTDOWN,
};

/// A motion-controlled arcade runner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Difficulty tier; overrides the settings file
    #[arg(short, long, value_enum)]
    difficulty: Option<Difficulty>,
    /// Pose threshold multiplier; overrides the settings file
    #[arg(short, long)]
    sensitivity: Option<f32>,
    /// Skip calibration and use this normalised head height (0 to 1)
    #[arg(short, long)]
    baseline: Option<f32>,
    /// Master volume (0 to 1); below 0.1 mutes; overrides the settings file
    #[arg(long)]
    volume: Option<f32>,
    /// JSON-lines pose recording to replay
    #[arg(short, long)]
    poses: Option<PathBuf>,
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Leaderboard file to record the result in
    #[arg(short, long)]
    leaderboard: Option<PathBuf>,
    /// Name recorded on the leaderboard
    #[arg(short, long, default_value = "PLAYER")]
    name: String,
    /// Seed for spawns and scenery
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Silence all audio
    #[arg(short, long)]
    muted: bool,
}

/// Calibration gives up after this many countdowns' worth of frames.
const CALIBRATION_PATIENCE: u32 = 4;

/// Outcome captured by the session observer.
#[derive(Resource, Default)]
struct Outcome(Option<SessionOutcome>);

fn resolve_settings(args: &Args) -> Result<RunnerSettings> {
    let mut settings = match &args.settings {
        Some(path) => RunnerSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => RunnerSettings::default(),
    };
    if let Some(difficulty) = args.difficulty {
        settings.difficulty = difficulty;
    }
    if let Some(value) = args.sensitivity {
        settings.sensitivity = Sensitivity::new(value).context("invalid --sensitivity")?;
    }
    if let Some(value) = args.volume {
        settings.volume = Volume::new(value).context("invalid --volume")?;
    }
    settings.muted |= args.muted;
    Ok(settings)
}

fn open_source(poses: Option<&Path>) -> Result<Box<dyn PoseSource>> {
    Ok(match poses {
        Some(path) => Box::new(
            ReplayPoseSource::open(path)
                .with_context(|| format!("opening pose recording {}", path.display()))?,
        ),
        None => Box::new(NoPoseSource),
    })
}

fn record(path: &Path, name: &str, difficulty: Difficulty, outcome: SessionOutcome) -> Result<()> {
    let mut store = JsonFileStore::open(path);
    store
        .append(LeaderboardEntry::now(
            name,
            outcome.final_score,
            outcome.final_distance,
            difficulty,
        ))
        .context("saving leaderboard")?;
    if let Some(best) = store.best_score() {
        info!("best score on record: {best}");
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = resolve_settings(&args)?;
    let frame = Duration::from_secs(1) / args.fps.max(1);
    let mut source = open_source(args.poses.as_deref())?;

    let baseline = if let Some(value) = args.baseline {
        CalibrationBaseline::try_from(value).context("invalid --baseline")?
    } else {
        let window = CALIBRATION_COUNTDOWN.saturating_mul(CALIBRATION_PATIENCE);
        let budget =
            usize::try_from(window.as_nanos() / frame.as_nanos().max(1)).unwrap_or(usize::MAX);
        calibrate(source.as_mut(), frame, budget)
    };

    let mut config = SessionConfig::new(settings.difficulty, settings.sensitivity, baseline);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(RunnerPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(frame))
        .init_resource::<Outcome>();
    app.add_observer(|event: On<SessionFinished>, mut sink: ResMut<Outcome>| {
        sink.0 = Some(event.event().0);
    });
    let audio = AudioOutput::open(Box::new(LogAudio::default()), settings.volume, settings.muted);
    start_session(app.world_mut(), config, source, Some(audio));

    info!("running {} session at {} fps", settings.difficulty, args.fps);
    while !app
        .world()
        .get_resource::<RunnerSession>()
        .is_none_or(|session| session.0.is_halted())
    {
        app.update();
    }

    let Some(result) = app.world_mut().resource_mut::<Outcome>().0.take() else {
        warn!("session ended without an outcome");
        return Ok(());
    };
    info!(
        "game over: score {} distance {}m",
        result.final_score, result.final_distance
    );
    if let Some(path) = &args.leaderboard {
        record(path, &args.name, settings.difficulty, result)?;
    }
    Ok(())
}
