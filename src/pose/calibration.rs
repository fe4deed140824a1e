//! Calibration protocol producing the neutral-stance baseline.
//!
//! The protocol is a small state machine driven by the host:
//!
//! 1. [`Calibration::mark_ready`] once the pose source can deliver frames.
//! 2. [`Calibration::observe`] every frame, which refreshes the live preview
//!    and, during the countdown, records samples.
//! 3. [`Calibration::start`] when the operator confirms a neutral stance.
//! 4. [`Calibration::tick`] with the frame delta until it yields the
//!    [`CalibrationBaseline`].
//!
//! Calibration never fails outright: if no usable sample arrives during the
//! countdown the last live reading becomes the baseline.

use std::time::Duration;

use log::{debug, info};
use thiserror::Error;

use super::PoseSample;
use crate::config::SettingsError;
use crate::{CALIBRATION_COUNTDOWN, DEFAULT_LIVE_Y};

/// Normalised head height of the player's neutral stance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationBaseline(f32);

impl CalibrationBaseline {
    /// Wraps a normalised height.
    #[must_use]
    pub const fn new(normalized_y: f32) -> Self {
        Self(normalized_y)
    }

    /// Returns the normalised height.
    #[must_use]
    pub const fn get(self) -> f32 {
        self.0
    }
}

impl Default for CalibrationBaseline {
    fn default() -> Self {
        Self(DEFAULT_LIVE_Y)
    }
}

impl TryFrom<f32> for CalibrationBaseline {
    type Error = SettingsError;

    /// Accepts a normalised height in `[0, 1]`.
    fn try_from(value: f32) -> Result<Self, Self::Error> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SettingsError::InvalidBaseline(value))
        }
    }
}

/// Externally visible stage of the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationPhase {
    /// Waiting for the pose source.
    Init,
    /// Live preview, waiting for the operator.
    Detecting,
    /// Collecting samples.
    Countdown,
    /// Baseline produced.
    Done,
}

/// Command issued in a phase that does not accept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("calibration cannot {command} while {phase:?}")]
pub struct CalibrationError {
    /// Phase the protocol was in.
    pub phase: CalibrationPhase,
    /// Rejected command.
    pub command: &'static str,
}

/// Mean of the collected samples, or `fallback` when there are none.
///
/// # Examples
///
/// ```
/// use neon_runner::pose::average_or;
/// assert!((average_or(&[0.40, 0.42, 0.44], 0.5) - 0.42).abs() < 1e-6);
/// assert_eq!(average_or(&[], 0.5), 0.5);
/// ```
#[must_use]
pub fn average_or(samples: &[f32], fallback: f32) -> f32 {
    if samples.is_empty() {
        return fallback;
    }
    let sum: f64 = samples.iter().copied().map(f64::from).sum();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        reason = "The mean of normalised f32 samples fits back into f32."
    )]
    let mean = (sum / samples.len() as f64) as f32;
    mean
}

/// Calibration state machine.
#[derive(Debug, Clone)]
pub struct Calibration {
    phase: CalibrationPhase,
    live_y: f32,
    samples: Vec<f32>,
    remaining: Duration,
    baseline: Option<CalibrationBaseline>,
}

impl Default for Calibration {
    fn default() -> Self {
        Self::new()
    }
}

impl Calibration {
    /// Creates a protocol in [`CalibrationPhase::Init`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: CalibrationPhase::Init,
            live_y: DEFAULT_LIVE_Y,
            samples: Vec::new(),
            remaining: CALIBRATION_COUNTDOWN,
            baseline: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> CalibrationPhase {
        self.phase
    }

    /// Last usable normalised head height, for the live preview.
    #[must_use]
    pub const fn live_y(&self) -> f32 {
        self.live_y
    }

    /// Samples recorded so far in the current countdown.
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Whole seconds left on the countdown, rounded up, for display.
    #[must_use]
    pub fn seconds_left(&self) -> u64 {
        match self.phase {
            CalibrationPhase::Countdown => {
                let secs = self.remaining.as_secs();
                if self.remaining.subsec_nanos() > 0 {
                    secs + 1
                } else {
                    secs
                }
            }
            CalibrationPhase::Done => 0,
            CalibrationPhase::Init | CalibrationPhase::Detecting => CALIBRATION_COUNTDOWN.as_secs(),
        }
    }

    /// The baseline, once the protocol has finished.
    #[must_use]
    pub const fn baseline(&self) -> Option<CalibrationBaseline> {
        self.baseline
    }

    /// Signals that the pose source is ready.
    ///
    /// # Errors
    /// Returns [`CalibrationError`] unless the protocol is in
    /// [`CalibrationPhase::Init`].
    pub fn mark_ready(&mut self) -> Result<(), CalibrationError> {
        self.expect_phase(CalibrationPhase::Init, "mark ready")?;
        self.phase = CalibrationPhase::Detecting;
        debug!("calibration detecting");
        Ok(())
    }

    /// Starts the sampling countdown with an empty buffer.
    ///
    /// # Errors
    /// Returns [`CalibrationError`] unless the protocol is in
    /// [`CalibrationPhase::Detecting`].
    pub fn start(&mut self) -> Result<(), CalibrationError> {
        self.expect_phase(CalibrationPhase::Detecting, "start")?;
        self.samples.clear();
        self.remaining = CALIBRATION_COUNTDOWN;
        self.phase = CalibrationPhase::Countdown;
        info!("calibration countdown started");
        Ok(())
    }

    /// Feeds one frame's estimate.
    ///
    /// Samples without a usable head marker are skipped entirely.
    pub fn observe(&mut self, sample: Option<&PoseSample>) {
        if matches!(self.phase, CalibrationPhase::Init | CalibrationPhase::Done) {
            return;
        }
        let Some(y) = sample.and_then(PoseSample::normalized_y) else {
            return;
        };
        self.live_y = y;
        if self.phase == CalibrationPhase::Countdown {
            self.samples.push(y);
        }
    }

    /// Advances the countdown by `dt`.
    ///
    /// Returns the baseline on the tick that completes the protocol; later
    /// calls return the same value.
    pub fn tick(&mut self, dt: Duration) -> Option<CalibrationBaseline> {
        if self.phase == CalibrationPhase::Countdown {
            self.remaining = self.remaining.saturating_sub(dt);
            if self.remaining.is_zero() {
                self.finish();
            }
        }
        self.baseline
    }

    fn finish(&mut self) {
        let value = average_or(&self.samples, self.live_y);
        info!(
            "calibration done: baseline {value:.3} from {} samples",
            self.samples.len()
        );
        self.baseline = Some(CalibrationBaseline::new(value));
        self.phase = CalibrationPhase::Done;
    }

    fn expect_phase(
        &self,
        expected: CalibrationPhase,
        command: &'static str,
    ) -> Result<(), CalibrationError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(CalibrationError {
                phase: self.phase,
                command,
            })
        }
    }
}
