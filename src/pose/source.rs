//! Pose sources: the boundary to the external pose estimator.
//!
//! Estimation is asynchronous on real hardware, so [`PoseSource::poll`] may
//! report [`Estimate::Pending`]; callers try again next frame instead of
//! blocking. Failures are absorbed into [`Estimate::NoPose`] by
//! [`poll_or_absorb`] so a misbehaving estimator only freezes the last action.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::warn;
use thiserror::Error;

use super::PoseSample;

/// Result of polling a pose source for one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate {
    /// The estimator has not finished the current frame.
    Pending,
    /// The estimator ran but found nobody.
    NoPose,
    /// A pose was detected.
    Pose(PoseSample),
}

impl Estimate {
    /// Returns the sample when one was detected.
    #[must_use]
    pub const fn sample(&self) -> Option<&PoseSample> {
        match self {
            Self::Pose(sample) => Some(sample),
            Self::Pending | Self::NoPose => None,
        }
    }
}

/// Errors raised by pose sources.
#[derive(Debug, Error)]
pub enum PoseSourceError {
    /// The underlying device or file failed.
    #[error("pose source I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// A recorded frame could not be decoded.
    #[error("line {line}: {source}")]
    Decode {
        /// One-based line number in the recording.
        line: usize,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The estimator reported a failure for this frame.
    #[error("estimator failed: {0}")]
    Estimator(String),
}

/// Anything that can deliver pose estimates frame by frame.
pub trait PoseSource {
    /// Whether the estimator is loaded and able to deliver frames.
    fn is_ready(&self) -> bool {
        true
    }

    /// Polls for the estimate of the current frame.
    ///
    /// # Errors
    /// Returns [`PoseSourceError`] when the estimator fails for this frame.
    fn poll(&mut self) -> Result<Estimate, PoseSourceError>;
}

/// Polls `source`, logging and absorbing failures as [`Estimate::NoPose`].
pub fn poll_or_absorb(source: &mut dyn PoseSource) -> Estimate {
    match source.poll() {
        Ok(estimate) => estimate,
        Err(err) => {
            warn!("pose estimate dropped: {err}");
            Estimate::NoPose
        }
    }
}

/// A source that never sees anybody.
///
/// Useful for headless runs: the action stays [`super::PoseAction::Idle`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPoseSource;

impl PoseSource for NoPoseSource {
    fn poll(&mut self) -> Result<Estimate, PoseSourceError> {
        Ok(Estimate::NoPose)
    }
}

/// Replays a recording of one JSON document per frame.
///
/// Each line is either a serialised [`PoseSample`] or `null` for a frame with
/// no detection. Malformed lines are reported once, when polled, and then
/// behave like `null`. After the last line the source reports
/// [`Estimate::NoPose`] forever.
#[derive(Debug)]
pub struct ReplayPoseSource {
    frames: VecDeque<Result<Option<PoseSample>, PoseSourceError>>,
}

impl ReplayPoseSource {
    /// Parses a recording from any buffered reader.
    ///
    /// # Errors
    /// Returns [`PoseSourceError::Io`] when reading fails. Decode failures are
    /// kept per frame rather than aborting the load.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, PoseSourceError> {
        let mut frames = VecDeque::new();
        for (index, read) in reader.lines().enumerate() {
            let line = read?;
            if line.trim().is_empty() {
                continue;
            }
            let frame = serde_json::from_str::<Option<PoseSample>>(&line).map_err(|source| {
                PoseSourceError::Decode {
                    line: index + 1,
                    source,
                }
            });
            frames.push_back(frame);
        }
        Ok(Self { frames })
    }

    /// Opens a recording from disk.
    ///
    /// # Errors
    /// Returns [`PoseSourceError::Io`] when the file cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PoseSourceError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Frames not yet replayed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl PoseSource for ReplayPoseSource {
    fn poll(&mut self) -> Result<Estimate, PoseSourceError> {
        match self.frames.pop_front() {
            Some(Ok(Some(sample))) => Ok(Estimate::Pose(sample)),
            Some(Ok(None)) | None => Ok(Estimate::NoPose),
            Some(Err(err)) => Err(err),
        }
    }
}
