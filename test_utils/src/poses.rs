//! Pose samples and sources for driving the classifier and sessions.

use std::collections::VecDeque;

use neon_runner::pose::{Estimate, Keypoint, KeypointName, PoseSample, PoseSource, PoseSourceError};

/// Frame height used by every fixture sample.
pub const FRAME_HEIGHT: f32 = 480.0;

/// Sample whose nose sits at `normalized` of the frame height.
///
/// # Examples
/// ```
/// use test_utils::poses::head_at;
/// let y = head_at(0.25).normalized_y().unwrap_or_default();
/// assert!((y - 0.25).abs() < 1e-6);
/// ```
pub fn head_at(normalized: f32) -> PoseSample {
    PoseSample::new(
        vec![Keypoint::new(KeypointName::Nose, 320.0, normalized * FRAME_HEIGHT)],
        FRAME_HEIGHT,
    )
}

/// Sample without a nose whose shoulder midpoint sits at `normalized`.
pub fn shoulders_at(normalized: f32) -> PoseSample {
    let y = normalized * FRAME_HEIGHT;
    PoseSample::new(
        vec![
            Keypoint::new(KeypointName::LeftShoulder, 260.0, y - 4.0),
            Keypoint::new(KeypointName::RightShoulder, 380.0, y + 4.0),
        ],
        FRAME_HEIGHT,
    )
}

/// JSON-lines recording with one head height (or `null`) per frame.
pub fn replay_lines(frames: &[Option<f32>]) -> String {
    frames
        .iter()
        .map(|frame| match frame {
            Some(y) => serde_json::to_string(&head_at(*y)).unwrap_or_else(|e| {
                panic!("fixture sample should serialise: {e}")
            }),
            None => "null".to_owned(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Source replaying a fixed script, then reporting no pose forever.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: VecDeque<Estimate>,
    ready: bool,
}

impl ScriptedSource {
    /// Ready source yielding `script` in order.
    pub fn new(script: impl IntoIterator<Item = Estimate>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ready: true,
        }
    }

    /// Ready source holding a pose at `normalized` for `frames` frames.
    pub fn holding(normalized: f32, frames: usize) -> Self {
        Self::new((0..frames).map(|_| Estimate::Pose(head_at(normalized))))
    }

    /// Frames left in the script.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl PoseSource for ScriptedSource {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn poll(&mut self) -> Result<Estimate, PoseSourceError> {
        Ok(self.script.pop_front().unwrap_or(Estimate::NoPose))
    }
}
