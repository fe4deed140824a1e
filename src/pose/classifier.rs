//! Threshold classifier turning head height into a discrete action.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CalibrationBaseline, PoseSample};
use crate::config::Sensitivity;
use crate::{DUCK_THRESHOLD_BASE, JUMP_THRESHOLD_BASE};

/// Discrete control signal derived from the player's pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoseAction {
    /// Head within the neutral band.
    #[default]
    Idle,
    /// Head raised above the jump threshold.
    Jump,
    /// Head lowered below the duck threshold.
    Duck,
}

impl PoseAction {
    pub(crate) const fn to_bits(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Jump => 1,
            Self::Duck => 2,
        }
    }

    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => Self::Jump,
            2 => Self::Duck,
            _ => Self::Idle,
        }
    }

    /// Upper-case label shown by the HUD.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Jump => "JUMP",
            Self::Duck => "DUCK",
        }
    }
}

impl fmt::Display for PoseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Jump and duck distances from the baseline, in normalised units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Upward travel needed for [`PoseAction::Jump`].
    pub jump: f32,
    /// Downward travel needed for [`PoseAction::Duck`].
    pub duck: f32,
}

impl Thresholds {
    /// Base thresholds scaled inversely by `sensitivity`.
    #[must_use]
    pub fn for_sensitivity(sensitivity: Sensitivity) -> Self {
        let s = sensitivity.get();
        Self {
            jump: JUMP_THRESHOLD_BASE / s,
            duck: DUCK_THRESHOLD_BASE / s,
        }
    }
}

/// Classifies one normalised head height against a baseline.
///
/// Exhaustive and mutually exclusive: the jump band lies strictly above
/// `baseline - jump`, the duck band strictly below `baseline + duck`.
///
/// # Examples
///
/// ```
/// use neon_runner::pose::{classify, PoseAction, Thresholds};
/// let t = Thresholds { jump: 0.05, duck: 0.05 };
/// assert_eq!(classify(0.30, 0.40, t), PoseAction::Jump);
/// assert_eq!(classify(0.40, 0.40, t), PoseAction::Idle);
/// assert_eq!(classify(0.50, 0.40, t), PoseAction::Duck);
/// ```
#[must_use]
pub fn classify(normalized_y: f32, baseline: f32, thresholds: Thresholds) -> PoseAction {
    if normalized_y < baseline - thresholds.jump {
        PoseAction::Jump
    } else if normalized_y > baseline + thresholds.duck {
        PoseAction::Duck
    } else {
        PoseAction::Idle
    }
}

/// Stateful classifier retaining the last action across missing samples.
#[derive(Debug, Clone)]
pub struct PoseClassifier {
    baseline: CalibrationBaseline,
    thresholds: Thresholds,
    action: PoseAction,
    last_y: Option<f32>,
}

impl PoseClassifier {
    /// Creates a classifier for a calibrated baseline and sensitivity.
    #[must_use]
    pub fn new(baseline: CalibrationBaseline, sensitivity: Sensitivity) -> Self {
        Self {
            baseline,
            thresholds: Thresholds::for_sensitivity(sensitivity),
            action: PoseAction::Idle,
            last_y: None,
        }
    }

    /// Feeds one frame's estimate and returns the current action.
    ///
    /// `None`, or a sample without a usable head marker, leaves the previous
    /// action in place.
    pub fn observe(&mut self, sample: Option<&PoseSample>) -> PoseAction {
        if let Some(y) = sample.and_then(PoseSample::normalized_y) {
            self.last_y = Some(y);
            self.action = classify(y, self.baseline.get(), self.thresholds);
        }
        self.action
    }

    /// The action produced by the most recent usable sample.
    #[must_use]
    pub const fn action(&self) -> PoseAction {
        self.action
    }

    /// The most recent usable normalised head height.
    #[must_use]
    pub const fn last_normalized_y(&self) -> Option<f32> {
        self.last_y
    }

    /// The baseline this classifier compares against.
    #[must_use]
    pub const fn baseline(&self) -> CalibrationBaseline {
        self.baseline
    }

    /// Active thresholds.
    #[must_use]
    pub const fn thresholds(&self) -> Thresholds {
        self.thresholds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Keypoint, KeypointName};
    use rstest::rstest;

    fn nose_sample(normalized: f32) -> PoseSample {
        PoseSample::new(
            vec![Keypoint::new(KeypointName::Nose, 0.0, normalized * 1000.0)],
            1000.0,
        )
    }

    fn sensitivity(value: f32) -> Sensitivity {
        Sensitivity::new(value).unwrap_or_default()
    }

    #[rstest]
    #[case::well_above(0.20, PoseAction::Jump)]
    #[case::just_above(0.349, PoseAction::Jump)]
    #[case::inside_jump_edge(0.351, PoseAction::Idle)]
    #[case::centre(0.40, PoseAction::Idle)]
    #[case::inside_duck_edge(0.449, PoseAction::Idle)]
    #[case::just_below(0.451, PoseAction::Duck)]
    fn classifies_against_unit_sensitivity(#[case] y: f32, #[case] expected: PoseAction) {
        let thresholds = Thresholds::for_sensitivity(sensitivity(1.0));
        assert_eq!(classify(y, 0.40, thresholds), expected);
    }

    #[test]
    fn higher_sensitivity_shrinks_the_neutral_band() {
        let twitchy = Thresholds::for_sensitivity(sensitivity(2.0));
        let calm = Thresholds::for_sensitivity(sensitivity(0.5));
        assert_eq!(classify(0.37, 0.40, twitchy), PoseAction::Jump);
        assert_eq!(classify(0.37, 0.40, calm), PoseAction::Idle);
        assert!(twitchy.jump < calm.jump);
        assert!(twitchy.duck < calm.duck);
    }

    #[test]
    fn classification_is_exhaustive_and_exclusive() {
        let thresholds = Thresholds::for_sensitivity(sensitivity(1.3));
        let baseline = 0.42;
        for step in 0..=1000 {
            let y = step as f32 / 1000.0;
            let jump = y < baseline - thresholds.jump;
            let duck = y > baseline + thresholds.duck;
            let expected = match (jump, duck) {
                (true, false) => PoseAction::Jump,
                (false, true) => PoseAction::Duck,
                (false, false) => PoseAction::Idle,
                (true, true) => panic!("bands overlap at {y}"),
            };
            assert_eq!(classify(y, baseline, thresholds), expected);
        }
    }

    #[test]
    fn missing_pose_keeps_previous_action() {
        let mut classifier =
            PoseClassifier::new(CalibrationBaseline::new(0.5), sensitivity(1.0));
        assert_eq!(classifier.observe(Some(&nose_sample(0.3))), PoseAction::Jump);
        assert_eq!(classifier.observe(None), PoseAction::Jump);
        let headless = PoseSample::new(vec![], 480.0);
        assert_eq!(classifier.observe(Some(&headless)), PoseAction::Jump);
        assert!(classifier
            .last_normalized_y()
            .is_some_and(|y| (y - 0.3).abs() < 1e-6));
        assert_eq!(classifier.observe(Some(&nose_sample(0.5))), PoseAction::Idle);
    }

    #[rstest]
    #[case(PoseAction::Idle)]
    #[case(PoseAction::Jump)]
    #[case(PoseAction::Duck)]
    fn bits_round_trip(#[case] action: PoseAction) {
        assert_eq!(PoseAction::from_bits(action.to_bits()), action);
    }
}
