//! Keypoint samples as delivered by the pose estimator.

use serde::{Deserialize, Serialize};

/// Keypoint names the runner cares about.
///
/// Estimators report more joints than these; anything else deserialises to
/// [`KeypointName::Other`] and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeypointName {
    /// Tip of the nose, the primary head marker.
    Nose,
    /// Left shoulder joint.
    LeftShoulder,
    /// Right shoulder joint.
    RightShoulder,
    /// Any other joint.
    #[serde(other)]
    Other,
}

/// A single named keypoint in source-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Joint identity.
    pub name: KeypointName,
    /// Horizontal pixel coordinate.
    pub x: f32,
    /// Vertical pixel coordinate, 0 at the top of the frame.
    pub y: f32,
    /// Estimator confidence, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl Keypoint {
    /// Creates a keypoint without a confidence score.
    #[must_use]
    pub const fn new(name: KeypointName, x: f32, y: f32) -> Self {
        Self {
            name,
            x,
            y,
            score: None,
        }
    }
}

/// One pose estimate for one video frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseSample {
    /// Keypoints reported by the estimator, in any order.
    pub keypoints: Vec<Keypoint>,
    /// Height of the source frame in pixels.
    pub frame_height: f32,
}

impl PoseSample {
    /// Creates a sample from keypoints and the frame height they refer to.
    #[must_use]
    pub const fn new(keypoints: Vec<Keypoint>, frame_height: f32) -> Self {
        Self {
            keypoints,
            frame_height,
        }
    }

    /// Looks up a keypoint by name.
    #[must_use]
    pub fn get(&self, name: KeypointName) -> Option<&Keypoint> {
        self.keypoints.iter().find(|k| k.name == name)
    }

    /// Vertical pixel position of the head.
    ///
    /// Uses the nose when present, otherwise the midpoint of both shoulders.
    /// Returns `None` when neither is available.
    #[must_use]
    pub fn head_y(&self) -> Option<f32> {
        if let Some(nose) = self.get(KeypointName::Nose) {
            return Some(nose.y);
        }
        let left = self.get(KeypointName::LeftShoulder)?;
        let right = self.get(KeypointName::RightShoulder)?;
        Some((left.y + right.y) / 2.0)
    }

    /// Head height as a fraction of the frame height, 0 at the top.
    ///
    /// # Examples
    ///
    /// ```
    /// use neon_runner::pose::{Keypoint, KeypointName, PoseSample};
    /// let sample = PoseSample::new(vec![Keypoint::new(KeypointName::Nose, 320.0, 120.0)], 480.0);
    /// assert_eq!(sample.normalized_y(), Some(0.25));
    /// ```
    #[must_use]
    pub fn normalized_y(&self) -> Option<f32> {
        if !(self.frame_height.is_finite() && self.frame_height > 0.0) {
            return None;
        }
        let y = self.head_y()? / self.frame_height;
        y.is_finite().then_some(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn kp(name: KeypointName, y: f32) -> Keypoint {
        Keypoint::new(name, 100.0, y)
    }

    #[test]
    fn nose_wins_over_shoulders() {
        let sample = PoseSample::new(
            vec![
                kp(KeypointName::LeftShoulder, 300.0),
                kp(KeypointName::Nose, 100.0),
                kp(KeypointName::RightShoulder, 320.0),
            ],
            400.0,
        );
        assert_eq!(sample.head_y(), Some(100.0));
    }

    #[test]
    fn shoulder_midpoint_is_fallback() {
        let sample = PoseSample::new(
            vec![
                kp(KeypointName::LeftShoulder, 300.0),
                kp(KeypointName::RightShoulder, 320.0),
            ],
            400.0,
        );
        assert_relative_eq!(sample.normalized_y().unwrap_or_default(), 0.775);
    }

    #[rstest]
    #[case::nothing(vec![])]
    #[case::one_shoulder(vec![kp(KeypointName::LeftShoulder, 200.0)])]
    #[case::unrelated(vec![kp(KeypointName::Other, 200.0)])]
    fn unusable_samples_yield_none(#[case] keypoints: Vec<Keypoint>) {
        let sample = PoseSample::new(keypoints, 480.0);
        assert_eq!(sample.normalized_y(), None);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-10.0)]
    #[case(f32::NAN)]
    fn bad_frame_height_yields_none(#[case] height: f32) {
        let sample = PoseSample::new(vec![kp(KeypointName::Nose, 10.0)], height);
        assert_eq!(sample.normalized_y(), None);
    }

    #[test]
    fn unknown_joint_names_deserialise_as_other() {
        let json = r#"{"keypoints":[{"name":"left_ankle","x":1.0,"y":2.0,"score":0.4}],"frame_height":480.0}"#;
        let sample: PoseSample = serde_json::from_str(json).unwrap_or_default();
        assert_eq!(sample.keypoints.len(), 1);
        assert_eq!(sample.keypoints.first().map(|k| k.name), Some(KeypointName::Other));
    }
}
