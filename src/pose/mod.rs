//! Pose input: keypoint samples, calibration, classification and the handoff
//! of the resulting action to the simulation.

mod calibration;
mod classifier;
mod keypoint;
mod slot;
mod source;

pub use calibration::{
    average_or, Calibration, CalibrationBaseline, CalibrationError, CalibrationPhase,
};
pub use classifier::{classify, PoseAction, PoseClassifier, Thresholds};
pub use keypoint::{Keypoint, KeypointName, PoseSample};
pub use slot::{action_slot, ActionReader, ActionWriter};
pub use source::{
    poll_or_absorb, Estimate, NoPoseSource, PoseSource, PoseSourceError, ReplayPoseSource,
};

use std::time::Duration;

use log::warn;

/// The pose side of a session: samples a source, classifies, publishes.
///
/// Owns the only [`ActionWriter`] for the session, so the classifier is the
/// single writer of the action.
#[derive(Debug)]
pub struct PoseLoop {
    classifier: PoseClassifier,
    writer: ActionWriter,
}

impl PoseLoop {
    /// Binds a classifier to the write end of an action slot.
    #[must_use]
    pub const fn new(classifier: PoseClassifier, writer: ActionWriter) -> Self {
        Self { classifier, writer }
    }

    /// Runs one sampling iteration against `source`.
    ///
    /// A pending estimate publishes nothing; the previous value stays in the
    /// slot until the estimator catches up.
    pub fn sample(&mut self, source: &mut dyn PoseSource) -> PoseAction {
        match poll_or_absorb(source) {
            Estimate::Pending => self.classifier.action(),
            estimate => {
                let action = self.classifier.observe(estimate.sample());
                self.writer.publish(action);
                action
            }
        }
    }

    /// Read access to the classifier, for debug overlays.
    #[must_use]
    pub const fn classifier(&self) -> &PoseClassifier {
        &self.classifier
    }
}

/// Runs calibration against `source` with a fixed frame length.
///
/// Sampling starts as soon as the source reports ready, standing in for the
/// operator's confirmation. If the protocol has not completed after
/// `max_frames`, the last live value is used as the baseline.
pub fn calibrate(
    source: &mut dyn PoseSource,
    frame: Duration,
    max_frames: usize,
) -> CalibrationBaseline {
    let mut calibration = Calibration::new();
    for _ in 0..max_frames {
        if calibration.phase() == CalibrationPhase::Init && source.is_ready() {
            if let Err(err) = calibration.mark_ready().and_then(|()| calibration.start()) {
                warn!("calibration could not start: {err}");
                break;
            }
        }
        let estimate = poll_or_absorb(source);
        calibration.observe(estimate.sample());
        if let Some(baseline) = calibration.tick(frame) {
            return baseline;
        }
    }
    warn!(
        "calibration incomplete after {max_frames} frames; using live value {:.3}",
        calibration.live_y()
    );
    CalibrationBaseline::new(calibration.live_y())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Sensitivity;
    use mockall::mock;
    use mockall::Sequence;

    mock! {
        Source {}
        impl PoseSource for Source {
            fn is_ready(&self) -> bool;
            fn poll(&mut self) -> Result<Estimate, PoseSourceError>;
        }
    }

    fn head_at(normalized: f32) -> Estimate {
        Estimate::Pose(PoseSample::new(
            vec![Keypoint::new(KeypointName::Nose, 0.0, normalized * 200.0)],
            200.0,
        ))
    }

    #[test]
    fn pending_and_failures_keep_the_published_action() {
        let mut source = MockSource::new();
        let mut seq = Sequence::new();
        source
            .expect_poll()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(head_at(0.2)));
        source
            .expect_poll()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(Estimate::Pending));
        source
            .expect_poll()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(PoseSourceError::Estimator("model crashed".into())));
        source
            .expect_poll()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(head_at(0.8)));

        let classifier = PoseClassifier::new(CalibrationBaseline::new(0.5), Sensitivity::default());
        let (writer, reader) = action_slot(PoseAction::Idle);
        let mut pose_loop = PoseLoop::new(classifier, writer);

        assert_eq!(pose_loop.sample(&mut source), PoseAction::Jump);
        assert_eq!(reader.latest(), PoseAction::Jump);
        assert_eq!(pose_loop.sample(&mut source), PoseAction::Jump);
        assert_eq!(pose_loop.sample(&mut source), PoseAction::Jump);
        assert_eq!(reader.latest(), PoseAction::Jump);
        assert_eq!(pose_loop.sample(&mut source), PoseAction::Duck);
        assert_eq!(reader.latest(), PoseAction::Duck);
    }

    #[test]
    fn calibrate_averages_a_steady_stance() {
        let mut source = MockSource::new();
        source.expect_is_ready().return_const(true);
        source.expect_poll().returning(|| Ok(head_at(0.42)));
        let baseline = calibrate(&mut source, Duration::from_millis(100), 1_000);
        assert!((baseline.get() - 0.42).abs() < 1e-4);
    }

    #[test]
    fn calibrate_falls_back_when_the_source_never_readies() {
        let mut source = MockSource::new();
        source.expect_is_ready().return_const(false);
        source.expect_poll().returning(|| Ok(Estimate::Pending));
        let baseline = calibrate(&mut source, Duration::from_millis(100), 50);
        assert!((baseline.get() - crate::DEFAULT_LIVE_Y).abs() < f32::EPSILON);
    }
}
