//! Heads-up display text and the calibration preview guides.

use crate::pose::PoseClassifier;
use crate::session::{Session, SessionPhase};

/// Score as shown on the HUD: zero-padded to six digits.
///
/// # Examples
///
/// ```
/// use neon_runner::render::format_score;
/// assert_eq!(format_score(420), "000420");
/// assert_eq!(format_score(1_234_567), "1234567");
/// ```
#[must_use]
pub fn format_score(score: u64) -> String {
    format!("{score:06}")
}

/// Text overlay for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    /// Six-digit score.
    pub score: String,
    /// Floored distance line.
    pub distance: String,
    /// Combo banner, shown above 1.
    pub combo: Option<String>,
    /// Labels of effects in force.
    pub effects: Vec<&'static str>,
    /// Label of the latest pose action.
    pub action: &'static str,
    /// Seconds left before the run starts.
    pub countdown: Option<u64>,
}

impl Hud {
    /// Builds the overlay from the session's current state.
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        let sim = session.simulation();
        let state = sim.state();
        Self {
            score: format_score(state.score),
            distance: format!("DISTANCE: {}m", state.distance_floor()),
            combo: (state.combo > 1).then(|| format!("COMBO x{}", state.combo)),
            effects: sim.effects().kinds().into_iter().map(|k| k.label()).collect(),
            action: session.latest_action().label(),
            countdown: (session.phase() == SessionPhase::Countdown)
                .then(|| session.countdown_seconds()),
        }
    }
}

/// Horizontal guide lines for the camera preview, in preview pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdGuides {
    /// Head above this row reads as a jump.
    pub jump: f32,
    /// Calibrated neutral row.
    pub baseline: f32,
    /// Head below this row reads as a duck.
    pub duck: f32,
    /// Most recent head row, if any pose was seen.
    pub live: Option<f32>,
}

/// Guide rows for a preview `height` pixels tall.
#[must_use]
pub fn threshold_guides(classifier: &PoseClassifier, height: f32) -> ThresholdGuides {
    let baseline = classifier.baseline().get();
    let thresholds = classifier.thresholds();
    ThresholdGuides {
        jump: (baseline - thresholds.jump) * height,
        baseline: baseline * height,
        duck: (baseline + thresholds.duck) * height,
        live: classifier.last_normalized_y().map(|y| y * height),
    }
}
