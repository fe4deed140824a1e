//! Numeric conversion helpers used across the project.
//!
//! Guard the float-to-integer conversions that the session boundary and the
//! HUD rely on, so reported values never wrap or go negative.

/// Floor a travelled distance into whole metres.
///
/// Negative and non-finite values collapse to zero; values beyond `u64`
/// saturate.
///
/// # Examples
///
/// ```
/// use neon_runner::numeric::floor_distance;
/// assert_eq!(floor_distance(12.9), 12);
/// assert_eq!(floor_distance(-3.0), 0);
/// assert_eq!(floor_distance(f32::NAN), 0);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "The floored value is clamped to the u64 domain before casting."
)]
#[must_use]
pub fn floor_distance(value: f32) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let floored = f64::from(value).floor();
    if floored >= u64::MAX as f64 {
        return u64::MAX;
    }
    floored as u64
}

/// Convert a frame counter into `f32` for interval comparisons.
#[expect(
    clippy::cast_precision_loss,
    reason = "Frame counts stay far below 2^24 within a session."
)]
#[must_use]
pub fn frames_as_f32(frames: u64) -> f32 {
    frames as f32
}

/// Clamp a ratio into `[0, 1]`, mapping NaN to zero.
///
/// # Examples
///
/// ```
/// use neon_runner::numeric::unit_clamp;
/// assert_eq!(unit_clamp(1.5), 1.0);
/// assert_eq!(unit_clamp(-0.2), 0.0);
/// assert_eq!(unit_clamp(f32::NAN), 0.0);
/// ```
#[must_use]
pub fn unit_clamp(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
