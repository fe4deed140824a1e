//! Utility helpers for tests.
//!
//! Pose fixtures, scripted pose sources, simulation drivers and observer
//! capture shared by the integration tests of `neon_runner`.

pub mod observers;
pub mod poses;
pub mod world;

pub use observers::{install_outcome_observer, CapturedOutcomes};
pub use poses::{head_at, replay_lines, shoulders_at, ScriptedSource};
pub use world::{seeded, step_n, step_until};

/// Assert that two floats agree within `tolerance`.
///
/// # Panics
/// Panics with both values when they differ by more than `tolerance`.
pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
