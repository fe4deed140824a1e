//! Gameplay and presentation constants shared across systems.
//!
//! World coordinates follow the canvas convention: `x` grows to the right,
//! `y` grows downwards, and the floor sits at [`GROUND_Y`].
use std::time::Duration;

/// Width of the logical canvas in world units.
pub const CANVAS_WIDTH: f32 = 1280.0;
/// Height of the logical canvas in world units.
pub const CANVAS_HEIGHT: f32 = 720.0;
/// Canvas row of the floor line.
pub const GROUND_Y: f32 = 550.0;

/// Downward acceleration per frame before the difficulty modifier.
pub const GRAVITY: f32 = 0.8;
/// Vertical impulse applied on jump before the difficulty modifier.
pub const JUMP_FORCE: f32 = -16.0;

/// Fixed horizontal position of the player's hitbox.
pub const PLAYER_X: f32 = 150.0;
/// Width of the player's hitbox.
pub const PLAYER_WIDTH: f32 = 50.0;
/// Standing height of the player's hitbox.
pub const PLAYER_HEIGHT: f32 = 80.0;
/// Hitbox height while ducking.
pub const PLAYER_DUCK_HEIGHT: f32 = 40.0;

/// Lower bound, in frames, of the spawn interval before the tier modifier.
pub const SPAWN_RATE_MIN: f32 = 60.0;
/// Upper bound, in frames, of the spawn interval before the tier modifier.
pub const SPAWN_RATE_MAX: f32 = 120.0;
/// Off-screen column where new entities enter.
pub const SPAWN_X: f32 = 1400.0;
/// Entities at or left of this column are discarded.
pub const DESPAWN_X: f32 = -100.0;
/// Probability that a spawn produces a power-up instead of an obstacle.
pub const POWERUP_SPAWN_CHANCE: f32 = 0.1;

/// Distance gained per unit of effective speed each frame.
pub const DISTANCE_SCALE: f32 = 0.05;
/// Speed multiplier while slow motion is active.
pub const SLOW_MO_FACTOR: f32 = 0.5;

/// Points awarded for passing an obstacle, before combo and multiplier.
pub const PASS_BASE_POINTS: u64 = 100;
/// Extra points per combo step.
pub const COMBO_BONUS_POINTS: u64 = 10;
/// Score multiplier while the multiplier power-up is active.
pub const MULTIPLIER_FACTOR: u64 = 2;

/// Lifetime of a collected power-up effect.
pub const POWERUP_DURATION: Duration = Duration::from_millis(8000);
/// Frames of screen shake after an impact.
pub const SHAKE_INTENSITY: u32 = 10;
/// Per-frame decay of particle life.
pub const PARTICLE_DECAY: f32 = 0.02;

/// Normalised head travel above the baseline that counts as a jump at
/// sensitivity 1.0.
pub const JUMP_THRESHOLD_BASE: f32 = 0.05;
/// Normalised head travel below the baseline that counts as a duck at
/// sensitivity 1.0.
pub const DUCK_THRESHOLD_BASE: f32 = 0.05;

/// Length of the calibration sampling window.
pub const CALIBRATION_COUNTDOWN: Duration = Duration::from_secs(3);
/// Normalised head height assumed before any pose has been seen.
pub const DEFAULT_LIVE_Y: f32 = 0.5;

/// Delay between the start of a session and its first simulation step.
pub const START_COUNTDOWN: Duration = Duration::from_secs(3);
/// Time the terminal animation is allowed before the outcome is reported.
pub const GAME_OVER_DELAY: Duration = Duration::from_millis(500);

/// Number of entries the leaderboard keeps.
pub const LEADERBOARD_CAPACITY: usize = 10;
