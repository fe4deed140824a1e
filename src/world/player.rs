//! The runner's body: vertical motion, duck state and hitbox.

use super::{Aabb, Rgb};
use crate::{GROUND_Y, PLAYER_DUCK_HEIGHT, PLAYER_HEIGHT, PLAYER_WIDTH, PLAYER_X};

/// Vertical state of the player. The horizontal position is fixed at
/// [`PLAYER_X`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    /// Offset from the floor; 0 when grounded, negative while airborne.
    pub y: f32,
    /// Vertical velocity; negative is upwards.
    pub vy: f32,
    /// Airborne after a jump until landing.
    pub is_jumping: bool,
    /// Mirrors the current DUCK action.
    pub is_ducking: bool,
    /// Hitbox width.
    pub width: f32,
    /// Hitbox height, [`PLAYER_HEIGHT`] or [`PLAYER_DUCK_HEIGHT`].
    pub height: f32,
    /// Body colour.
    pub colour: Rgb,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            y: 0.0,
            vy: 0.0,
            is_jumping: false,
            is_ducking: false,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            colour: Rgb::NEON_CYAN,
        }
    }
}

impl PlayerState {
    /// Whether a jump may start this frame.
    #[must_use]
    pub const fn can_jump(&self) -> bool {
        !self.is_jumping && !self.is_ducking
    }

    /// Launches a jump with the given (negative) impulse.
    pub fn launch(&mut self, impulse: f32) {
        self.vy = impulse;
        self.is_jumping = true;
    }

    /// Applies the level-triggered duck state and the matching height.
    ///
    /// Returns `true` when the player starts ducking on this call.
    pub fn set_ducking(&mut self, ducking: bool) -> bool {
        let started = ducking && !self.is_ducking;
        self.is_ducking = ducking;
        self.height = if ducking {
            PLAYER_DUCK_HEIGHT
        } else {
            PLAYER_HEIGHT
        };
        started
    }

    /// Integrates one frame of airborne motion.
    ///
    /// Returns `true` on the frame the player lands.
    pub fn integrate(&mut self, gravity: f32) -> bool {
        if !self.is_jumping {
            return false;
        }
        self.y += self.vy;
        self.vy += gravity;
        if self.y >= 0.0 {
            self.y = 0.0;
            self.vy = 0.0;
            self.is_jumping = false;
            return true;
        }
        false
    }

    /// Hitbox in canvas coordinates.
    #[must_use]
    pub fn rect(&self) -> Aabb {
        Aabb::new(
            PLAYER_X,
            GROUND_Y + self.y - self.height,
            self.width,
            self.height,
        )
    }
}
