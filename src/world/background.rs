//! Procedurally generated parallax scenery.
//!
//! The background is generated once per session and only scrolls; it never
//! influences the simulation.

use glam::Vec2;
use rand::Rng;

use crate::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Horizontal period of a mountain strip; layers are drawn twice to wrap.
pub const MOUNTAIN_PERIOD: f32 = 2000.0;
/// Number of background stars.
pub const STAR_COUNT: usize = 100;

/// One mountain silhouette.
#[derive(Debug, Clone, PartialEq)]
pub struct MountainLayer {
    /// Fraction of the scroll applied to this layer.
    pub speed_modifier: f32,
    /// Ridge outline from `x = 0` to [`MOUNTAIN_PERIOD`], closed at the bottom.
    pub points: Vec<Vec2>,
}

/// A fixed star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Position.
    pub pos: Vec2,
    /// Radius.
    pub size: f32,
    /// Opacity.
    pub alpha: f32,
}

/// Stars plus three mountain layers, far to near.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Background {
    /// Mountain layers ordered far to near.
    pub layers: Vec<MountainLayer>,
    /// Static stars.
    pub stars: Vec<Star>,
}

const LAYER_SPEEDS: [f32; 3] = [0.1, 0.3, 0.6];

impl Background {
    /// Generates scenery from `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let layers = LAYER_SPEEDS
            .iter()
            .zip(0_u8..)
            .map(|(&speed_modifier, idx)| MountainLayer {
                speed_modifier,
                points: ridge(rng, f32::from(idx)),
            })
            .collect();
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(rng.gen::<f32>() * CANVAS_WIDTH, rng.gen::<f32>() * 600.0),
                size: rng.gen::<f32>() * 2.0,
                alpha: rng.gen(),
            })
            .collect();
        Self { layers, stars }
    }

    /// Horizontal scroll of `layer` after travelling `distance`.
    #[must_use]
    pub fn scroll(layer: &MountainLayer, distance: f32) -> f32 {
        (distance * 10.0 * layer.speed_modifier) % MOUNTAIN_PERIOD
    }
}

fn ridge<R: Rng + ?Sized>(rng: &mut R, depth: f32) -> Vec<Vec2> {
    let mut points = vec![Vec2::new(0.0, CANVAS_HEIGHT)];
    let mut x = 0.0;
    while x <= MOUNTAIN_PERIOD {
        let height = 100.0 + rng.gen::<f32>() * 200.0 - depth * 50.0;
        points.push(Vec2::new(x, CANVAS_HEIGHT - height));
        x += 50.0 + rng.gen::<f32>() * 100.0;
    }
    points.push(Vec2::new(MOUNTAIN_PERIOD, CANVAS_HEIGHT));
    points
}
