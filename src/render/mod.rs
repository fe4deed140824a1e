//! Render pass: turns a read-only view of the world into draw commands.
//!
//! Nothing here feeds back into the simulation. Hosts rasterise the
//! [`Frame`] however they like. The commands use unshaken canvas
//! coordinates; hosts translate the whole frame by [`Frame::offset`] to show
//! screen shake.

mod hud;
mod scene;

use glam::Vec2;
use rand::Rng;

use crate::world::{Aabb, Hsla, Paint};

pub use hud::{format_score, threshold_guides, Hud, ThresholdGuides};
pub use scene::compose;

/// One primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Full-canvas vertical gradient.
    Gradient {
        /// Colour at the top edge.
        top: Hsla,
        /// Colour at the bottom edge.
        bottom: Hsla,
    },
    /// Filled rectangle.
    Rect {
        /// Extent.
        rect: Aabb,
        /// Fill.
        paint: Paint,
    },
    /// Filled circle.
    Circle {
        /// Centre.
        centre: Vec2,
        /// Radius.
        radius: f32,
        /// Fill.
        paint: Paint,
    },
    /// Stroked circle.
    Ring {
        /// Centre.
        centre: Vec2,
        /// Radius.
        radius: f32,
        /// Stroke width.
        width: f32,
        /// Stroke.
        paint: Paint,
    },
    /// Filled closed polygon.
    Polygon {
        /// Outline.
        points: Vec<Vec2>,
        /// Fill.
        paint: Paint,
    },
    /// Stroked segment.
    Line {
        /// Start.
        from: Vec2,
        /// End.
        to: Vec2,
        /// Stroke width.
        width: f32,
        /// Stroke.
        paint: Paint,
    },
    /// Filled triangle.
    Triangle {
        /// Corners.
        points: [Vec2; 3],
        /// Fill.
        paint: Paint,
    },
    /// Text anchored at its baseline start.
    Text {
        /// Anchor.
        pos: Vec2,
        /// Content.
        text: String,
        /// Font size in pixels.
        size: f32,
        /// Fill.
        paint: Paint,
    },
}

/// Draw list for one display frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Shake offset the host adds to every command when drawing.
    pub offset: Vec2,
    /// Commands in painter's order.
    pub commands: Vec<DrawCommand>,
}

/// Random jitter for the current shake strength.
///
/// Each axis lies in `[-shake/2, shake/2)`; no shake means no offset.
pub fn shake_offset<R: Rng + ?Sized>(rng: &mut R, shake_timer: u32) -> Vec2 {
    if shake_timer == 0 {
        return Vec2::ZERO;
    }
    #[expect(
        clippy::cast_precision_loss,
        reason = "Shake timers are small frame counts."
    )]
    let strength = shake_timer as f32;
    Vec2::new(
        (rng.gen::<f32>() - 0.5) * strength,
        (rng.gen::<f32>() - 0.5) * strength,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn shake_offset_is_bounded_by_timer() {
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(shake_offset(&mut rng, 0), Vec2::ZERO);
        for _ in 0..100 {
            let offset = shake_offset(&mut rng, 10);
            assert!(offset.x.abs() <= 5.0 && offset.y.abs() <= 5.0);
        }
    }
}
