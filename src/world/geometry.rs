//! Axis-aligned rectangles for hitboxes and draw commands.
use glam::Vec2;

/// Axis-aligned box described by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner.
    pub min: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Aabb {
    /// Creates a box from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Centre point.
    #[must_use]
    pub fn centre(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap test; boxes that merely touch do not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use neon_runner::world::Aabb;
    /// let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
    /// assert!(a.overlaps(&Aabb::new(5.0, 5.0, 10.0, 10.0)));
    /// assert!(!a.overlaps(&Aabb::new(10.0, 0.0, 10.0, 10.0)));
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}
