//! Oriented rectangle geometry for tiles
//!
//! An oriented rectangle is defined by:
//! - center: position in area coordinates
//! - half_extents: (half width, half height) before rotation
//! - rotation: counter-clockwise angle in radians (0 = axis-aligned)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rotate;

/// A rectangle rotated about its center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedRect {
    /// Center position
    pub center: Vec2,
    /// Half width and half height before rotation
    pub half_extents: Vec2,
    /// Rotation (radians, counter-clockwise)
    pub rotation: f32,
}

impl OrientedRect {
    pub fn new(center: Vec2, half_extents: Vec2, rotation: f32) -> Self {
        Self {
            center,
            half_extents,
            rotation,
        }
    }

    /// Axis-aligned rectangle (rotation = 0)
    pub fn axis_aligned(center: Vec2, half_extents: Vec2) -> Self {
        Self::new(center, half_extents, 0.0)
    }

    /// True when the rectangle carries no rotation
    #[inline]
    pub fn is_axis_aligned(&self) -> bool {
        self.rotation == 0.0
    }

    /// The same rectangle moved to another center
    #[inline]
    pub fn at(&self, center: Vec2) -> Self {
        Self { center, ..*self }
    }

    /// Local x and y axes (unit vectors) in area space
    pub fn axes(&self) -> [Vec2; 2] {
        if self.is_axis_aligned() {
            return [Vec2::X, Vec2::Y];
        }
        [rotate(Vec2::X, self.rotation), rotate(Vec2::Y, self.rotation)]
    }

    /// Half of the rectangle's extent when projected onto `axis`
    #[inline]
    pub fn projected_extent(&self, axis: Vec2) -> f32 {
        let [local_x, local_y] = self.axes();
        (self.half_extents.x * axis.dot(local_x)).abs()
            + (self.half_extents.y * axis.dot(local_y)).abs()
    }

    /// Corner points, counter-clockwise starting bottom-left
    pub fn corners(&self) -> [Vec2; 4] {
        let [local_x, local_y] = self.axes();
        let hx = local_x * self.half_extents.x;
        let hy = local_y * self.half_extents.y;
        [
            self.center - hx - hy,
            self.center + hx - hy,
            self.center + hx + hy,
            self.center - hx + hy,
        ]
    }

    /// Axis-aligned bounds `(min, max)` enclosing the rotated rectangle
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let corners = self.corners();
        let mut min = corners[0];
        let mut max = corners[0];
        for corner in &corners[1..] {
            min = min.min(*corner);
            max = max.max(*corner);
        }
        (min, max)
    }
}
