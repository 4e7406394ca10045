//! The bounded movement area tiles must exit

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::OrientedRect;
use crate::error::{PuzzleError, PuzzleResult};

/// When a stepped tile counts as having left the area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExitTest {
    /// The tile's center lies outside the area
    Center,
    /// Any corner of the tile lies outside the area (its leading edge crossed)
    #[default]
    LeadingEdge,
}

/// Rectangle of `width` x `height` centered at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub width: f32,
    pub height: f32,
}

impl Area {
    pub fn new(width: f32, height: f32) -> PuzzleResult<Self> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(PuzzleError::InvalidConfig(format!(
                "area must have positive finite size, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height) / 2.0
    }

    /// Larger of the two sides
    #[inline]
    pub fn span(&self) -> f32 {
        self.width.max(self.height)
    }

    /// Strictly outside: a point on the boundary is still inside
    #[inline]
    pub fn is_outside(&self, point: Vec2) -> bool {
        let half = self.half_size();
        point.x < -half.x || point.x > half.x || point.y < -half.y || point.y > half.y
    }

    /// Whether `shape` has left the area under `test`
    pub fn has_exited(&self, shape: &OrientedRect, test: ExitTest) -> bool {
        match test {
            ExitTest::Center => self.is_outside(shape.center),
            ExitTest::LeadingEdge => shape.corners().iter().any(|c| self.is_outside(*c)),
        }
    }

    /// Whether `shape` lies fully inside the area (boundary inclusive)
    pub fn contains(&self, shape: &OrientedRect) -> bool {
        shape.corners().iter().all(|c| !self.is_outside(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_rejects_degenerate_size() {
        assert!(Area::new(0.0, 10.0).is_err());
        assert!(Area::new(10.0, f32::NAN).is_err());
        assert!(Area::new(400.0, 300.0).is_ok());
    }

    #[test]
    fn test_boundary_point_is_inside() {
        let area = Area::new(100.0, 100.0).unwrap();
        assert!(!area.is_outside(Vec2::new(50.0, -50.0)));
        assert!(area.is_outside(Vec2::new(50.01, 0.0)));
    }

    #[test]
    fn test_exit_tests_differ() {
        let area = Area::new(100.0, 100.0).unwrap();
        // Center inside, right edge past the boundary
        let shape = OrientedRect::axis_aligned(Vec2::new(45.0, 0.0), Vec2::splat(10.0));
        assert!(!area.has_exited(&shape, ExitTest::Center));
        assert!(area.has_exited(&shape, ExitTest::LeadingEdge));
        assert!(!area.contains(&shape));
    }
}
