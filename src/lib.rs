//! Tile Exit - directional tile exit puzzles
//!
//! Core modules:
//! - `puzzle`: Deterministic puzzle core (geometry, obstruction resolver, grid packer)
//! - `settings`: Data-driven tuning loaded from JSON
//! - `error`: Error kinds raised on contract violations

pub mod error;
pub mod puzzle;
pub mod settings;

pub use error::{PuzzleError, PuzzleResult};
pub use settings::Settings;

use glam::Vec2;

/// Puzzle configuration constants
pub mod consts {
    /// Maximum resolver passes before giving up on a layout
    pub const DEFAULT_PASS_CAP: u32 = 500;
    /// Distance a tile advances per probe step (world units)
    pub const DEFAULT_STEP_LENGTH: f32 = 1.0;
    /// Extra probe steps allowed beyond the area span
    pub const PROBE_STEP_MARGIN: u32 = 2;

    /// Row/column generator defaults
    pub const LATTICE_ROWS: u32 = 5;
    pub const LATTICE_COLS: u32 = 5;
    pub const LATTICE_TILE_SIZE: f32 = 60.0;
    /// Gap between lattice tiles. At 45° a 60x60 tile spans ~84.9 units, so
    /// smaller gaps overlap neighbours.
    pub const LATTICE_SPACING: f32 = 25.0;
    pub const LATTICE_ROTATION_DEGREES: f32 = 45.0;

    /// Grid packer defaults
    pub const GRID_WIDTH: u32 = 10;
    pub const GRID_HEIGHT: u32 = 10;
    pub const DISTANCE_WEIGHT: f32 = 0.3;
    pub const RANDOM_WEIGHT: f32 = 0.2;
    pub const DENSITY_WEIGHT: f32 = 0.5;
    pub const FILLER_MAX_WIDTH: u32 = 3;
    pub const FILLER_MAX_HEIGHT: u32 = 2;
    /// Largest grid the packer will allocate
    pub const MAX_GRID_CELLS: usize = 1 << 20;

    /// Cell size in world units when mapping packed entities to tiles
    pub const CELL_SIZE: f32 = 40.0;
    /// Visual gap trimmed from each packed tile
    pub const CELL_GAP: f32 = 5.0;

    /// Default exit playback speed (world units per advance)
    pub const PLAYBACK_SPEED: f32 = 100.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}

/// Rotate a vector counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_normalize_angle() {
        // 3π and -π are the same heading; either end of the range is fine
        assert!(normalize_angle(3.0 * PI).abs() > PI - 1e-5);
        assert!((normalize_angle(2.5 * PI) - FRAC_PI_2).abs() < 1e-5);
        assert!((normalize_angle(-FRAC_PI_2) + FRAC_PI_2).abs() < 1e-6);
        assert!(normalize_angle(PI) < PI);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let v = rotate(Vec2::X, FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let v = Vec2::new(3.5, -2.25);
        assert_eq!(rotate(v, 0.0), v);
    }
}
