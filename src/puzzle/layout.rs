//! Tile layout generators
//!
//! Two producers feed the resolver:
//! - `RowColumnLayout`: a centered lattice of equal, optionally rotated tiles
//! - `GridTileMapping`: converts packed grid entities into tiles

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::area::Area;
use super::packer::{CellMap, Entity, MoveAxis};
use super::tile::{Direction, DirectionSet, Tile};
use crate::consts::*;
use crate::error::{PuzzleError, PuzzleResult};

/// Lattice generator settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowColumnConfig {
    pub rows: u32,
    pub cols: u32,
    pub tile_width: f32,
    pub tile_height: f32,
    /// Gap between neighbouring tiles
    pub spacing: f32,
    /// Counter-clockwise rotation applied to every tile
    pub rotation_degrees: f32,
    pub directions: DirectionSet,
}

impl Default for RowColumnConfig {
    fn default() -> Self {
        Self {
            rows: LATTICE_ROWS,
            cols: LATTICE_COLS,
            tile_width: LATTICE_TILE_SIZE,
            tile_height: LATTICE_TILE_SIZE,
            spacing: LATTICE_SPACING,
            rotation_degrees: LATTICE_ROTATION_DEGREES,
            directions: DirectionSet::All,
        }
    }
}

impl RowColumnConfig {
    /// Distance between neighbouring tile centers
    pub fn pitch(&self) -> Vec2 {
        Vec2::new(self.tile_width + self.spacing, self.tile_height + self.spacing)
    }
}

/// Centered lattice of equal, uniformly rotated tiles
pub struct RowColumnLayout;

impl RowColumnLayout {
    /// Tiles row by row from the top-left, ids `row * cols + col + 1`
    pub fn generate<R: Rng>(config: &RowColumnConfig, rng: &mut R) -> Vec<Tile> {
        let pitch = config.pitch();
        let start = Vec2::new(
            -(config.cols.saturating_sub(1) as f32 * pitch.x) / 2.0,
            (config.rows.saturating_sub(1) as f32 * pitch.y) / 2.0,
        );
        let half_extents = Vec2::new(config.tile_width, config.tile_height) / 2.0;
        let rotation = config.rotation_degrees.to_radians();

        let mut tiles = Vec::with_capacity(config.rows as usize * config.cols as usize);
        for row in 0..config.rows {
            for col in 0..config.cols {
                let center = start + Vec2::new(col as f32 * pitch.x, -(row as f32) * pitch.y);
                let direction = Direction::random(config.directions, rng);
                tiles.push(
                    Tile::new(row * config.cols + col + 1, center, half_extents, direction)
                        .with_rotation(rotation),
                );
            }
        }
        log::debug!(
            "Generated {}x{} lattice, pitch {}, rotation {}°",
            config.rows,
            config.cols,
            pitch,
            config.rotation_degrees
        );
        tiles
    }
}

/// Converts cell-grid entities into world-space tiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridTileMapping {
    /// World units per cell
    pub cell_size: f32,
    /// Trimmed from each tile's width and height
    pub cell_gap: f32,
}

impl Default for GridTileMapping {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            cell_gap: CELL_GAP,
        }
    }
}

impl GridTileMapping {
    /// Area covering the whole grid, centered at the origin
    pub fn area(&self, cells: &CellMap) -> PuzzleResult<Area> {
        Area::new(
            cells.width() as f32 * self.cell_size,
            cells.height() as f32 * self.cell_size,
        )
    }

    /// One tile per placed entity, keyed by its placement index. Headings are
    /// drawn along the entity's movement axis.
    pub fn to_tiles<R: Rng>(
        &self,
        entities: &[Entity],
        cells: &CellMap,
        rng: &mut R,
    ) -> PuzzleResult<Vec<Tile>> {
        if self.cell_gap >= self.cell_size {
            return Err(PuzzleError::InvalidConfig(format!(
                "cell gap {} leaves no room in cell size {}",
                self.cell_gap, self.cell_size
            )));
        }
        let grid_half = Vec2::new(cells.width() as f32, cells.height() as f32) * self.cell_size / 2.0;

        Ok(entities
            .iter()
            .filter(|e| e.is_placed())
            .map(|entity| {
                let span = Vec2::new(entity.width as f32, entity.height as f32) * self.cell_size;
                let origin = Vec2::new(entity.x as f32, entity.y as f32) * self.cell_size;
                let center = origin + span / 2.0 - grid_half;
                let half_extents = (span - Vec2::splat(self.cell_gap)) / 2.0;
                Tile::new(
                    entity.place_index,
                    center,
                    half_extents,
                    axis_direction(entity.axis, rng),
                )
            })
            .collect())
    }
}

fn axis_direction<R: Rng>(axis: MoveAxis, rng: &mut R) -> Direction {
    match axis {
        MoveAxis::X => {
            if rng.random::<bool>() {
                Direction::Left
            } else {
                Direction::Right
            }
        }
        MoveAxis::Y => {
            if rng.random::<bool>() {
                Direction::Up
            } else {
                Direction::Down
            }
        }
        MoveAxis::XY => Direction::random(DirectionSet::Cardinal, rng),
    }
}
