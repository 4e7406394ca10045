//! Tiles and their movement directions

use std::fmt;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::OrientedRect;
use crate::normalize_angle;

/// Stable tile identifier, unique within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Movement heading of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

/// Which headings a generator may draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DirectionSet {
    /// Up, down, left, right
    Cardinal,
    /// The four diagonals
    Diagonal,
    #[default]
    All,
}

impl Direction {
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Per-step displacement. Diagonals move one unit on each axis so every
    /// heading crosses the area in at most `max(width, height)` unit steps.
    pub fn vector(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, 1.0),
            Direction::Down => Vec2::new(0.0, -1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::NorthEast => Vec2::new(1.0, 1.0),
            Direction::NorthWest => Vec2::new(-1.0, 1.0),
            Direction::SouthEast => Vec2::new(1.0, -1.0),
            Direction::SouthWest => Vec2::new(-1.0, -1.0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
        }
    }

    /// Arrow glyph, for diagnostics only
    pub fn glyph(self) -> char {
        match self {
            Direction::Up => '↑',
            Direction::Down => '↓',
            Direction::Left => '←',
            Direction::Right => '→',
            Direction::NorthEast => '↗',
            Direction::NorthWest => '↖',
            Direction::SouthEast => '↘',
            Direction::SouthWest => '↙',
        }
    }

    pub fn is_diagonal(self) -> bool {
        Self::DIAGONAL.contains(&self)
    }

    /// Draw a heading uniformly from `set`
    pub fn random<R: Rng>(set: DirectionSet, rng: &mut R) -> Direction {
        let choices: &[Direction] = match set {
            DirectionSet::Cardinal => &Self::CARDINAL,
            DirectionSet::Diagonal => &Self::DIAGONAL,
            DirectionSet::All => &Self::ALL,
        };
        choices[rng.random_range(0..choices.len())]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// One rectangular puzzle piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    /// Center in area coordinates
    pub center: Vec2,
    /// Half width and half height before rotation
    pub half_extents: Vec2,
    /// Rotation (radians, counter-clockwise)
    #[serde(default)]
    pub rotation: f32,
    pub direction: Direction,
}

impl Tile {
    pub fn new(id: u32, center: Vec2, half_extents: Vec2, direction: Direction) -> Self {
        Self {
            id: TileId(id),
            center,
            half_extents,
            rotation: 0.0,
            direction,
        }
    }

    /// Set the rotation, wrapped to [-π, π)
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = normalize_angle(rotation);
        self
    }

    /// Collision shape at the tile's stored center
    pub fn shape(&self) -> OrientedRect {
        OrientedRect::new(self.center, self.half_extents, self.rotation)
    }

    pub fn reverse(&mut self) {
        self.direction = self.direction.opposite();
    }
}
