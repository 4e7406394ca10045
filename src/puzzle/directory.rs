//! Working set of pending and cleared tiles
//!
//! A tile lives in exactly one of the two lists. Both keep insertion order,
//! which is the resolver's tie-break.

use super::tile::{Direction, Tile, TileId};
use crate::error::{PuzzleError, PuzzleResult};

#[derive(Debug, Clone, Default)]
pub struct TileDirectory {
    pending: Vec<Tile>,
    cleared: Vec<Tile>,
}

impl TileDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from tiles in order, rejecting duplicate ids
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> PuzzleResult<Self> {
        let mut directory = Self::new();
        for tile in tiles {
            directory.add(tile)?;
        }
        Ok(directory)
    }

    pub fn add(&mut self, tile: Tile) -> PuzzleResult<()> {
        if self.contains(tile.id) {
            return Err(PuzzleError::DuplicateId { id: tile.id });
        }
        self.pending.push(tile);
        Ok(())
    }

    /// Take a tile out of the pending set
    pub fn remove(&mut self, id: TileId) -> PuzzleResult<Tile> {
        let index = self.pending_index(id)?;
        Ok(self.pending.remove(index))
    }

    /// Flip a pending tile's heading, returning the new one
    pub fn reverse_direction(&mut self, id: TileId) -> PuzzleResult<Direction> {
        let index = self.pending_index(id)?;
        let tile = &mut self.pending[index];
        tile.reverse();
        Ok(tile.direction)
    }

    /// Move a pending tile to the end of the cleared sequence
    pub fn mark_cleared(&mut self, id: TileId) -> PuzzleResult<()> {
        let tile = self.remove(id)?;
        self.cleared.push(tile);
        Ok(())
    }

    pub fn pending(&self) -> &[Tile] {
        &self.pending
    }

    pub fn cleared(&self) -> &[Tile] {
        &self.cleared
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.pending
            .iter()
            .chain(self.cleared.iter())
            .find(|t| t.id == id)
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.get(id).is_some()
    }

    pub fn is_resolved(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len() + self.cleared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn pending_index(&self, id: TileId) -> PuzzleResult<usize> {
        self.pending
            .iter()
            .position(|t| t.id == id)
            .ok_or(PuzzleError::NotFound { id })
    }
}
