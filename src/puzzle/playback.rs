//! Exit playback
//!
//! Animates a resolved exit order one tile at a time. Each advance moves the
//! current tile by `speed` along its heading; once its center is outside the
//! area the next cleared tile starts moving.

use glam::Vec2;

use super::area::Area;
use super::resolver::Resolver;
use super::tile::{Tile, TileId};
use crate::consts::PLAYBACK_SPEED;
use crate::error::{PuzzleError, PuzzleResult};

/// What a single advance did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent {
    Moved { id: TileId, center: Vec2 },
    Exited { id: TileId },
    Finished,
}

#[derive(Debug, Clone)]
pub struct ExitPlayback {
    tiles: Vec<Tile>,
    current: usize,
    area: Area,
    speed: f32,
}

impl ExitPlayback {
    /// Play `cleared` back in order
    pub fn new(cleared: Vec<Tile>, area: Area, speed: f32) -> PuzzleResult<Self> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(PuzzleError::InvalidConfig(format!(
                "playback speed must be positive, got {speed}"
            )));
        }
        Ok(Self {
            tiles: cleared,
            current: 0,
            area,
            speed,
        })
    }

    /// Play back whatever the resolver has cleared so far at the default speed
    pub fn from_resolver(resolver: &Resolver) -> PuzzleResult<Self> {
        Self::new(
            resolver.directory().cleared().to_vec(),
            *resolver.area(),
            PLAYBACK_SPEED,
        )
    }

    /// Tile currently moving out
    pub fn current(&self) -> Option<&Tile> {
        self.tiles.get(self.current)
    }

    /// Tiles that have not exited yet, current one first
    pub fn remaining(&self) -> &[Tile] {
        &self.tiles[self.current..]
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.tiles.len()
    }

    pub fn advance(&mut self) -> PlaybackEvent {
        let Some(tile) = self.tiles.get_mut(self.current) else {
            return PlaybackEvent::Finished;
        };
        tile.center += tile.direction.vector() * self.speed;

        if self.area.is_outside(tile.center) {
            let id = tile.id;
            self.current += 1;
            log::debug!("Tile {} left the area", id);
            PlaybackEvent::Exited { id }
        } else {
            PlaybackEvent::Moved {
                id: tile.id,
                center: tile.center,
            }
        }
    }
}

impl Iterator for ExitPlayback {
    type Item = PlaybackEvent;

    /// Every event up to, but not including, `Finished`
    fn next(&mut self) -> Option<PlaybackEvent> {
        match self.advance() {
            PlaybackEvent::Finished => None,
            event => Some(event),
        }
    }
}
