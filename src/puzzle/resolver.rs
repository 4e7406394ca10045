//! Obstruction resolver
//!
//! Repeatedly scans the pending tiles for ones with a clear path out of the
//! area and moves them, in pending order, to the cleared sequence. When a
//! pass clears nothing, the first pending tile has its heading reversed and
//! the scan runs again. A pass cap bounds the loop; hitting it is reported
//! as `ResolveStatus::Exhausted`, not as an error.
//!
//! Probing never touches a tile's stored center: the walk advances a scratch
//! copy of the position, so a host rendering the directory between passes
//! never sees a probe position.

use serde::{Deserialize, Serialize};

use super::area::{Area, ExitTest};
use super::collision::intersects;
use super::directory::TileDirectory;
use super::tile::{Tile, TileId};
use crate::consts::{DEFAULT_PASS_CAP, DEFAULT_STEP_LENGTH, PROBE_STEP_MARGIN};
use crate::error::{PuzzleError, PuzzleResult};

/// How tiles cleared during a pass affect the rest of that pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PassMode {
    /// A clear tile leaves pending immediately; later tiles in the same pass
    /// no longer collide with it
    #[default]
    Sweep,
    /// Every tile is tested against the pass-start pending set; clear tiles
    /// leave together when the pass ends
    Snapshot,
}

/// Resolver tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Maximum passes (clearing scans plus reversal events)
    pub pass_cap: u32,
    /// Multiplier on the direction vector for each probe step
    pub step_length: f32,
    pub exit_test: ExitTest,
    pub pass_mode: PassMode,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            pass_cap: DEFAULT_PASS_CAP,
            step_length: DEFAULT_STEP_LENGTH,
            exit_test: ExitTest::default(),
            pass_mode: PassMode::default(),
        }
    }
}

/// Where the resolver stands after its latest pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolverState {
    /// No pass run yet
    Scanning,
    /// Last pass cleared at least one tile, more are pending
    Clearing,
    /// Last pass cleared nothing and a heading was reversed
    Reversing,
    /// Every tile cleared
    Done,
    /// Pass cap reached with tiles still pending
    Exhausted,
}

impl ResolverState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ResolverState::Done | ResolverState::Exhausted)
    }
}

/// Outcome of walking one tile along its heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clearance {
    /// Left the area after `steps` steps
    Clear { steps: u32 },
    /// Hit another pending tile (`by`), or ran out of steps (`by == None`)
    Blocked { by: Option<TileId>, steps: u32 },
}

impl Clearance {
    pub fn is_clear(&self) -> bool {
        matches!(self, Clearance::Clear { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveStatus {
    Done,
    Exhausted,
}

/// Result of a resolution run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub status: ResolveStatus,
    /// Safe exit order
    pub cleared: Vec<TileId>,
    /// Tiles still blocked (empty when `Done`)
    pub remaining: Vec<TileId>,
    pub reversals: u32,
    pub passes: u32,
}

impl Resolution {
    pub fn is_done(&self) -> bool {
        self.status == ResolveStatus::Done
    }
}

/// Owns a tile directory for the duration of a resolution run
#[derive(Debug, Clone)]
pub struct Resolver {
    directory: TileDirectory,
    area: Area,
    config: ResolverConfig,
    state: ResolverState,
    passes: u32,
    reversals: u32,
}

impl Resolver {
    /// Validate the configuration and every pending tile up front: each must
    /// start inside the area and be thicker than one step
    pub fn new(directory: TileDirectory, area: Area, config: ResolverConfig) -> PuzzleResult<Self> {
        if config.pass_cap == 0 {
            return Err(PuzzleError::InvalidConfig("pass_cap must be at least 1".into()));
        }
        for tile in directory.pending() {
            let step = tile.direction.vector() * config.step_length;
            if !step.is_finite() || step.length_squared() == 0.0 {
                return Err(PuzzleError::DegenerateDirection { id: tile.id });
            }
        }
        if config.step_length.is_nan() || config.step_length <= 0.0 {
            return Err(PuzzleError::InvalidConfig(format!(
                "step_length must be positive, got {}",
                config.step_length
            )));
        }
        for tile in directory.pending() {
            if !area.contains(&tile.shape()) {
                return Err(PuzzleError::OutsideArea { id: tile.id });
            }
        }
        // A step longer than the thinnest tile could hop over it
        let thinnest = directory
            .pending()
            .iter()
            .map(|t| 2.0 * t.half_extents.min_element())
            .fold(f32::INFINITY, f32::min);
        if config.step_length > thinnest {
            return Err(PuzzleError::InvalidConfig(format!(
                "step_length {} exceeds the thinnest tile side {}",
                config.step_length, thinnest
            )));
        }
        Ok(Self {
            directory,
            area,
            config,
            state: ResolverState::Scanning,
            passes: 0,
            reversals: 0,
        })
    }

    pub fn from_tiles(
        tiles: impl IntoIterator<Item = Tile>,
        area: Area,
        config: ResolverConfig,
    ) -> PuzzleResult<Self> {
        Self::new(TileDirectory::from_tiles(tiles)?, area, config)
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    pub fn directory(&self) -> &TileDirectory {
        &self.directory
    }

    pub fn into_directory(self) -> TileDirectory {
        self.directory
    }

    pub fn area(&self) -> &Area {
        &self.area
    }

    /// Walk bound: crossing the area takes at most `span / step` steps
    fn max_steps(&self) -> u32 {
        (self.area.span() / self.config.step_length).ceil() as u32 + PROBE_STEP_MARGIN
    }

    /// Test a pending tile's clearance against the other pending tiles
    pub fn probe(&self, id: TileId) -> PuzzleResult<Clearance> {
        let tile = self
            .directory
            .pending()
            .iter()
            .find(|t| t.id == id)
            .ok_or(PuzzleError::NotFound { id })?;
        Ok(self.walk(tile, self.directory.pending()))
    }

    fn walk(&self, tile: &Tile, obstacles: &[Tile]) -> Clearance {
        let step = tile.direction.vector() * self.config.step_length;
        let shape = tile.shape();
        let max_steps = self.max_steps();

        let mut center = tile.center;
        for steps in 1..=max_steps {
            center += step;
            let moved = shape.at(center);

            if self.area.has_exited(&moved, self.config.exit_test) {
                return Clearance::Clear { steps };
            }

            if let Some(other) = obstacles
                .iter()
                .find(|o| o.id != tile.id && intersects(&moved, &o.shape()))
            {
                log::trace!(
                    "Tile {} {} blocked by {} after {} steps at {}",
                    tile.id,
                    tile.direction,
                    other.id,
                    steps,
                    center
                );
                return Clearance::Blocked {
                    by: Some(other.id),
                    steps,
                };
            }
        }

        log::warn!("Tile {} exceeded its {} step walk bound", tile.id, max_steps);
        Clearance::Blocked {
            by: None,
            steps: max_steps,
        }
    }

    /// Run a single pass and return the state it leaves the resolver in
    pub fn step(&mut self) -> PuzzleResult<ResolverState> {
        if self.state.is_terminal() {
            return Ok(self.state);
        }
        if self.directory.is_resolved() {
            self.state = ResolverState::Done;
            return Ok(self.state);
        }
        if self.passes >= self.config.pass_cap {
            let remaining: Vec<_> = self.directory.pending().iter().map(|t| t.id).collect();
            log::warn!(
                "Resolver exhausted after {} passes, {} tiles still blocked: {:?}",
                self.passes,
                remaining.len(),
                remaining
            );
            self.state = ResolverState::Exhausted;
            return Ok(self.state);
        }

        self.passes += 1;
        let cleared = self.clear_pass()?;

        if !cleared.is_empty() {
            log::debug!("Pass {}: cleared {:?}", self.passes, cleared);
            self.state = if self.directory.is_resolved() {
                log::info!(
                    "Resolved {} tiles in {} passes with {} reversals",
                    self.directory.cleared().len(),
                    self.passes,
                    self.reversals
                );
                ResolverState::Done
            } else {
                ResolverState::Clearing
            };
            return Ok(self.state);
        }

        // Deadlock: force the first pending tile to change heading
        let id = self.directory.pending()[0].id;
        let heading = self.directory.reverse_direction(id)?;
        self.reversals += 1;
        log::debug!("Pass {}: nothing clear, reversed {} to {}", self.passes, id, heading);
        self.state = ResolverState::Reversing;
        Ok(self.state)
    }

    /// Move every tile found clear this pass into the cleared sequence
    fn clear_pass(&mut self) -> PuzzleResult<Vec<TileId>> {
        let mut cleared = Vec::new();
        match self.config.pass_mode {
            PassMode::Sweep => {
                let mut index = 0;
                while index < self.directory.pending().len() {
                    let pending = self.directory.pending();
                    let tile = &pending[index];
                    if self.walk(tile, pending).is_clear() {
                        let id = tile.id;
                        self.directory.mark_cleared(id)?;
                        cleared.push(id);
                    } else {
                        index += 1;
                    }
                }
            }
            PassMode::Snapshot => {
                let pending = self.directory.pending();
                cleared.extend(
                    pending
                        .iter()
                        .filter(|tile| self.walk(tile, pending).is_clear())
                        .map(|tile| tile.id),
                );
                for id in &cleared {
                    self.directory.mark_cleared(*id)?;
                }
            }
        }
        Ok(cleared)
    }

    /// Step until `Done` or `Exhausted`
    pub fn resolve(&mut self) -> PuzzleResult<Resolution> {
        while !self.step()?.is_terminal() {}
        Ok(self.resolution())
    }

    /// Snapshot of the run so far
    pub fn resolution(&self) -> Resolution {
        Resolution {
            status: if self.directory.is_resolved() {
                ResolveStatus::Done
            } else {
                ResolveStatus::Exhausted
            },
            cleared: self.directory.cleared().iter().map(|t| t.id).collect(),
            remaining: self.directory.pending().iter().map(|t| t.id).collect(),
            reversals: self.reversals,
            passes: self.passes,
        }
    }
}
