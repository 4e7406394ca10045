//! Greedy grid packer
//!
//! Places variable-size entities on a fixed cell grid. Entities are shuffled,
//! then each takes the valid top-left cell with the lowest priority score
//! (distance to grid center plus a random jitter, and optionally a density
//! term). There is no backtracking: the first entity without a valid cell
//! fails the pack. A best-effort backfill then plugs holes inside the bounding
//! box of everything placed.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{PuzzleError, PuzzleResult};

/// Axes an entity is allowed to move along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveAxis {
    X,
    Y,
    XY,
}

/// A kind of entity (e.g. a vehicle size class)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityKind {
    pub id: String,
    /// Width in cells
    pub width: u32,
    /// Height in cells
    pub height: u32,
    pub axis: MoveAxis,
    /// Number of entities of this kind to place
    pub count: u32,
}

impl EntityKind {
    pub fn new(id: &str, width: u32, height: u32, axis: MoveAxis, count: u32) -> Self {
        Self {
            id: id.to_string(),
            width,
            height,
            axis,
            count,
        }
    }

    /// The default vehicle catalog
    pub fn default_catalog() -> Vec<EntityKind> {
        vec![
            EntityKind::new("large-x", 3, 2, MoveAxis::X, 3),
            EntityKind::new("large-y", 2, 3, MoveAxis::Y, 3),
            EntityKind::new("medium", 2, 2, MoveAxis::XY, 4),
            EntityKind::new("small-x", 2, 1, MoveAxis::X, 3),
            EntityKind::new("small-y", 1, 2, MoveAxis::Y, 3),
        ]
    }

    /// Expand every kind into `count` unplaced entities
    pub fn instantiate_all(kinds: &[EntityKind]) -> Vec<Entity> {
        kinds
            .iter()
            .flat_map(|kind| (0..kind.count).map(move |_| Entity::new(kind)))
            .collect()
    }
}

/// A placed (or yet to be placed) grid footprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: String,
    pub width: u32,
    pub height: u32,
    pub axis: MoveAxis,
    /// Top-left cell column
    pub x: u32,
    /// Top-left cell row
    pub y: u32,
    /// 1-based placement order, 0 while unplaced
    pub place_index: u32,
}

impl Entity {
    pub fn new(kind: &EntityKind) -> Self {
        Self {
            kind: kind.id.clone(),
            width: kind.width,
            height: kind.height,
            axis: kind.axis,
            x: 0,
            y: 0,
            place_index: 0,
        }
    }

    pub fn is_placed(&self) -> bool {
        self.place_index > 0
    }

    /// Whether two placed footprints share a cell
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Optional third term of the placement score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DensityTerm {
    /// Term is always zero
    #[default]
    Disabled,
    /// Free in-grid cells bordering the footprint (fewer = snugger)
    FreeNeighbours,
}

/// Packer tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackerConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    pub distance_weight: f32,
    pub random_weight: f32,
    pub density_weight: f32,
    pub density: DensityTerm,
    /// Largest free run probed when backfilling
    pub filler_max_width: u32,
    pub filler_max_height: u32,
    pub backfill: bool,
    /// Entities to place; also the filler catalog
    pub kinds: Vec<EntityKind>,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            distance_weight: DISTANCE_WEIGHT,
            random_weight: RANDOM_WEIGHT,
            density_weight: DENSITY_WEIGHT,
            density: DensityTerm::Disabled,
            filler_max_width: FILLER_MAX_WIDTH,
            filler_max_height: FILLER_MAX_HEIGHT,
            backfill: true,
            kinds: EntityKind::default_catalog(),
        }
    }
}

/// Cell occupancy, row-major; each cell holds the index of its entity
#[derive(Debug, Clone)]
pub struct CellMap {
    width: u32,
    height: u32,
    cells: Vec<Option<usize>>,
}

impl CellMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Index into the placed list of the entity covering (x, y)
    pub fn get(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[self.index(x, y)]
    }

    pub fn is_free(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.get(x, y).is_none()
    }

    /// Whether a `width` x `height` footprint at (x, y) is non-empty, in
    /// bounds and free
    pub fn fits(&self, x: u32, y: u32, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        if width > self.width.saturating_sub(x) || height > self.height.saturating_sub(y) {
            return false;
        }
        (y..y + height).all(|row| (x..x + width).all(|col| self.get(col, row).is_none()))
    }

    fn fill(&mut self, x: u32, y: u32, width: u32, height: u32, index: usize) {
        for row in y..y + height {
            for col in x..x + width {
                let cell = self.index(col, row);
                self.cells[cell] = Some(index);
            }
        }
    }

    /// Count of free in-grid cells touching the footprint's outline
    fn free_neighbours(&self, x: u32, y: u32, width: u32, height: u32) -> u32 {
        let (x, y) = (x as i64, y as i64);
        let (w, h) = (width as i64, height as i64);
        let mut count = 0;
        let mut check = |cx: i64, cy: i64| {
            if cx >= 0 && cy >= 0 && self.is_free(cx as u32, cy as u32) {
                count += 1;
            }
        };
        for col in x..x + w {
            check(col, y - 1);
            check(col, y + h);
        }
        for row in y..y + h {
            check(x - 1, row);
            check(x + w, row);
        }
        count
    }
}

/// Outcome of a pack
#[derive(Debug, Clone)]
pub struct PackResult {
    /// Placed entities in placement order (including backfill)
    pub placed: Vec<Entity>,
    pub success: bool,
    /// Kind of the first entity that found no position
    pub unplaced: Option<String>,
    /// How many entities the backfill pass added
    pub fillers: usize,
    pub cells: CellMap,
}

impl PackResult {
    /// Turn a failed pack into `PackingInfeasible`
    pub fn require_complete(self) -> PuzzleResult<Vec<Entity>> {
        if self.success {
            return Ok(self.placed);
        }
        Err(PuzzleError::PackingInfeasible {
            kind: self.unplaced.unwrap_or_default(),
            placed: self.placed.len(),
        })
    }
}

/// A scored candidate position
#[derive(Debug, Clone, Copy)]
struct Candidate {
    x: u32,
    y: u32,
    priority: f32,
}

#[derive(Debug, Clone)]
pub struct GridPacker {
    config: PackerConfig,
    cells: CellMap,
    placed: Vec<Entity>,
}

impl GridPacker {
    pub fn new(config: PackerConfig) -> PuzzleResult<Self> {
        if config.grid_width == 0 || config.grid_height == 0 {
            return Err(PuzzleError::InvalidConfig(format!(
                "grid must have at least one cell, got {}x{}",
                config.grid_width, config.grid_height
            )));
        }
        let cell_count = config.grid_width as usize * config.grid_height as usize;
        if cell_count > MAX_GRID_CELLS {
            return Err(PuzzleError::InvalidConfig(format!(
                "{}x{} grid exceeds {} cells",
                config.grid_width, config.grid_height, MAX_GRID_CELLS
            )));
        }
        for kind in &config.kinds {
            if kind.width == 0 || kind.height == 0 {
                return Err(PuzzleError::InvalidConfig(format!(
                    "entity kind '{}' has an empty {}x{} footprint",
                    kind.id, kind.width, kind.height
                )));
            }
            if kind.width > config.grid_width || kind.height > config.grid_height {
                return Err(PuzzleError::InvalidConfig(format!(
                    "entity kind '{}' ({}x{}) does not fit a {}x{} grid",
                    kind.id, kind.width, kind.height, config.grid_width, config.grid_height
                )));
            }
        }
        let cells = CellMap::new(config.grid_width, config.grid_height);
        Ok(Self {
            config,
            cells,
            placed: Vec::new(),
        })
    }

    pub fn config(&self) -> &PackerConfig {
        &self.config
    }

    /// Pack the configured catalog
    pub fn pack_catalog<R: Rng>(&mut self, rng: &mut R) -> PackResult {
        let entities = EntityKind::instantiate_all(&self.config.kinds);
        self.pack(entities, rng)
    }

    /// Place every entity, then backfill. Resets any previous pack.
    pub fn pack<R: Rng>(&mut self, mut entities: Vec<Entity>, rng: &mut R) -> PackResult {
        self.reset();
        entities.shuffle(rng);

        for entity in entities {
            let Some(best) = self.best_position(&entity, rng) else {
                log::info!(
                    "No position for '{}' ({}x{}) after {} placements",
                    entity.kind,
                    entity.width,
                    entity.height,
                    self.placed.len()
                );
                return self.finish(false, Some(entity.kind), 0);
            };
            self.place(entity, best.x, best.y);
        }

        let fillers = if self.config.backfill {
            self.backfill(rng)
        } else {
            0
        };
        log::info!(
            "Packed {} entities ({} fillers) on a {}x{} grid",
            self.placed.len(),
            fillers,
            self.cells.width,
            self.cells.height
        );
        self.finish(true, None, fillers)
    }

    fn reset(&mut self) {
        self.cells = CellMap::new(self.config.grid_width, self.config.grid_height);
        self.placed.clear();
    }

    fn finish(&mut self, success: bool, unplaced: Option<String>, fillers: usize) -> PackResult {
        PackResult {
            placed: std::mem::take(&mut self.placed),
            success,
            unplaced,
            fillers,
            cells: self.cells.clone(),
        }
    }

    /// Lowest-scoring valid top-left cell, scanning row-major
    fn best_position<R: Rng>(&self, entity: &Entity, rng: &mut R) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for y in 0..self.cells.height {
            for x in 0..self.cells.width {
                if !self.cells.fits(x, y, entity.width, entity.height) {
                    continue;
                }
                let candidate = Candidate {
                    x,
                    y,
                    priority: self.priority(entity, x, y, rng),
                };
                if best.is_none_or(|b| candidate.priority < b.priority) {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    /// Placement score, lower is better
    fn priority<R: Rng>(&self, entity: &Entity, x: u32, y: u32, rng: &mut R) -> f32 {
        let density = match self.config.density {
            DensityTerm::Disabled => 0.0,
            DensityTerm::FreeNeighbours => {
                self.cells
                    .free_neighbours(x, y, entity.width, entity.height) as f32
            }
        };
        let center_x = self.cells.width as f32 / 2.0;
        let center_y = self.cells.height as f32 / 2.0;
        let distance = (x as f32 - center_x).abs() + (y as f32 - center_y).abs();
        let jitter: f32 = rng.random();

        density * self.config.density_weight
            + distance * self.config.distance_weight
            + jitter * self.config.random_weight
    }

    fn place(&mut self, mut entity: Entity, x: u32, y: u32) {
        let index = self.placed.len();
        self.cells.fill(x, y, entity.width, entity.height, index);
        entity.x = x;
        entity.y = y;
        entity.place_index = index as u32 + 1;
        log::debug!(
            "Placed '{}' #{} at ({}, {})",
            entity.kind,
            entity.place_index,
            x,
            y
        );
        self.placed.push(entity);
    }

    /// Plug holes inside the placed bounding box with catalog entities
    fn backfill<R: Rng>(&mut self, rng: &mut R) -> usize {
        let max_x = self.placed.iter().map(|e| e.x + e.width).max().unwrap_or(0);
        let max_y = self.placed.iter().map(|e| e.y + e.height).max().unwrap_or(0);

        let mut fillers = 0;
        for y in 0..max_y {
            for x in 0..max_x {
                if !self.cells.is_free(x, y) {
                    continue;
                }
                let (run_w, run_h) = self.free_run(x, y);
                let fitting: Vec<&EntityKind> = self
                    .config
                    .kinds
                    .iter()
                    .filter(|k| k.width <= run_w && k.height <= run_h)
                    .collect();
                if fitting.is_empty() {
                    continue;
                }
                let kind = fitting[rng.random_range(0..fitting.len())];
                let entity = Entity::new(kind);
                self.place(entity, x, y);
                fillers += 1;
            }
        }
        fillers
    }

    /// Largest free run from (x, y), widening column by column. Each width
    /// tries heights up to the filler cap; the first blocked height stops the
    /// scan, keeping the last rectangle that fit.
    fn free_run(&self, x: u32, y: u32) -> (u32, u32) {
        let mut best = (0, 0);
        'widths: for w in 1..=self.config.filler_max_width {
            if x + w > self.cells.width {
                break;
            }
            for h in 1..=self.config.filler_max_height {
                if y + h > self.cells.height {
                    break;
                }
                if self.cells.fits(x, y, w, h) {
                    best = (w, h);
                } else {
                    break 'widths;
                }
            }
        }
        best
    }
}
