//! Deterministic puzzle core
//!
//! Everything that decides the exit order lives here. This module must be
//! pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (pending insertion order)
//! - No I/O or platform dependencies

pub mod area;
pub mod collision;
pub mod directory;
pub mod layout;
pub mod packer;
pub mod playback;
pub mod rect;
pub mod resolver;
pub mod tile;

pub use area::{Area, ExitTest};
pub use collision::{aabb_overlap, intersects};
pub use directory::TileDirectory;
pub use layout::{GridTileMapping, RowColumnConfig, RowColumnLayout};
pub use packer::{
    CellMap, DensityTerm, Entity, EntityKind, GridPacker, MoveAxis, PackResult, PackerConfig,
};
pub use playback::{ExitPlayback, PlaybackEvent};
pub use rect::OrientedRect;
pub use resolver::{
    Clearance, PassMode, ResolveStatus, Resolution, Resolver, ResolverConfig, ResolverState,
};
pub use tile::{Direction, DirectionSet, Tile, TileId};
