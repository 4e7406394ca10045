//! Tile Exit command line
//!
//! Generates a layout, resolves a safe exit order and prints it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use tile_exit::Settings;
use tile_exit::puzzle::{Area, GridPacker, Resolution, Resolver, RowColumnLayout, Tile};

#[derive(Parser)]
#[command(name = "tile-exit")]
#[command(about = "Resolve a safe exit order for a tile-exit puzzle")]
struct Args {
    #[command(subcommand)]
    layout: Layout,

    /// Random seed (overrides the settings file)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Settings file (JSON); defaults are used for anything it omits
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the resolution as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Clone, Copy)]
enum Layout {
    /// Rows x columns lattice of rotated tiles
    Grid {
        /// Width of the play area
        #[arg(long, default_value = "800.0")]
        width: f32,

        /// Height of the play area
        #[arg(long, default_value = "800.0")]
        height: f32,
    },
    /// Packed vehicle grid
    Pack,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("reading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    let mut rng = Pcg32::seed_from_u64(settings.seed);

    let (tiles, area) = match args.layout {
        Layout::Grid { width, height } => (
            RowColumnLayout::generate(&settings.row_column, &mut rng),
            Area::new(width, height)?,
        ),
        Layout::Pack => pack_layout(&settings, &mut rng)?,
    };
    log::info!("Resolving {} tiles in a {}x{} area", tiles.len(), area.width, area.height);

    let mut resolver = Resolver::from_tiles(tiles, area, settings.resolver)?;
    let resolution = resolver.resolve()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        print_resolution(&resolver, &resolution);
    }
    Ok(())
}

fn pack_layout(settings: &Settings, rng: &mut Pcg32) -> Result<(Vec<Tile>, Area)> {
    let mut packer = GridPacker::new(settings.packer.clone())?;
    let result = packer.pack_catalog(rng);
    let cells = result.cells.clone();
    let entities = result.require_complete().context("packing the vehicle catalog")?;

    let mapping = &settings.mapping;
    let tiles = mapping.to_tiles(&entities, &cells, rng)?;
    Ok((tiles, mapping.area(&cells)?))
}

fn print_resolution(resolver: &Resolver, resolution: &Resolution) {
    println!(
        "{:?} after {} passes ({} reversals)",
        resolution.status, resolution.passes, resolution.reversals
    );

    let order: Vec<String> = resolver
        .directory()
        .cleared()
        .iter()
        .map(|tile| format!("{}{}", tile.id, tile.direction.glyph()))
        .collect();
    println!("Exit order: {}", order.join(" "));

    if !resolution.is_done() {
        let blocked: Vec<String> = resolver
            .directory()
            .pending()
            .iter()
            .map(|tile| format!("{}{}", tile.id, tile.direction.glyph()))
            .collect();
        println!("Still blocked: {}", blocked.join(" "));
    }
}
