use std::collections::HashSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use tile_exit::Settings;
use tile_exit::puzzle::{
    Area, Direction, ExitPlayback, GridPacker, PackerConfig, PlaybackEvent, ResolveStatus,
    Resolver, ResolverConfig, ResolverState, RowColumnConfig, RowColumnLayout, Tile, TileId,
    intersects,
};

fn assert_partition(resolution_cleared: &[TileId], remaining: &[TileId], total: usize) {
    let mut seen = HashSet::new();
    for id in resolution_cleared.iter().chain(remaining) {
        assert!(seen.insert(*id), "tile {id} reported twice");
    }
    assert_eq!(seen.len(), total);
}

#[test]
fn test_facing_pair_resolves_with_one_reversal() {
    let area = Area::new(400.0, 400.0).unwrap();
    let a = Tile::new(1, Vec2::new(-50.0, 0.0), Vec2::splat(30.0), Direction::Right);
    let b = Tile::new(2, Vec2::new(50.0, 0.0), Vec2::splat(30.0), Direction::Left);
    let mut resolver = Resolver::from_tiles([a, b], area, ResolverConfig::default()).unwrap();

    // Both blocked: the first pending tile turns around
    assert_eq!(resolver.step().unwrap(), ResolverState::Reversing);
    assert_eq!(resolver.directory().pending()[0].direction, Direction::Left);

    let resolution = resolver.resolve().unwrap();
    assert_eq!(resolution.status, ResolveStatus::Done);
    assert_eq!(resolution.cleared, vec![TileId(1), TileId(2)]);
    assert_eq!(resolution.reversals, 1);
    assert_eq!(resolution.passes, 2);
    assert!(resolution.remaining.is_empty());
}

#[test]
fn test_rotated_lattice_terminates() {
    let area = Area::new(800.0, 800.0).unwrap();
    for seed in 0..8 {
        let tiles = RowColumnLayout::generate(&RowColumnConfig::default(), &mut Pcg32::seed_from_u64(seed));
        let mut resolver = Resolver::from_tiles(tiles, area, ResolverConfig::default()).unwrap();
        let resolution = resolver.resolve().unwrap();

        assert!(resolution.passes <= ResolverConfig::default().pass_cap);
        assert_partition(&resolution.cleared, &resolution.remaining, 25);
        if resolution.status == ResolveStatus::Exhausted {
            assert!(!resolution.remaining.is_empty());
        }
    }
}

#[test]
fn test_packed_layout_pipeline() {
    let settings = Settings {
        packer: PackerConfig {
            grid_width: 14,
            grid_height: 14,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut rng = Pcg32::seed_from_u64(5);
    let mut packer = GridPacker::new(settings.packer.clone()).unwrap();
    let result = packer.pack_catalog(&mut rng);
    let cells = result.cells.clone();
    let entities = result.require_complete().unwrap();

    let tiles = settings.mapping.to_tiles(&entities, &cells, &mut rng).unwrap();
    let area = settings.mapping.area(&cells).unwrap();
    assert_eq!(tiles.len(), entities.len());
    for (i, a) in tiles.iter().enumerate() {
        assert!(a.shape().is_axis_aligned());
        assert!(!a.direction.is_diagonal());
        assert!(area.contains(&a.shape()));
        for b in &tiles[i + 1..] {
            assert!(!intersects(&a.shape(), &b.shape()));
        }
    }

    let total = tiles.len();
    let mut resolver = Resolver::from_tiles(tiles, area, settings.resolver).unwrap();
    let resolution = resolver.resolve().unwrap();
    assert_partition(&resolution.cleared, &resolution.remaining, total);

    // Every cleared tile drives off the board in exit order
    let exits: Vec<TileId> = ExitPlayback::from_resolver(&resolver)
        .unwrap()
        .filter_map(|event| match event {
            PlaybackEvent::Exited { id } => Some(id),
            _ => None,
        })
        .collect();
    assert_eq!(exits, resolution.cleared);
}

#[test]
fn test_settings_drive_the_resolver() {
    let settings = Settings::from_json(
        r#"{ "seed": 3, "resolver": { "pass_cap": 1 }, "row_column": { "rows": 2, "cols": 2, "rotation_degrees": 0.0 } }"#,
    )
    .unwrap();
    let tiles = RowColumnLayout::generate(&settings.row_column, &mut Pcg32::seed_from_u64(settings.seed));
    assert_eq!(tiles.len(), 4);

    let mut resolver =
        Resolver::from_tiles(tiles, Area::new(600.0, 600.0).unwrap(), settings.resolver).unwrap();
    let resolution = resolver.resolve().unwrap();
    assert_eq!(resolution.passes, 1);
    assert_partition(&resolution.cleared, &resolution.remaining, 4);
}

#[test]
fn test_resolution_serializes() {
    let area = Area::new(200.0, 200.0).unwrap();
    let tile = Tile::new(9, Vec2::ZERO, Vec2::splat(10.0), Direction::NorthEast);
    let mut resolver = Resolver::from_tiles([tile], area, ResolverConfig::default()).unwrap();
    let resolution = resolver.resolve().unwrap();
    let json = serde_json::to_value(&resolution).unwrap();
    assert_eq!(json["status"], "Done");
    assert_eq!(json["cleared"][0], 9);
}
