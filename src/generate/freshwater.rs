//! Fresh water: rainfall, downhill flow and lake formation.
//!
//! Rain falls on every land tile of a continent. Tiles are then visited from
//! the highest down, each passing its whole water level to its strictly
//! lower neighbors on the same continent, in proportion to how far below it
//! they sit. Water that pools past the lake threshold turns the tile into a
//! lake.

use rand_chacha::ChaCha8Rng;

use crate::biome::Biome;
use crate::cluster::ContinentId;
use crate::config::FreshWaterParams;
use crate::error::{WorldGenError, WorldResult};
use crate::hex::HexCoordinate;
use crate::tiles::{TileMap, TileSet};
use crate::world::WorldBuilder;

#[derive(Clone, Debug)]
pub struct FreshWaterGenerator {
    params: FreshWaterParams,
}

impl FreshWaterGenerator {
    pub fn new(params: FreshWaterParams) -> Self {
        Self { params }
    }

    pub fn generate(&self, world: &mut WorldBuilder, _rng: &mut ChaCha8Rng) -> WorldResult<()> {
        let mut lakes = 0;
        for id in world.continent_ids() {
            lakes += self.water_continent(world, id)?;
        }
        let ponds = classify_ponds(world);
        tracing::debug!(lakes, ponds, "fresh water settled");
        Ok(())
    }

    /// Rain on one continent and let it flow. Returns how many lakes formed.
    fn water_continent(&self, world: &mut WorldBuilder, id: ContinentId) -> WorldResult<usize> {
        let continent = world
            .continent(id)
            .ok_or(WorldGenError::UnknownContinent(id))?
            .tiles()
            .clone();
        let mut land: Vec<(i32, HexCoordinate)> = continent
            .iter()
            .filter_map(|pos| world.tile(pos))
            .filter(|tile| !tile.biome().is_water())
            .map(|tile| (tile.elevation(), tile.pos()))
            .collect();
        // Highest first; the coordinate breaks ties so the order never depends on the set
        land.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        for &(_, pos) in &land {
            if let Some(tile) = world.tile_mut(pos) {
                tile.add_water(self.params.rainfall);
            }
        }
        for &(_, pos) in &land {
            spread_water_downhill(world.tiles_mut(), &continent, pos)?;
        }

        let mut lakes = 0;
        for &(_, pos) in &land {
            if let Some(tile) = world.tile_mut(pos) {
                if tile.water_level() >= self.params.lake_threshold {
                    tile.set_biome(Biome::Lake);
                    lakes += 1;
                }
            }
        }
        Ok(lakes)
    }
}

/// Pass all water on `pos` to its strictly lower neighbors inside `within`,
/// weighted by the elevation drop to each. Returns the amount that left the tile.
///
/// A tile with no lower neighbor in `within` keeps its water.
pub fn spread_water_downhill(tiles: &mut TileMap, within: &TileSet, pos: HexCoordinate) -> WorldResult<f64> {
    let source = tiles.get(pos).ok_or(WorldGenError::NotInCollection(pos))?;
    let elevation = source.elevation();
    let water = source.water_level();

    let lower: Vec<(HexCoordinate, f64)> = tiles
        .adjacent_tiles(pos)?
        .values()
        .filter(|n| within.contains(n.pos()) && n.elevation() < elevation)
        .map(|n| (n.pos(), f64::from(elevation - n.elevation())))
        .collect();
    if lower.is_empty() || water <= 0.0 {
        return Ok(0.0);
    }

    let total_drop: f64 = lower.iter().map(|(_, drop)| drop).sum();
    for (neighbor, drop) in lower {
        if let Some(tile) = tiles.get_mut(neighbor) {
            tile.add_water(water * drop / total_drop);
        }
    }
    if let Some(tile) = tiles.get_mut(pos) {
        tile.clear_water();
    }
    Ok(water)
}

/// Unclassified tiles below sea level are ponds too small to be ocean. They become lakes.
fn classify_ponds(world: &mut WorldBuilder) -> usize {
    let mut ponds = 0;
    for tile in world.tiles_mut().iter_mut() {
        if tile.biome() == Biome::None && tile.elevation() < 0 {
            tile.set_biome(Biome::Lake);
            ponds += 1;
        }
    }
    ponds
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    /// Radius-1 world: one continent, center at `center`, ring at `ring`.
    fn bowl(center: i32, ring: i32) -> WorldBuilder {
        let mut world = WorldBuilder::new(1, 1).unwrap();
        let id = world.create_continent();
        for pos in HexCoordinate::within_radius(1) {
            world.add_to_continent(id, pos).unwrap();
            let tile = world.tile_mut(pos).unwrap();
            tile.set_biome(Biome::Plains);
            tile.set_elevation(if pos == HexCoordinate::ORIGIN { center } else { ring });
        }
        world
    }

    fn run(world: &mut WorldBuilder) {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        FreshWaterGenerator::new(FreshWaterParams::default())
            .generate(world, &mut rng)
            .unwrap();
    }

    #[test]
    fn test_hill_drains_evenly() {
        let mut world = bowl(10, 0);
        run(&mut world);

        let center = world.tile(HexCoordinate::ORIGIN).unwrap();
        assert_eq!(center.water_level(), 0.0);
        assert_eq!(center.biome(), Biome::Plains);

        let expected = 0.5 + 0.5 / 6.0;
        for (_, pos) in HexCoordinate::ORIGIN.neighbors() {
            let tile = world.tile(pos).unwrap();
            assert!((tile.water_level() - expected).abs() < 1e-9);
            assert_eq!(tile.biome(), Biome::Plains);
        }
    }

    #[test]
    fn test_pit_becomes_lake() {
        let mut world = bowl(0, 10);
        run(&mut world);
        // Each ring tile sends its 0.5 to the center
        let center = world.tile(HexCoordinate::ORIGIN).unwrap();
        assert!((center.water_level() - 3.5).abs() < 1e-9);
        assert_eq!(center.biome(), Biome::Lake);
        for (_, pos) in HexCoordinate::ORIGIN.neighbors() {
            assert_eq!(world.tile(pos).unwrap().water_level(), 0.0);
        }
    }

    #[test]
    fn test_spread_conserves_water() {
        let mut tiles = TileMap::with_radius(2).unwrap();
        for tile in tiles.iter_mut() {
            let pos = tile.pos();
            tile.set_elevation(pos.x() * 3 - pos.y() * 2 + 20);
        }
        let start = HexCoordinate::from_axial(1, -1);
        tiles.get_mut(start).unwrap().add_water(2.0);
        let before: f64 = tiles.iter().map(|t| t.water_level()).sum();

        let all = tiles.positions();
        let moved = spread_water_downhill(&mut tiles, &all, start).unwrap();
        let after: f64 = tiles.iter().map(|t| t.water_level()).sum();

        assert_eq!(moved, 2.0);
        assert_eq!(tiles.get(start).unwrap().water_level(), 0.0);
        assert!((before - after).abs() < 1e-9);
    }

    #[test]
    fn test_flat_tile_keeps_water() {
        let mut tiles = TileMap::with_radius(1).unwrap();
        tiles.get_mut(HexCoordinate::ORIGIN).unwrap().add_water(1.0);
        let all = tiles.positions();
        assert_eq!(spread_water_downhill(&mut tiles, &all, HexCoordinate::ORIGIN).unwrap(), 0.0);
        assert_eq!(tiles.get(HexCoordinate::ORIGIN).unwrap().water_level(), 1.0);
    }

    #[test]
    fn test_water_tiles_swallow_flow() {
        let mut tiles = TileMap::with_radius(1).unwrap();
        for tile in tiles.iter_mut() {
            tile.set_biome(Biome::Ocean);
            tile.set_elevation(-5);
        }
        let origin = tiles.get_mut(HexCoordinate::ORIGIN).unwrap();
        origin.set_biome(Biome::Plains);
        origin.set_elevation(3);
        origin.add_water(1.2);

        let all = tiles.positions();
        assert_eq!(spread_water_downhill(&mut tiles, &all, HexCoordinate::ORIGIN).unwrap(), 1.2);
        assert!(tiles.iter().all(|t| t.water_level() == 0.0));
    }

    #[test]
    fn test_missing_origin() {
        let mut tiles = TileMap::with_radius(1).unwrap();
        let far = HexCoordinate::from_axial(5, 0);
        assert_eq!(
            spread_water_downhill(&mut tiles, &TileSet::new(), far),
            Err(WorldGenError::NotInCollection(far))
        );
    }

    #[test]
    fn test_water_stays_on_continent() {
        // Flat seven-tile island ringed by lower ocean
        let mut world = WorldBuilder::new(2, 1).unwrap();
        for tile in world.tiles_mut().iter_mut() {
            tile.set_biome(Biome::Ocean);
            tile.set_elevation(-6);
        }
        let id = world.create_continent();
        for pos in HexCoordinate::within_radius(1) {
            world.add_to_continent(id, pos).unwrap();
            let tile = world.tile_mut(pos).unwrap();
            tile.set_biome(Biome::Plains);
            tile.set_elevation(5);
        }
        run(&mut world);

        for pos in HexCoordinate::within_radius(1) {
            let tile = world.tile(pos).unwrap();
            assert_eq!(tile.water_level(), 0.5, "at {pos}");
            assert_eq!(tile.biome(), Biome::Plains);
        }
        let island_total: f64 = HexCoordinate::within_radius(1)
            .into_iter()
            .map(|pos| world.tile(pos).unwrap().water_level())
            .sum();
        assert!((island_total - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_spread_ignores_tiles_outside_region() {
        let mut tiles = TileMap::with_radius(1).unwrap();
        tiles.get_mut(HexCoordinate::ORIGIN).unwrap().set_elevation(4);
        tiles.get_mut(HexCoordinate::ORIGIN).unwrap().add_water(1.0);
        let north = HexCoordinate::from_axial(0, 1);
        let region: TileSet = [HexCoordinate::ORIGIN, north].into_iter().collect();

        assert_eq!(spread_water_downhill(&mut tiles, &region, HexCoordinate::ORIGIN).unwrap(), 1.0);
        assert_eq!(tiles.get(north).unwrap().water_level(), 1.0);
        let outside: f64 = tiles
            .iter()
            .filter(|t| !region.contains(t.pos()))
            .map(|t| t.water_level())
            .sum();
        assert_eq!(outside, 0.0);
    }

    #[test]
    fn test_ponds_become_lakes() {
        let mut world = WorldBuilder::new(1, 1).unwrap();
        world.tile_mut(HexCoordinate::ORIGIN).unwrap().set_elevation(-2);
        run(&mut world);
        assert_eq!(world.tile(HexCoordinate::ORIGIN).unwrap().biome(), Biome::Lake);
        assert_eq!(world.tile(HexCoordinate::from_axial(0, 1)).unwrap().biome(), Biome::None);
    }
}
