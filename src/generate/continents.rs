//! Continent generation
//!
//! Continents are grown from random seed tiles, merged where they touch,
//! patched over small enclosed holes and trimmed of thin spurs. Everything
//! left over becomes ocean floor, with a shallow shelf along the coasts.

use std::collections::VecDeque;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::cluster::{Cluster, ContinentId};
use crate::config::ContinentParams;
use crate::error::{WorldGenError, WorldResult};
use crate::hex::{DirectionMap, HexCoordinate};
use crate::tiles::TileSet;
use crate::world::WorldBuilder;

#[derive(Clone, Debug)]
pub struct ContinentGenerator {
    params: ContinentParams,
    /// Unassigned regions smaller than this get absorbed by the continent around them.
    hole_limit: usize,
}

impl ContinentGenerator {
    pub fn new(params: ContinentParams, hole_limit: usize) -> Self {
        Self { params, hole_limit }
    }

    pub fn generate(&self, world: &mut WorldBuilder, rng: &mut ChaCha8Rng) -> WorldResult<()> {
        let seeded = self.grow_continents(world, rng)?;
        self.recluster(world)?;
        let filled = self.fill_holes(world)?;
        let eroded = self.smooth_coastlines(world)?;
        let dropped = world.remove_empty_continents();
        self.shape_ocean_floor(world);

        tracing::debug!(
            seeded,
            continents = world.continent_count(),
            land_tiles = world.assigned_tiles().len(),
            filled,
            eroded,
            dropped,
            "continents generated"
        );
        Ok(())
    }

    // ===== GROWTH =====

    /// Seed and grow continents. Returns how many were seeded.
    fn grow_continents(&self, world: &mut WorldBuilder, rng: &mut ChaCha8Rng) -> WorldResult<usize> {
        let mut available = world.unassigned_tiles();
        let target_count = rng.gen_range(self.params.count.clone());
        let min_size = *self.params.size.start();
        let mut seeded = 0;

        while seeded < target_count && available.len() >= min_size {
            let target_size = rng.gen_range(self.params.size.clone());
            let Some(seed) = available.random_tile(rng) else {
                break;
            };
            let id = world.create_continent();
            seeded += 1;

            // Frontier of the continent, restricted to unassigned tiles
            let mut candidates = TileSet::new();
            claim(world, &mut available, &mut candidates, id, seed)?;
            let mut size = 1;

            while size < target_size {
                let Some(next) = candidates.random_tile(rng) else {
                    break;
                };
                claim(world, &mut available, &mut candidates, id, next)?;
                size += 1;
            }
        }

        Ok(seeded)
    }

    /// Merge continents that grew into each other and split any that are not connected.
    fn recluster(&self, world: &mut WorldBuilder) -> WorldResult<()> {
        let land = world.assigned_tiles();
        world.replace_continents(land.cluster())
    }

    // ===== CLEANUP =====

    /// Absorb small unassigned regions enclosed by a single continent.
    /// Returns how many tiles were absorbed.
    pub(crate) fn fill_holes(&self, world: &mut WorldBuilder) -> WorldResult<usize> {
        let mut filled = 0;
        for hole in world.unassigned_tiles().cluster() {
            if hole.len() >= self.hole_limit {
                continue;
            }
            let Some(id) = surrounding_continent(world, &hole) else {
                continue;
            };
            for pos in hole.iter() {
                world.add_to_continent(id, pos)?;
            }
            filled += hole.len();
        }
        Ok(filled)
    }

    /// Erode spurs from every continent until none remain. Returns tiles removed.
    pub(crate) fn smooth_coastlines(&self, world: &mut WorldBuilder) -> WorldResult<usize> {
        let mut removed = 0;
        for id in world.continent_ids() {
            removed += smooth_coastline(world, id)?;
        }
        Ok(removed)
    }

    // ===== OCEAN FLOOR =====

    fn shape_ocean_floor(&self, world: &mut WorldBuilder) {
        let ocean = world.unassigned_tiles();
        let shelf: Vec<HexCoordinate> = ocean
            .iter()
            .filter(|pos| pos.neighbors().any(|(_, n)| world.continent_of(n).is_some()))
            .collect();

        for pos in ocean.iter() {
            if let Some(tile) = world.tile_mut(pos) {
                tile.set_elevation(self.params.ocean_floor_elevation);
            }
        }
        for pos in shelf {
            if let Some(tile) = world.tile_mut(pos) {
                tile.set_elevation(self.params.coast_elevation);
            }
        }
    }
}

/// Move `pos` from the available pool into continent `id` and extend the growth frontier.
fn claim(
    world: &mut WorldBuilder,
    available: &mut TileSet,
    candidates: &mut TileSet,
    id: ContinentId,
    pos: HexCoordinate,
) -> WorldResult<()> {
    if !available.remove(pos) {
        return Err(WorldGenError::TileAlreadyPresent(pos));
    }
    candidates.remove(pos);
    world.add_to_continent(id, pos)?;
    candidates.extend(pos.neighbors().map(|(_, n)| n).filter(|&n| available.contains(n)));
    Ok(())
}

/// The one continent bordering `region` on every side, if there is one.
fn surrounding_continent(world: &WorldBuilder, region: &Cluster) -> Option<ContinentId> {
    let mut found = None;
    for pos in region.frontier(|n| world.tiles().contains(n)).iter() {
        let owner = world.continent_of(pos)?;
        match found {
            None => found = Some(owner),
            Some(existing) if existing != owner => return None,
            Some(_) => {}
        }
    }
    found
}

/// A tile erodes when it hangs onto its continent by at most one edge, or by
/// two neighbors that do not touch each other.
pub(crate) fn is_spur(neighbors: &DirectionMap<HexCoordinate>) -> bool {
    match neighbors.len() {
        0 | 1 => true,
        2 => {
            let dirs: Vec<_> = neighbors.keys().collect();
            !dirs[0].is_adjacent_to(dirs[1])
        }
        _ => false,
    }
}

/// Work-queue erosion of one continent down to a fixed point.
fn smooth_coastline(world: &mut WorldBuilder, id: ContinentId) -> WorldResult<usize> {
    let continent = world.continent(id).ok_or(WorldGenError::UnknownContinent(id))?;
    let mut queue: VecDeque<HexCoordinate> = continent.tiles().iter().collect();
    let mut removed = 0;

    while let Some(pos) = queue.pop_front() {
        let continent = world.continent(id).ok_or(WorldGenError::UnknownContinent(id))?;
        if !continent.contains(pos) {
            continue;
        }
        let neighbors = continent.cluster().adjacent_members(pos)?;
        if !is_spur(&neighbors) {
            continue;
        }
        world.remove_from_continent(id, pos)?;
        removed += 1;
        queue.extend(neighbors.values().copied());
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexDirection;
    use rand::SeedableRng;

    fn small_params() -> ContinentParams {
        ContinentParams {
            count: 3..=5,
            size: 20..=80,
            ..ContinentParams::default()
        }
    }

    fn generated(seed: u64) -> WorldBuilder {
        let mut world = WorldBuilder::new(20, seed).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        ContinentGenerator::new(small_params(), 10)
            .generate(&mut world, &mut rng)
            .unwrap();
        world
    }

    fn continent_sets(world: &WorldBuilder) -> Vec<TileSet> {
        let mut sets: Vec<TileSet> = world.continents().map(|c| c.tiles().clone()).collect();
        sets.sort();
        sets
    }

    #[test]
    fn test_deterministic_per_seed() {
        assert_eq!(continent_sets(&generated(12345)), continent_sets(&generated(12345)));
    }

    #[test]
    fn test_continents_are_disjoint_and_indexed() {
        let world = generated(777);
        assert!(world.continent_count() <= 5);
        let mut total = 0;
        for continent in world.continents() {
            assert!(!continent.is_empty());
            for pos in continent.tiles().iter() {
                assert_eq!(world.continent_of(pos), Some(continent.id()));
            }
            total += continent.len();
        }
        assert_eq!(total, world.assigned_tiles().len());
    }

    #[test]
    fn test_smoothing_leaves_no_spurs() {
        let world = generated(4242);
        for continent in world.continents() {
            for pos in continent.tiles().iter() {
                let neighbors = continent.cluster().adjacent_members(pos).unwrap();
                assert!(!is_spur(&neighbors), "spur left at {pos}");
            }
        }
    }

    #[test]
    fn test_ocean_floor_and_shelf() {
        let world = generated(31337);
        let params = ContinentParams::default();
        for tile in world.tiles().iter() {
            if world.continent_of(tile.pos()).is_some() {
                continue;
            }
            let touches_land = tile
                .pos()
                .neighbors()
                .any(|(_, n)| world.continent_of(n).is_some());
            let expected = if touches_land {
                params.coast_elevation
            } else {
                params.ocean_floor_elevation
            };
            assert_eq!(tile.elevation(), expected);
        }
    }

    #[test]
    fn test_spur_rules() {
        use HexDirection::*;
        let origin = HexCoordinate::ORIGIN;
        let map = |dirs: &[HexDirection]| -> DirectionMap<HexCoordinate> {
            dirs.iter().map(|&d| (d, origin.neighbor(d))).collect()
        };
        assert!(is_spur(&map(&[])));
        assert!(is_spur(&map(&[North])));
        assert!(is_spur(&map(&[North, South])));
        assert!(is_spur(&map(&[North, SouthEast])));
        assert!(!is_spur(&map(&[North, NorthEast])));
        assert!(!is_spur(&map(&[North, SouthEast, SouthWest])));
    }

    #[test]
    fn test_smoothing_removes_line_and_tail() {
        let mut world = WorldBuilder::new(4, 1).unwrap();
        let blob = world.create_continent();
        for pos in HexCoordinate::within_radius(1) {
            world.add_to_continent(blob, pos).unwrap();
        }
        // One-tile tail hanging off the blob
        let tail = HexCoordinate::from_axial(0, 2);
        world.add_to_continent(blob, tail).unwrap();

        let line = world.create_continent();
        for x in -1..=1 {
            world.add_to_continent(line, HexCoordinate::from_axial(x, -3)).unwrap();
        }

        let generator = ContinentGenerator::new(ContinentParams::default(), 10);
        let removed = generator.smooth_coastlines(&mut world).unwrap();
        assert_eq!(removed, 4);
        assert!(world.continent(line).unwrap().is_empty());
        assert_eq!(world.continent(blob).unwrap().len(), 7);
        assert_eq!(world.continent_of(tail), None);
        assert_eq!(world.remove_empty_continents(), 1);
    }

    #[test]
    fn test_fill_enclosed_hole() {
        let mut world = WorldBuilder::new(3, 1).unwrap();
        let id = world.create_continent();
        for pos in HexCoordinate::within_radius(3) {
            if pos != HexCoordinate::ORIGIN {
                world.add_to_continent(id, pos).unwrap();
            }
        }
        let generator = ContinentGenerator::new(ContinentParams::default(), 10);
        assert_eq!(generator.fill_holes(&mut world).unwrap(), 1);
        assert_eq!(world.continent_of(HexCoordinate::ORIGIN), Some(id));
    }

    #[test]
    fn test_hole_between_two_continents_stays_open() {
        let mut world = WorldBuilder::new(2, 1).unwrap();
        let west = world.create_continent();
        let east = world.create_continent();
        for pos in HexCoordinate::within_radius(2) {
            if pos == HexCoordinate::ORIGIN {
                continue;
            }
            let id = if pos.x() < 0 || (pos.x() == 0 && pos.y() > 0) { west } else { east };
            world.add_to_continent(id, pos).unwrap();
        }
        let generator = ContinentGenerator::new(ContinentParams::default(), 10);
        assert_eq!(generator.fill_holes(&mut world).unwrap(), 0);
        assert_eq!(world.continent_of(HexCoordinate::ORIGIN), None);
    }
}
