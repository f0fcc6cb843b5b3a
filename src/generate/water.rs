//! Ocean painting: large connected regions below sea level become ocean.

use rand_chacha::ChaCha8Rng;

use crate::biome::Biome;
use crate::error::WorldResult;
use crate::world::WorldBuilder;

#[derive(Clone, Debug)]
pub struct WaterPainter {
    min_ocean_size: usize,
}

impl WaterPainter {
    pub fn new(min_ocean_size: usize) -> Self {
        Self { min_ocean_size }
    }

    pub fn generate(&self, world: &mut WorldBuilder, _rng: &mut ChaCha8Rng) -> WorldResult<()> {
        let below_sea = |elevation: i32| elevation < 0;
        let regions = world
            .tiles()
            .cluster_where(|tile| below_sea(tile.elevation()));

        let mut oceans = 0;
        let mut painted = 0;
        for region in regions {
            if region.len() < self.min_ocean_size {
                continue;
            }
            // Singletons fail the predicate too; only paint regions that are underwater
            let underwater = region
                .iter()
                .all(|pos| world.tile(pos).is_some_and(|t| below_sea(t.elevation())));
            if !underwater {
                continue;
            }
            for pos in region.iter() {
                if let Some(tile) = world.tile_mut(pos) {
                    tile.set_biome(Biome::Ocean);
                }
            }
            oceans += 1;
            painted += region.len();
        }

        tracing::debug!(oceans, painted, "oceans painted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexCoordinate;
    use rand::SeedableRng;

    #[test]
    fn test_only_large_regions_become_ocean() {
        let mut world = WorldBuilder::new(4, 1).unwrap();
        for tile in world.tiles_mut().iter_mut() {
            let ring = tile.pos().distance_to(HexCoordinate::ORIGIN);
            tile.set_elevation(if ring == 2 { -3 } else { 10 });
        }
        // Three-tile puddle on the rim, away from the ring
        let puddle = [
            HexCoordinate::from_axial(4, -4),
            HexCoordinate::from_axial(4, -3),
            HexCoordinate::from_axial(4, -2),
        ];
        for pos in puddle {
            world.tile_mut(pos).unwrap().set_elevation(-1);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        WaterPainter::new(10).generate(&mut world, &mut rng).unwrap();

        for tile in world.tiles().iter() {
            let ring = tile.pos().distance_to(HexCoordinate::ORIGIN);
            let expected = if ring == 2 { Biome::Ocean } else { Biome::None };
            assert_eq!(tile.biome(), expected, "at {}", tile.pos());
        }
    }

    #[test]
    fn test_dry_world_has_no_ocean() {
        let mut world = WorldBuilder::new(3, 1).unwrap();
        for tile in world.tiles_mut().iter_mut() {
            tile.set_elevation(1);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        // Every singleton fails the predicate, even with a threshold of one
        WaterPainter::new(1).generate(&mut world, &mut rng).unwrap();
        assert!(world.tiles().iter().all(|t| t.biome() == Biome::None));
    }
}
