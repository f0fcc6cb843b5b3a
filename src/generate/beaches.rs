//! Beaches along low-lying ocean shores.

use rand_chacha::ChaCha8Rng;

use crate::biome::Biome;
use crate::error::WorldResult;
use crate::hex::HexCoordinate;
use crate::world::WorldBuilder;

#[derive(Clone, Debug)]
pub struct BeachGenerator {
    max_elevation: i32,
}

impl BeachGenerator {
    pub fn new(max_elevation: i32) -> Self {
        Self { max_elevation }
    }

    fn can_become_beach(&self, biome: Biome, elevation: i32) -> bool {
        (biome == Biome::None || biome.is_land()) && biome != Biome::Beach && elevation <= self.max_elevation
    }

    pub fn generate(&self, world: &mut WorldBuilder, _rng: &mut ChaCha8Rng) -> WorldResult<()> {
        let tiles = world.tiles();
        let shore: Vec<HexCoordinate> = tiles
            .iter()
            .filter(|tile| self.can_become_beach(tile.biome(), tile.elevation()))
            .filter(|tile| {
                tile.pos()
                    .neighbors()
                    .any(|(_, n)| tiles.get(n).is_some_and(|t| t.biome() == Biome::Ocean))
            })
            .map(|tile| tile.pos())
            .collect();

        for &pos in &shore {
            if let Some(tile) = world.tile_mut(pos) {
                tile.set_biome(Biome::Beach);
            }
        }

        tracing::debug!(beaches = shore.len(), "beaches placed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    /// Ocean on the south half of a radius-3 world, plains rising to the north.
    fn coast() -> WorldBuilder {
        let mut world = WorldBuilder::new(3, 1).unwrap();
        for tile in world.tiles_mut().iter_mut() {
            let row = tile.pos().y();
            if row < 0 {
                tile.set_biome(Biome::Ocean);
                tile.set_elevation(-10);
            } else {
                tile.set_biome(Biome::Plains);
                tile.set_elevation(row * 4);
            }
        }
        world
    }

    #[test]
    fn test_low_shore_becomes_beach() {
        let mut world = coast();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        BeachGenerator::new(5).generate(&mut world, &mut rng).unwrap();

        // Row 0 touches the ocean at elevation 0; row 1 sits at 4 but has no ocean neighbor
        for tile in world.tiles().iter() {
            let expected = match tile.pos().y() {
                y if y < 0 => Biome::Ocean,
                0 => Biome::Beach,
                _ => Biome::Plains,
            };
            assert_eq!(tile.biome(), expected, "at {}", tile.pos());
        }
    }

    #[test]
    fn test_high_shore_stays() {
        let mut world = coast();
        for tile in world.tiles_mut().iter_mut() {
            if tile.biome() == Biome::Plains {
                tile.set_elevation(20);
            }
        }
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        BeachGenerator::new(5).generate(&mut world, &mut rng).unwrap();
        assert!(world.tiles().iter().all(|t| t.biome() != Biome::Beach));
    }

    #[test]
    fn test_idempotent() {
        let mut world = coast();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let generator = BeachGenerator::new(5);
        generator.generate(&mut world, &mut rng).unwrap();
        let once: Vec<Biome> = world.tiles().iter().map(|t| t.biome()).collect();
        generator.generate(&mut world, &mut rng).unwrap();
        let twice: Vec<Biome> = world.tiles().iter().map(|t| t.biome()).collect();
        assert_eq!(once, twice);
    }
}
