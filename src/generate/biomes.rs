//! Biome painting: continents are split into random blotches, and each
//! blotch gets one land biome.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::biome::Biome;
use crate::cluster::{Cluster, ContinentId};
use crate::config::BiomeParams;
use crate::error::{WorldGenError, WorldResult};
use crate::tiles::TileSet;
use crate::world::WorldBuilder;

#[derive(Clone, Debug)]
pub struct BiomePainter {
    params: BiomeParams,
}

impl BiomePainter {
    pub fn new(params: BiomeParams) -> Self {
        Self { params }
    }

    pub fn generate(&self, world: &mut WorldBuilder, rng: &mut ChaCha8Rng) -> WorldResult<()> {
        let weights = WeightedIndex::new(self.params.weights.iter().map(|(_, weight)| *weight))
            .map_err(|e| WorldGenError::InvalidConfig(format!("biome weights: {e}")))?;

        let mut blotches = 0;
        for id in world.continent_ids() {
            let continent = world
                .continent(id)
                .ok_or(WorldGenError::UnknownContinent(id))?
                .cluster()
                .clone();
            for blotch in self.split_into_blotches(&continent, rng)? {
                let biome = self.params.weights[weights.sample(rng)].0;
                stamp(world, &blotch, biome);
                blotches += 1;
            }
        }

        tracing::debug!(blotches, "biomes painted");
        Ok(())
    }

    /// Partition a continent into blotches grown from spaced-out seeds.
    ///
    /// Every tile of the continent lands in exactly one blotch, even when the
    /// continent is split into pieces no seed reached.
    fn split_into_blotches(&self, continent: &Cluster, rng: &mut ChaCha8Rng) -> WorldResult<Vec<Cluster>> {
        if continent.is_empty() {
            return Ok(Vec::new());
        }
        let seed_count = (continent.len() / self.params.average_size).max(1);
        let seeds = continent.select_tiles(rng, seed_count, self.params.seed_spacing)?;

        let mut unassigned: TileSet = continent.tiles().clone();
        let mut blotches: Vec<Cluster> = Vec::with_capacity(seeds.len());
        for seed in seeds.iter() {
            unassigned.remove(seed);
            blotches.push(Cluster::from_tiles([seed].into_iter().collect()));
        }
        let mut growing: Vec<usize> = (0..blotches.len()).collect();

        while !unassigned.is_empty() {
            if growing.is_empty() {
                // A piece of the continent no blotch can reach; start one there
                let Some(seed) = unassigned.random_tile(rng) else {
                    break;
                };
                unassigned.remove(seed);
                blotches.push(Cluster::from_tiles([seed].into_iter().collect()));
                growing.push(blotches.len() - 1);
                continue;
            }

            let slot = rng.gen_range(0..growing.len());
            let blotch = &mut blotches[growing[slot]];
            let options = blotch.frontier(|pos| unassigned.contains(pos));
            match options.random_tile(rng) {
                Some(pos) => {
                    blotch.add(pos)?;
                    unassigned.remove(pos);
                }
                None => {
                    growing.swap_remove(slot);
                }
            }
        }

        Ok(blotches)
    }
}

/// Give every non-water tile of the blotch its biome.
fn stamp(world: &mut WorldBuilder, blotch: &Cluster, biome: Biome) {
    for pos in blotch.iter() {
        if let Some(tile) = world.tile_mut(pos) {
            if !tile.biome().is_water() {
                tile.set_biome(biome);
            }
        }
    }
}
