//! Fractal noise fields for elevation and humidity.
//!
//! Sampling runs in parallel with rayon. Each sample depends only on the
//! tile position and the noise seed, so thread scheduling never changes the
//! result. Remapping waits until every sample is in, because the observed
//! min and max drive the linear remap into the target range.

use ::noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::config::NoiseParams;
use crate::error::WorldResult;
use crate::range::ValueRange;
use crate::tile::{ELEVATION_RANGE, HUMIDITY_RANGE};
use crate::world::WorldBuilder;

/// Which tile attribute a noise field writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseTarget {
    Elevation,
    Humidity,
}

impl NoiseTarget {
    pub fn range(&self) -> ValueRange {
        match self {
            NoiseTarget::Elevation => ELEVATION_RANGE,
            NoiseTarget::Humidity => HUMIDITY_RANGE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct NoiseGenerator {
    target: NoiseTarget,
    params: NoiseParams,
}

impl NoiseGenerator {
    pub fn new(target: NoiseTarget, params: NoiseParams) -> Self {
        Self { target, params }
    }

    pub fn target(&self) -> NoiseTarget {
        self.target
    }

    fn build_noise(&self, seed: u32) -> Fbm<Perlin> {
        Fbm::<Perlin>::new(seed.wrapping_add(self.params.seed_offset))
            .set_frequency(self.params.frequency)
            .set_lacunarity(self.params.lacunarity)
            .set_persistence(self.params.persistence)
            .set_octaves(self.params.octaves)
    }

    pub fn generate(&self, world: &mut WorldBuilder, rng: &mut ChaCha8Rng) -> WorldResult<()> {
        let fbm = self.build_noise(rng.gen());
        // Normalize by radius so the same frequency gives the same features at any world size
        let scale = world.radius().max(1) as f64;

        let samples: Vec<f64> = world
            .tiles()
            .as_slice()
            .par_iter()
            .map(|tile| {
                let (px, py) = tile.pos().to_planar();
                fbm.get([px / scale, py / scale])
            })
            .collect();

        let Some(observed) = ValueRange::from_values(samples.iter().copied()) else {
            return Ok(());
        };
        let target = self.target.range();

        let tiles = world.tiles_mut().as_mut_slice();
        match self.target {
            NoiseTarget::Elevation => {
                tiles.par_iter_mut().zip(samples.par_iter()).for_each(|(tile, &raw)| {
                    tile.set_elevation(observed.map_to(raw, &target).round() as i32);
                });
            }
            NoiseTarget::Humidity => {
                tiles.par_iter_mut().zip(samples.par_iter()).for_each(|(tile, &raw)| {
                    tile.set_humidity(observed.map_to(raw, &target));
                });
            }
        }

        tracing::debug!(
            target_attr = ?self.target,
            raw_min = observed.min,
            raw_max = observed.max,
            "noise field written"
        );
        Ok(())
    }
}
