//! Generator stages
//!
//! Each stage reads and writes the shared world builder and draws randomness
//! only from the RNG it is handed. The set of stages is closed, so they are
//! dispatched through the [`Stage`] enum.

pub mod beaches;
pub mod biomes;
pub mod continents;
pub mod freshwater;
pub mod noise_field;
pub mod peaks;
pub mod water;

pub use beaches::BeachGenerator;
pub use biomes::BiomePainter;
pub use continents::ContinentGenerator;
pub use freshwater::{spread_water_downhill, FreshWaterGenerator};
pub use noise_field::{NoiseGenerator, NoiseTarget};
pub use peaks::PeakGenerator;
pub use water::WaterPainter;

use rand_chacha::ChaCha8Rng;

use crate::config::WorldConfig;
use crate::error::WorldResult;
use crate::seeds::WorldSeeds;
use crate::world::WorldBuilder;

/// One step of world generation.
#[derive(Clone, Debug)]
pub enum Stage {
    Elevation(NoiseGenerator),
    Humidity(NoiseGenerator),
    Peaks(PeakGenerator),
    Continents(ContinentGenerator),
    Water(WaterPainter),
    Biomes(BiomePainter),
    Beaches(BeachGenerator),
    FreshWater(FreshWaterGenerator),
}

impl Stage {
    /// The stages of a full world, in the order they must run.
    ///
    /// Peaks go before continents so the ocean floor flattens any peak that
    /// lands off-continent. Beaches need oceans and painted land; fresh water
    /// needs the final biomes to know which tiles drop rainfall.
    pub fn standard(config: &WorldConfig) -> Vec<Stage> {
        vec![
            Stage::Elevation(NoiseGenerator::new(
                NoiseTarget::Elevation,
                config.elevation_noise.clone(),
            )),
            Stage::Humidity(NoiseGenerator::new(
                NoiseTarget::Humidity,
                config.humidity_noise.clone(),
            )),
            Stage::Peaks(PeakGenerator::new(config.peaks.clone())),
            Stage::Continents(ContinentGenerator::new(
                config.continents.clone(),
                config.water.min_ocean_size,
            )),
            Stage::Water(WaterPainter::new(config.water.min_ocean_size)),
            Stage::Biomes(BiomePainter::new(config.biomes.clone())),
            Stage::Beaches(BeachGenerator::new(config.beaches.max_elevation)),
            Stage::FreshWater(FreshWaterGenerator::new(config.freshwater.clone())),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Elevation(_) => "elevation",
            Stage::Humidity(_) => "humidity",
            Stage::Peaks(_) => "peaks",
            Stage::Continents(_) => "continents",
            Stage::Water(_) => "water",
            Stage::Biomes(_) => "biomes",
            Stage::Beaches(_) => "beaches",
            Stage::FreshWater(_) => "freshwater",
        }
    }

    /// This stage's RNG seed.
    pub fn seed(&self, seeds: &WorldSeeds) -> u64 {
        match self {
            Stage::Elevation(_) => seeds.elevation,
            Stage::Humidity(_) => seeds.humidity,
            Stage::Peaks(_) => seeds.peaks,
            Stage::Continents(_) => seeds.continents,
            Stage::Water(_) => seeds.water,
            Stage::Biomes(_) => seeds.biomes,
            Stage::Beaches(_) => seeds.beaches,
            Stage::FreshWater(_) => seeds.freshwater,
        }
    }

    pub fn generate(&self, world: &mut WorldBuilder, rng: &mut ChaCha8Rng) -> WorldResult<()> {
        match self {
            Stage::Elevation(stage) | Stage::Humidity(stage) => stage.generate(world, rng),
            Stage::Peaks(stage) => stage.generate(world, rng),
            Stage::Continents(stage) => stage.generate(world, rng),
            Stage::Water(stage) => stage.generate(world, rng),
            Stage::Biomes(stage) => stage.generate(world, rng),
            Stage::Beaches(stage) => stage.generate(world, rng),
            Stage::FreshWater(stage) => stage.generate(world, rng),
        }
    }
}
