//! World generation parameters and configuration
//!
//! Every field has a default, and every struct deserializes with missing
//! fields filled from those defaults, so a JSON override file only needs the
//! values it changes.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::biome::Biome;
use crate::error::{WorldGenError, WorldResult};

/// Highest octave count `noise::Fbm` supports.
pub const MAX_NOISE_OCTAVES: usize = 32;

/// Top-level generation input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Rings of tiles around the origin (default: 50)
    pub radius: u32,
    /// Master seed every stage seed is derived from
    pub seed: u64,
    pub elevation_noise: NoiseParams,
    pub humidity_noise: NoiseParams,
    pub continents: ContinentParams,
    pub peaks: PeakParams,
    pub water: WaterParams,
    pub beaches: BeachParams,
    pub freshwater: FreshWaterParams,
    pub biomes: BiomeParams,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            radius: 50,
            seed: 0,
            elevation_noise: NoiseParams::elevation(),
            humidity_noise: NoiseParams::humidity(),
            continents: ContinentParams::default(),
            peaks: PeakParams::default(),
            water: WaterParams::default(),
            beaches: BeachParams::default(),
            freshwater: FreshWaterParams::default(),
            biomes: BiomeParams::default(),
        }
    }
}

impl WorldConfig {
    pub fn new(radius: u32, seed: u64) -> Self {
        Self {
            radius,
            seed,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> WorldResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| WorldGenError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration, taking the seed from
    /// `fallback` when the JSON does not set one.
    pub fn from_json_or_seed<F>(json: &str, fallback: F) -> WorldResult<Self>
    where
        F: FnOnce() -> u64,
    {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| WorldGenError::InvalidConfig(e.to_string()))?;
        let has_seed = value.get("seed").is_some();
        let mut config: Self =
            serde_json::from_value(value).map_err(|e| WorldGenError::InvalidConfig(e.to_string()))?;
        if !has_seed {
            config.seed = fallback();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> WorldResult<()> {
        self.elevation_noise.validate("elevation_noise")?;
        self.humidity_noise.validate("humidity_noise")?;
        self.continents.validate()?;
        self.peaks.validate()?;
        self.water.validate()?;
        self.freshwater.validate()?;
        self.biomes.validate()?;
        Ok(())
    }
}

fn invalid(message: String) -> WorldGenError {
    WorldGenError::InvalidConfig(message)
}

fn check_range<T: PartialOrd + std::fmt::Debug>(name: &str, range: &RangeInclusive<T>) -> WorldResult<()> {
    if range.is_empty() {
        return Err(invalid(format!("{name} range {range:?} is empty")));
    }
    Ok(())
}

// =========================================================================
// Noise
// =========================================================================

/// Fractal noise settings for one noise field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Base frequency, in cycles across the world radius
    pub frequency: f64,
    /// Frequency multiplier between octaves
    pub lacunarity: f64,
    /// Amplitude multiplier between octaves
    pub persistence: f64,
    /// Number of octaves (1-32)
    pub octaves: usize,
    /// Added to the noise seed drawn from the stage RNG
    pub seed_offset: u32,
}

impl NoiseParams {
    pub fn elevation() -> Self {
        Self {
            frequency: 3.5,
            lacunarity: 2.5,
            persistence: 0.5,
            octaves: 12,
            seed_offset: 0,
        }
    }

    pub fn humidity() -> Self {
        Self {
            frequency: 2.0,
            lacunarity: 2.0,
            persistence: 0.5,
            octaves: 8,
            seed_offset: 0,
        }
    }

    fn validate(&self, name: &str) -> WorldResult<()> {
        if self.octaves == 0 || self.octaves > MAX_NOISE_OCTAVES {
            return Err(invalid(format!(
                "{name}.octaves must be in 1..={MAX_NOISE_OCTAVES}, was {}",
                self.octaves
            )));
        }
        if self.frequency.is_nan() || self.frequency <= 0.0 {
            return Err(invalid(format!("{name}.frequency must be positive")));
        }
        Ok(())
    }
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self::elevation()
    }
}

// =========================================================================
// Continents
// =========================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinentParams {
    /// How many continents to seed (default: 10-20)
    pub count: RangeInclusive<usize>,
    /// Target size of each continent in tiles (default: 100-1000)
    pub size: RangeInclusive<usize>,
    /// Elevation given to open ocean (default: -20)
    pub ocean_floor_elevation: i32,
    /// Elevation given to ocean tiles touching a continent (default: -6)
    pub coast_elevation: i32,
}

impl Default for ContinentParams {
    fn default() -> Self {
        Self {
            count: 10..=20,
            size: 100..=1000,
            ocean_floor_elevation: -20,
            coast_elevation: -6,
        }
    }
}

impl ContinentParams {
    fn validate(&self) -> WorldResult<()> {
        check_range("continents.count", &self.count)?;
        check_range("continents.size", &self.size)?;
        if *self.size.start() == 0 {
            return Err(invalid("continents.size must start at 1 or more".to_string()));
        }
        Ok(())
    }
}

// =========================================================================
// Peaks
// =========================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakParams {
    /// Number of peaks to raise (default: 7-10)
    pub count: RangeInclusive<usize>,
    /// Tiles within this range of a peak cannot host another (default: 2)
    pub min_separation: i32,
    /// Elevation added to a peak tile (default: 45-60)
    pub elevation_gain: RangeInclusive<i32>,
    /// Random jitter on the slopes around a peak, +/- (default: 4)
    pub slope_jitter: i32,
}

impl Default for PeakParams {
    fn default() -> Self {
        Self {
            count: 7..=10,
            min_separation: 2,
            elevation_gain: 45..=60,
            slope_jitter: 4,
        }
    }
}

impl PeakParams {
    fn validate(&self) -> WorldResult<()> {
        check_range("peaks.count", &self.count)?;
        check_range("peaks.elevation_gain", &self.elevation_gain)?;
        if self.min_separation < 0 || self.slope_jitter < 0 {
            return Err(invalid(
                "peaks.min_separation and peaks.slope_jitter must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

// =========================================================================
// Water, beaches, fresh water
// =========================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterParams {
    /// Smallest negative-elevation region painted as ocean (default: 10).
    /// Also the largest hole a continent absorbs.
    pub min_ocean_size: usize,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self { min_ocean_size: 10 }
    }
}

impl WaterParams {
    fn validate(&self) -> WorldResult<()> {
        if self.min_ocean_size == 0 {
            return Err(invalid("water.min_ocean_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeachParams {
    /// Highest elevation a beach can sit at (default: 5)
    pub max_elevation: i32,
}

impl Default for BeachParams {
    fn default() -> Self {
        Self { max_elevation: 5 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreshWaterParams {
    /// Water deposited on every land tile (default: 0.5)
    pub rainfall: f64,
    /// Standing water at which a tile becomes a lake (default: 1.0)
    pub lake_threshold: f64,
}

impl Default for FreshWaterParams {
    fn default() -> Self {
        Self {
            rainfall: 0.5,
            lake_threshold: 1.0,
        }
    }
}

impl FreshWaterParams {
    fn validate(&self) -> WorldResult<()> {
        if self.rainfall.is_nan() || self.rainfall < 0.0 {
            return Err(invalid("freshwater.rainfall must be non-negative".to_string()));
        }
        if self.lake_threshold.is_nan() || self.lake_threshold <= 0.0 {
            return Err(invalid("freshwater.lake_threshold must be positive".to_string()));
        }
        Ok(())
    }
}

// =========================================================================
// Biomes
// =========================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeParams {
    /// Continent tiles per biome blotch (default: 10)
    pub average_size: usize,
    /// Blotch seeds keep at least this range apart (default: 1)
    pub seed_spacing: i32,
    /// Relative odds of each land biome for a blotch
    pub weights: Vec<(Biome, u32)>,
}

impl Default for BiomeParams {
    fn default() -> Self {
        Self {
            average_size: 10,
            seed_spacing: 1,
            weights: vec![(Biome::Plains, 10), (Biome::Forest, 10), (Biome::Desert, 2)],
        }
    }
}

impl BiomeParams {
    fn validate(&self) -> WorldResult<()> {
        if self.average_size == 0 {
            return Err(invalid("biomes.average_size must be at least 1".to_string()));
        }
        if self.seed_spacing < 0 {
            return Err(invalid("biomes.seed_spacing must be non-negative".to_string()));
        }
        if let Some((biome, _)) = self.weights.iter().find(|(biome, _)| !biome.is_land()) {
            return Err(invalid(format!("biomes.weights lists non-land biome {biome}")));
        }
        if self.weights.iter().map(|(_, w)| u64::from(*w)).sum::<u64>() == 0 {
            return Err(invalid("biomes.weights must have a positive total".to_string()));
        }
        Ok(())
    }
}
