//! Seed management for world generation
//!
//! Every generator stage draws from its own RNG, seeded from a sub-seed
//! derived from the master seed and the stage name, so each stage's draws
//! are independent of how much randomness the stages before it consumed.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for every generator stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Elevation noise field
    pub elevation: u64,
    /// Humidity noise field
    pub humidity: u64,
    /// Mountain peak placement and jitter
    pub peaks: u64,
    /// Continent seeding and growth
    pub continents: u64,
    /// Ocean painting (draws nothing today, kept so the stage has a stream)
    pub water: u64,
    /// Biome blotch seeding, growth and biome choice
    pub biomes: u64,
    /// Beach placement
    pub beaches: u64,
    /// Rainfall and lake formation
    pub freshwater: u64,
}

impl WorldSeeds {
    /// Create seeds from a master seed, deriving all sub-seeds deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            elevation: derive_seed(master, "elevation"),
            humidity: derive_seed(master, "humidity"),
            peaks: derive_seed(master, "peaks"),
            continents: derive_seed(master, "continents"),
            water: derive_seed(master, "water"),
            biomes: derive_seed(master, "biomes"),
            beaches: derive_seed(master, "beaches"),
            freshwater: derive_seed(master, "freshwater"),
        }
    }
}

/// Derive a sub-seed from a master seed and a stage name.
fn derive_seed(master: u64, stage: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    stage.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_derivation() {
        let seeds1 = WorldSeeds::from_master(12345);
        let seeds2 = WorldSeeds::from_master(12345);
        assert_eq!(seeds1, seeds2);
    }

    #[test]
    fn test_different_stages_get_different_seeds() {
        let seeds = WorldSeeds::from_master(12345);

        assert_ne!(seeds.elevation, seeds.humidity);
        assert_ne!(seeds.humidity, seeds.peaks);
        assert_ne!(seeds.continents, seeds.biomes);
        assert_ne!(seeds.beaches, seeds.freshwater);
    }

    #[test]
    fn test_master_seed_changes_every_stage() {
        let a = WorldSeeds::from_master(1);
        let b = WorldSeeds::from_master(2);
        assert_ne!(a.elevation, b.elevation);
        assert_ne!(a.continents, b.continents);
        assert_ne!(a.freshwater, b.freshwater);
    }
}
