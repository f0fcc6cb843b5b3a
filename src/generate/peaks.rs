//! Mountain peaks: a few tall spikes with their slopes blended into the
//! surrounding terrain.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::PeakParams;
use crate::error::{WorldGenError, WorldResult};
use crate::hex::HexCoordinate;
use crate::world::WorldBuilder;

#[derive(Clone, Debug)]
pub struct PeakGenerator {
    params: PeakParams,
}

impl PeakGenerator {
    pub fn new(params: PeakParams) -> Self {
        Self { params }
    }

    pub fn generate(&self, world: &mut WorldBuilder, rng: &mut ChaCha8Rng) -> WorldResult<()> {
        let peaks = self.place_peaks(world, rng)?;
        for &peak in &peaks {
            self.raise_peak(world, peak, rng)?;
        }
        tracing::debug!(peaks = peaks.len(), "peaks raised");
        Ok(())
    }

    /// Pick peak positions, each out of range of the ones before it.
    fn place_peaks(&self, world: &WorldBuilder, rng: &mut ChaCha8Rng) -> WorldResult<Vec<HexCoordinate>> {
        let target = rng.gen_range(self.params.count.clone());
        let mut candidates = world.tiles().positions();
        let mut peaks = Vec::with_capacity(target);

        while peaks.len() < target {
            let Some(peak) = candidates.random_tile(rng) else {
                break;
            };
            peaks.push(peak);
            for near in world.tiles().tiles_in_range(peak, self.params.min_separation)?.iter() {
                candidates.remove(near);
            }
        }

        Ok(peaks)
    }

    /// Raise one peak, then set each neighbor halfway between the peak and
    /// the tile beyond it.
    fn raise_peak(&self, world: &mut WorldBuilder, peak: HexCoordinate, rng: &mut ChaCha8Rng) -> WorldResult<()> {
        let gain = rng.gen_range(self.params.elevation_gain.clone());
        let tile = world.tile_mut(peak).ok_or(WorldGenError::NotInCollection(peak))?;
        tile.set_elevation(tile.elevation() + gain);
        let peak_elevation = tile.elevation();

        let slopes: Vec<(HexCoordinate, i32)> = world
            .tiles()
            .adjacent_tiles(peak)?
            .iter()
            .map(|(dir, neighbor)| {
                let beyond = world.tile(neighbor.pos().neighbor(dir)).map_or(0, |t| t.elevation());
                (neighbor.pos(), beyond)
            })
            .collect();

        let jitter = self.params.slope_jitter;
        for (pos, beyond) in slopes {
            let slope = (peak_elevation + beyond) / 2 + rng.gen_range(-jitter..=jitter);
            if let Some(tile) = world.tile_mut(pos) {
                tile.set_elevation(slope);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_peak_count_and_spacing() {
        let mut world = WorldBuilder::new(10, 1).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let generator = PeakGenerator::new(PeakParams::default());
        let peaks = generator.place_peaks(&world, &mut rng).unwrap();

        assert!((7..=10).contains(&peaks.len()));
        for (i, a) in peaks.iter().enumerate() {
            for b in &peaks[i + 1..] {
                assert!(a.distance_to(*b) > 2);
            }
        }

        for &peak in &peaks {
            generator.raise_peak(&mut world, peak, &mut rng).unwrap();
        }
        // Slopes never reach another peak, so every peak keeps its full gain
        for peak in peaks {
            assert!((45..=60).contains(&world.tile(peak).unwrap().elevation()));
        }
    }

    #[test]
    fn test_slopes_average_peak_and_beyond() {
        let mut world = WorldBuilder::new(3, 1).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let generator = PeakGenerator::new(PeakParams::default());
        generator.raise_peak(&mut world, HexCoordinate::ORIGIN, &mut rng).unwrap();

        let peak = world.tile(HexCoordinate::ORIGIN).unwrap().elevation();
        assert!((45..=60).contains(&peak));
        for (_, neighbor) in HexCoordinate::ORIGIN.neighbors() {
            let slope = world.tile(neighbor).unwrap().elevation();
            // Tiles beyond the neighbors are flat at zero
            assert!((slope - peak / 2).abs() <= 4, "slope {slope} for peak {peak}");
        }
    }

    #[test]
    fn test_peak_at_world_edge() {
        let mut world = WorldBuilder::new(1, 1).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let edge = HexCoordinate::from_axial(1, 0);
        PeakGenerator::new(PeakParams::default())
            .raise_peak(&mut world, edge, &mut rng)
            .unwrap();
        assert!(world.tile(edge).unwrap().elevation() >= 45);
    }
}
