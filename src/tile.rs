//! A single hex tile and its mutable terrain attributes.

use crate::biome::Biome;
use crate::chunk::ChunkPos;
use crate::hex::{DirectionMap, HexCoordinate, HexDirection};
use crate::range::ValueRange;

pub const ELEVATION_MIN: i32 = -50;
pub const ELEVATION_MAX: i32 = 75;

/// Elevation bounds as a float range, for remapping noise samples.
pub const ELEVATION_RANGE: ValueRange = ValueRange::new(ELEVATION_MIN as f64, ELEVATION_MAX as f64);
pub const HUMIDITY_RANGE: ValueRange = ValueRange::new(0.0, 1.0);

/// Whether a river enters or leaves a tile through an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RiverConnection {
    Entry,
    Exit,
}

/// One hex of the world.
///
/// The position and owning chunk are fixed at creation. Setters clamp into
/// range instead of failing.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pos: HexCoordinate,
    chunk: ChunkPos,
    biome: Biome,
    elevation: i32,
    humidity: f64,
    water_level: f64,
    total_water_traversed: f64,
    river_connections: DirectionMap<RiverConnection>,
}

impl Tile {
    pub fn new(pos: HexCoordinate) -> Self {
        Self {
            pos,
            chunk: ChunkPos::containing(pos),
            biome: Biome::None,
            elevation: 0,
            humidity: 0.0,
            water_level: 0.0,
            total_water_traversed: 0.0,
            river_connections: DirectionMap::new(),
        }
    }

    pub fn pos(&self) -> HexCoordinate {
        self.pos
    }

    pub fn chunk(&self) -> ChunkPos {
        self.chunk
    }

    pub fn biome(&self) -> Biome {
        self.biome
    }

    pub fn set_biome(&mut self, biome: Biome) {
        self.biome = biome;
    }

    pub fn elevation(&self) -> i32 {
        self.elevation
    }

    pub fn set_elevation(&mut self, elevation: i32) {
        self.elevation = elevation.clamp(ELEVATION_MIN, ELEVATION_MAX);
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn set_humidity(&mut self, humidity: f64) {
        self.humidity = HUMIDITY_RANGE.coerce(humidity);
    }

    // ===== WATER =====

    pub fn water_level(&self) -> f64 {
        self.water_level
    }

    /// Elevation of the water surface on this tile.
    pub fn water_elevation(&self) -> f64 {
        self.elevation as f64 + self.water_level
    }

    /// Total water that has ever passed through this tile.
    pub fn total_water_traversed(&self) -> f64 {
        self.total_water_traversed
    }

    /// Deposit water and return how much was accepted.
    ///
    /// Negative amounts count as zero. Water tiles accept nothing.
    pub fn add_water(&mut self, amount: f64) -> f64 {
        if self.biome.is_water() || amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        self.water_level += amount;
        self.total_water_traversed += amount;
        amount
    }

    /// Remove up to `amount` and return how much was actually removed.
    pub fn remove_water(&mut self, amount: f64) -> f64 {
        let removed = amount.max(0.0).min(self.water_level);
        self.water_level -= removed;
        removed
    }

    /// Drain the tile, returning the previous level.
    pub fn clear_water(&mut self) -> f64 {
        std::mem::replace(&mut self.water_level, 0.0)
    }

    // ===== RIVERS =====

    pub fn river_connection(&self, dir: HexDirection) -> Option<RiverConnection> {
        self.river_connections.get(dir).copied()
    }

    pub fn river_connections(&self) -> &DirectionMap<RiverConnection> {
        &self.river_connections
    }

    pub fn set_river_connection(&mut self, dir: HexDirection, connection: RiverConnection) {
        self.river_connections.insert(dir, connection);
    }

    pub fn remove_river_connection(&mut self, dir: HexDirection) -> Option<RiverConnection> {
        self.river_connections.remove(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_clamp() {
        let mut tile = Tile::new(HexCoordinate::ORIGIN);
        tile.set_elevation(500);
        assert_eq!(tile.elevation(), ELEVATION_MAX);
        tile.set_elevation(-500);
        assert_eq!(tile.elevation(), ELEVATION_MIN);
        tile.set_elevation(12);
        assert_eq!(tile.elevation(), 12);

        tile.set_humidity(1.7);
        assert_eq!(tile.humidity(), 1.0);
        tile.set_humidity(-0.2);
        assert_eq!(tile.humidity(), 0.0);
    }

    #[test]
    fn test_chunk_fixed_at_creation() {
        let pos = HexCoordinate::from_axial(-1, 17);
        let tile = Tile::new(pos);
        assert_eq!(tile.chunk(), ChunkPos::containing(pos));
        assert_eq!(tile.chunk(), ChunkPos { x: -1, y: 1 });
    }

    #[test]
    fn test_add_water() {
        let mut tile = Tile::new(HexCoordinate::ORIGIN);
        assert_eq!(tile.add_water(0.5), 0.5);
        assert_eq!(tile.add_water(-3.0), 0.0);
        assert_eq!(tile.add_water(f64::NAN), 0.0);
        assert_eq!(tile.add_water(0.25), 0.25);
        assert_eq!(tile.water_level(), 0.75);
        assert_eq!(tile.total_water_traversed(), 0.75);
    }

    #[test]
    fn test_water_tiles_drop_water() {
        let mut tile = Tile::new(HexCoordinate::ORIGIN);
        tile.set_biome(Biome::Ocean);
        assert_eq!(tile.add_water(2.0), 0.0);
        assert_eq!(tile.water_level(), 0.0);
        assert_eq!(tile.total_water_traversed(), 0.0);
    }

    #[test]
    fn test_remove_and_clear_water() {
        let mut tile = Tile::new(HexCoordinate::ORIGIN);
        tile.set_elevation(3);
        tile.add_water(1.0);
        assert_eq!(tile.water_elevation(), 4.0);
        assert_eq!(tile.remove_water(0.4), 0.4);
        assert_eq!(tile.remove_water(5.0), 0.6);
        assert_eq!(tile.water_level(), 0.0);

        tile.add_water(2.0);
        assert_eq!(tile.clear_water(), 2.0);
        assert_eq!(tile.water_level(), 0.0);
        // Traversal total never goes down
        assert_eq!(tile.total_water_traversed(), 3.0);
    }

    #[test]
    fn test_river_connections() {
        let mut tile = Tile::new(HexCoordinate::ORIGIN);
        tile.set_river_connection(HexDirection::North, RiverConnection::Entry);
        tile.set_river_connection(HexDirection::SouthEast, RiverConnection::Exit);
        assert_eq!(tile.river_connection(HexDirection::North), Some(RiverConnection::Entry));
        assert_eq!(tile.river_connections().len(), 2);
        assert_eq!(tile.remove_river_connection(HexDirection::North), Some(RiverConnection::Entry));
        assert_eq!(tile.river_connection(HexDirection::North), None);
    }
}
