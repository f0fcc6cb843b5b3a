//! World data containers
//!
//! [`WorldBuilder`] is the mutable world the generator stages work on. It
//! owns the tile arena, the continent registry and the reverse index from
//! tile to continent. [`WorldBuilder::finish`] freezes it into a read-only
//! [`World`], which is what gets published to consumers.

use std::collections::BTreeMap;

use crate::biome::Biome;
use crate::chunk::Chunk;
use crate::cluster::{Cluster, Continent, ContinentId};
use crate::error::{WorldGenError, WorldResult};
use crate::hex::HexCoordinate;
use crate::seeds::WorldSeeds;
use crate::tile::Tile;
use crate::tiles::{TileMap, TileSet};

/// A world under construction.
pub struct WorldBuilder {
    radius: u32,
    seeds: WorldSeeds,
    tiles: TileMap,
    continents: BTreeMap<ContinentId, Continent>,
    continent_index: BTreeMap<HexCoordinate, ContinentId>,
    next_continent: u32,
}

impl WorldBuilder {
    /// A blank hexagonal world of `radius` rings around the origin.
    pub fn new(radius: u32, seed: u64) -> WorldResult<Self> {
        Ok(Self::from_tile_map(
            radius,
            WorldSeeds::from_master(seed),
            TileMap::with_radius(radius)?,
        ))
    }

    /// Wrap an existing tile map, for hand-shaped worlds.
    pub fn from_tile_map(radius: u32, seeds: WorldSeeds, tiles: TileMap) -> Self {
        Self {
            radius,
            seeds,
            tiles,
            continents: BTreeMap::new(),
            continent_index: BTreeMap::new(),
            next_continent: 0,
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn seeds(&self) -> &WorldSeeds {
        &self.seeds
    }

    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut TileMap {
        &mut self.tiles
    }

    pub fn tile(&self, pos: HexCoordinate) -> Option<&Tile> {
        self.tiles.get(pos)
    }

    pub fn tile_mut(&mut self, pos: HexCoordinate) -> Option<&mut Tile> {
        self.tiles.get_mut(pos)
    }

    // ===== CONTINENTS =====

    pub fn continents(&self) -> impl Iterator<Item = &Continent> + '_ {
        self.continents.values()
    }

    pub fn continent(&self, id: ContinentId) -> Option<&Continent> {
        self.continents.get(&id)
    }

    /// Registered ids in ascending order.
    pub fn continent_ids(&self) -> Vec<ContinentId> {
        self.continents.keys().copied().collect()
    }

    pub fn continent_count(&self) -> usize {
        self.continents.len()
    }

    /// Continent holding `pos`, if any.
    pub fn continent_of(&self, pos: HexCoordinate) -> Option<ContinentId> {
        self.continent_index.get(&pos).copied()
    }

    /// Every world tile not assigned to a continent.
    pub fn unassigned_tiles(&self) -> TileSet {
        self.tiles
            .iter()
            .map(Tile::pos)
            .filter(|pos| !self.continent_index.contains_key(pos))
            .collect()
    }

    /// Every world tile assigned to some continent.
    pub fn assigned_tiles(&self) -> TileSet {
        self.continent_index.keys().copied().collect()
    }

    /// Register a new, empty continent.
    pub fn create_continent(&mut self) -> ContinentId {
        let id = ContinentId(self.next_continent);
        self.next_continent += 1;
        self.continents.insert(id, Continent::new(id));
        id
    }

    /// Add a world tile to a continent. The tile must not belong to any continent.
    pub fn add_to_continent(&mut self, id: ContinentId, pos: HexCoordinate) -> WorldResult<()> {
        if !self.tiles.contains(pos) {
            return Err(WorldGenError::NotInCollection(pos));
        }
        if self.continent_index.contains_key(&pos) {
            return Err(WorldGenError::TileAlreadyPresent(pos));
        }
        let continent = self
            .continents
            .get_mut(&id)
            .ok_or(WorldGenError::UnknownContinent(id))?;
        continent.cluster_mut().add(pos)?;
        self.continent_index.insert(pos, id);
        Ok(())
    }

    pub fn remove_from_continent(&mut self, id: ContinentId, pos: HexCoordinate) -> WorldResult<()> {
        let continent = self
            .continents
            .get_mut(&id)
            .ok_or(WorldGenError::UnknownContinent(id))?;
        continent.cluster_mut().remove(pos)?;
        self.continent_index.remove(&pos);
        Ok(())
    }

    /// Drop every continent and register one per cluster instead.
    pub fn replace_continents(&mut self, clusters: Vec<Cluster>) -> WorldResult<()> {
        self.continents.clear();
        self.continent_index.clear();
        for cluster in clusters {
            let id = self.create_continent();
            for pos in cluster.iter() {
                self.add_to_continent(id, pos)?;
            }
        }
        Ok(())
    }

    /// Unregister empty continents, returning how many were dropped.
    pub fn remove_empty_continents(&mut self) -> usize {
        let before = self.continents.len();
        self.continents.retain(|_, continent| !continent.is_empty());
        before - self.continents.len()
    }

    /// Freeze into a read-only world.
    pub fn finish(self) -> World {
        World {
            radius: self.radius,
            seeds: self.seeds,
            tiles: self.tiles,
            continents: self.continents.into_values().collect(),
            continent_index: self.continent_index,
        }
    }
}

/// A finished world. Read-only.
pub struct World {
    radius: u32,
    seeds: WorldSeeds,
    tiles: TileMap,
    /// Sorted by id.
    continents: Vec<Continent>,
    continent_index: BTreeMap<HexCoordinate, ContinentId>,
}

impl World {
    /// Convenience accessor for master seed
    pub fn seed(&self) -> u64 {
        self.seeds.master
    }

    pub fn seeds(&self) -> &WorldSeeds {
        &self.seeds
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    pub fn tile(&self, pos: HexCoordinate) -> Option<&Tile> {
        self.tiles.get(pos)
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.tiles.chunks()
    }

    pub fn continents(&self) -> &[Continent] {
        &self.continents
    }

    pub fn continent(&self, id: ContinentId) -> Option<&Continent> {
        self.continents
            .binary_search_by_key(&id, Continent::id)
            .ok()
            .map(|i| &self.continents[i])
    }

    /// Continent holding `pos`, if any.
    pub fn continent_of(&self, pos: HexCoordinate) -> Option<&Continent> {
        self.continent_index
            .get(&pos)
            .and_then(|&id| self.continent(id))
    }

    /// Number of tiles of each biome, in biome order.
    pub fn biome_counts(&self) -> BTreeMap<Biome, usize> {
        let mut counts = BTreeMap::new();
        for tile in self.tiles.iter() {
            *counts.entry(tile.biome()).or_insert(0) += 1;
        }
        counts
    }

    /// Check if a tile is coastal (land adjacent to ocean)
    pub fn is_coastal(&self, pos: HexCoordinate) -> bool {
        let Some(tile) = self.tile(pos) else {
            return false;
        };
        if !tile.biome().is_land() {
            return false;
        }
        pos.neighbors()
            .filter_map(|(_, n)| self.tile(n))
            .any(|n| n.biome() == Biome::Ocean)
    }
}
