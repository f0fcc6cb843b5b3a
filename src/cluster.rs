//! Connected groups of tiles and the continents built from them.

use std::fmt;

use rand::Rng;

use crate::error::{WorldGenError, WorldResult};
use crate::hex::{DirectionMap, HexCoordinate};
use crate::tiles::TileSet;

/// A mutable subset of tiles, usually connected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cluster {
    tiles: TileSet,
}

impl Cluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tiles(tiles: TileSet) -> Self {
        Self { tiles }
    }

    pub fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    pub fn into_tiles(self) -> TileSet {
        self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, pos: HexCoordinate) -> bool {
        self.tiles.contains(pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = HexCoordinate> + '_ {
        self.tiles.iter()
    }

    pub fn add(&mut self, pos: HexCoordinate) -> WorldResult<()> {
        if !self.tiles.insert(pos) {
            return Err(WorldGenError::TileAlreadyPresent(pos));
        }
        Ok(())
    }

    pub fn remove(&mut self, pos: HexCoordinate) -> WorldResult<()> {
        if !self.tiles.remove(pos) {
            return Err(WorldGenError::TileNotPresent(pos));
        }
        Ok(())
    }

    /// Tiles outside the cluster that touch it and pass `within`.
    pub fn frontier<F>(&self, within: F) -> TileSet
    where
        F: Fn(HexCoordinate) -> bool,
    {
        self.tiles
            .iter()
            .flat_map(|pos| pos.neighbors().map(|(_, n)| n))
            .filter(|&n| !self.tiles.contains(n) && within(n))
            .collect()
    }

    /// Members adjacent to `pos`, which must itself be a member.
    pub fn adjacent_members(&self, pos: HexCoordinate) -> WorldResult<DirectionMap<HexCoordinate>> {
        self.tiles.adjacent_tiles(pos)
    }

    pub fn random_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<HexCoordinate> {
        self.tiles.random_tile(rng)
    }

    /// Pick up to `count` members, each more than `min_spacing` steps (through
    /// the cluster) from the ones picked before it.
    pub fn select_tiles<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        min_spacing: i32,
    ) -> WorldResult<TileSet> {
        let mut candidates = self.tiles.clone();
        let mut selected = TileSet::new();

        while selected.len() < count {
            let Some(pick) = candidates.random_tile(rng) else {
                break;
            };
            selected.insert(pick);
            for near in self.tiles.tiles_in_range(pick, min_spacing)?.iter() {
                candidates.remove(near);
            }
        }

        Ok(selected)
    }
}

/// Identifier of a registered continent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContinentId(pub u32);

impl fmt::Display for ContinentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A continent: a registered cluster of land.
///
/// Continents are only mutated through the world builder, which keeps its
/// tile-to-continent index in step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Continent {
    id: ContinentId,
    cluster: Cluster,
}

impl Continent {
    pub(crate) fn new(id: ContinentId) -> Self {
        Self {
            id,
            cluster: Cluster::new(),
        }
    }

    pub fn id(&self) -> ContinentId {
        self.id
    }

    pub fn cluster(&self) -> &Cluster {
        &self.cluster
    }

    pub(crate) fn cluster_mut(&mut self) -> &mut Cluster {
        &mut self.cluster
    }

    pub fn tiles(&self) -> &TileSet {
        self.cluster.tiles()
    }

    pub fn len(&self) -> usize {
        self.cluster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cluster.is_empty()
    }

    pub fn contains(&self, pos: HexCoordinate) -> bool {
        self.cluster.contains(pos)
    }
}
