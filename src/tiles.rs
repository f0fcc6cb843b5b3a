//! Tile storage and coordinate sets.
//!
//! [`TileMap`] is the arena that owns every tile of a world: a `Vec<Tile>`
//! plus a coordinate index and the chunk registry. [`TileSet`] is an ordered
//! set of coordinates used for continents, candidate pools and the like.
//! Both answer adjacency, range and clustering queries.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use rand::Rng;

use crate::chunk::{Chunk, ChunkPos};
use crate::cluster::Cluster;
use crate::error::{WorldGenError, WorldResult};
use crate::hex::{DirectionMap, HexCoordinate};
use crate::tile::Tile;

// ===== SHARED QUERIES =====

/// Breadth-first expansion from `origin` through coordinates accepted by `member`.
fn expand_range<F>(origin: HexCoordinate, range: i32, member: F) -> TileSet
where
    F: Fn(HexCoordinate) -> bool,
{
    let mut result = TileSet::new();
    result.insert(origin);
    let mut frontier = vec![origin];

    for _ in 0..range {
        let mut next = Vec::new();
        for pos in frontier {
            for (_, neighbor) in pos.neighbors() {
                if member(neighbor) && result.insert(neighbor) {
                    next.push(neighbor);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }

    result
}

/// Split `members` into maximal connected components.
///
/// A neighbor joins the component of the member it was reached from when
/// `similarity(member, neighbor) >= threshold`.
fn connected_components<F>(members: &BTreeSet<HexCoordinate>, similarity: F, threshold: f64) -> Vec<Cluster>
where
    F: Fn(HexCoordinate, HexCoordinate) -> f64,
{
    let mut unclustered = members.clone();
    let mut clusters = Vec::new();

    while let Some(seed) = unclustered.pop_first() {
        let mut component = TileSet::new();
        component.insert(seed);
        let mut queue = VecDeque::from([seed]);

        while let Some(current) = queue.pop_front() {
            for (_, neighbor) in current.neighbors() {
                if unclustered.contains(&neighbor) && similarity(current, neighbor) >= threshold {
                    unclustered.remove(&neighbor);
                    component.insert(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }

        clusters.push(Cluster::from_tiles(component));
    }

    clusters
}

// ===== TILE SET =====

/// An ordered set of tile coordinates.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileSet {
    members: BTreeSet<HexCoordinate>,
}

impl TileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, pos: HexCoordinate) -> bool {
        self.members.contains(&pos)
    }

    /// Returns `true` if the coordinate was not already present.
    pub fn insert(&mut self, pos: HexCoordinate) -> bool {
        self.members.insert(pos)
    }

    /// Returns `true` if the coordinate was present.
    pub fn remove(&mut self, pos: HexCoordinate) -> bool {
        self.members.remove(&pos)
    }

    /// Members in ascending coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = HexCoordinate> + '_ {
        self.members.iter().copied()
    }

    /// Uniformly random member, `None` if empty.
    pub fn random_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<HexCoordinate> {
        if self.members.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.members.len());
        self.members.iter().nth(index).copied()
    }

    /// Neighbors of `pos` that are members, keyed by direction.
    pub fn adjacent_tiles(&self, pos: HexCoordinate) -> WorldResult<DirectionMap<HexCoordinate>> {
        if !self.contains(pos) {
            return Err(WorldGenError::NotInCollection(pos));
        }
        Ok(pos.neighbors().filter(|(_, n)| self.contains(*n)).collect())
    }

    /// Members reachable from `origin` in at most `range` steps through members.
    pub fn tiles_in_range(&self, origin: HexCoordinate, range: i32) -> WorldResult<TileSet> {
        if !self.contains(origin) {
            return Err(WorldGenError::NotInCollection(origin));
        }
        if range < 0 {
            return Err(WorldGenError::NegativeRange(range));
        }
        Ok(expand_range(origin, range, |pos| self.contains(pos)))
    }

    /// Members grouped by plain adjacency.
    pub fn cluster(&self) -> Vec<Cluster> {
        connected_components(&self.members, |_, _| 1.0, 0.0)
    }

    /// Group members where both ends of an edge satisfy `predicate`.
    ///
    /// Members failing the predicate end up alone in their own cluster.
    pub fn cluster_where<P>(&self, predicate: P) -> Vec<Cluster>
    where
        P: Fn(HexCoordinate) -> bool,
    {
        connected_components(
            &self.members,
            |a, b| if predicate(a) && predicate(b) { 1.0 } else { 0.0 },
            0.5,
        )
    }

    /// Group members whose pairwise similarity reaches `threshold`.
    pub fn cluster_by<F>(&self, similarity: F, threshold: f64) -> Vec<Cluster>
    where
        F: Fn(HexCoordinate, HexCoordinate) -> f64,
    {
        connected_components(&self.members, similarity, threshold)
    }
}

impl FromIterator<HexCoordinate> for TileSet {
    fn from_iter<I: IntoIterator<Item = HexCoordinate>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl Extend<HexCoordinate> for TileSet {
    fn extend<I: IntoIterator<Item = HexCoordinate>>(&mut self, iter: I) {
        self.members.extend(iter);
    }
}

// ===== TILE MAP =====

/// Arena of every tile in a world.
///
/// Tiles are stored in ascending coordinate order and never added or removed
/// after construction. Chunks refer to tiles by arena slot.
#[derive(Clone, Debug)]
pub struct TileMap {
    tiles: Vec<Tile>,
    index: HashMap<HexCoordinate, usize>,
    chunks: BTreeMap<ChunkPos, Chunk>,
}

impl TileMap {
    /// One tile for every coordinate within `radius` of the origin.
    pub fn with_radius(radius: u32) -> WorldResult<Self> {
        Self::from_positions(HexCoordinate::within_radius(radius))
    }

    /// One tile per distinct coordinate. Duplicates are ignored.
    pub fn from_positions<I>(positions: I) -> WorldResult<Self>
    where
        I: IntoIterator<Item = HexCoordinate>,
    {
        let ordered: BTreeSet<HexCoordinate> = positions.into_iter().collect();
        let tiles: Vec<Tile> = ordered.into_iter().map(Tile::new).collect();
        let index = tiles
            .iter()
            .enumerate()
            .map(|(slot, tile)| (tile.pos(), slot))
            .collect();

        let mut grouped: BTreeMap<ChunkPos, Vec<(usize, HexCoordinate)>> = BTreeMap::new();
        for (slot, tile) in tiles.iter().enumerate() {
            grouped.entry(tile.chunk()).or_default().push((slot, tile.pos()));
        }
        let chunks = grouped
            .into_iter()
            .map(|(pos, members)| Chunk::new(pos, members).map(|chunk| (pos, chunk)))
            .collect::<WorldResult<BTreeMap<_, _>>>()?;

        Ok(Self { tiles, index, chunks })
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, pos: HexCoordinate) -> bool {
        self.index.contains_key(&pos)
    }

    pub fn get(&self, pos: HexCoordinate) -> Option<&Tile> {
        self.index.get(&pos).map(|&slot| &self.tiles[slot])
    }

    pub fn get_mut(&mut self, pos: HexCoordinate) -> Option<&mut Tile> {
        match self.index.get(&pos) {
            Some(&slot) => Some(&mut self.tiles[slot]),
            None => None,
        }
    }

    /// Tiles in ascending coordinate order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Tile> {
        self.tiles.iter_mut()
    }

    pub fn as_slice(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    /// Every coordinate in the map.
    pub fn positions(&self) -> TileSet {
        self.tiles.iter().map(Tile::pos).collect()
    }

    /// Neighboring tiles of `pos` that exist in the world.
    pub fn adjacent_tiles(&self, pos: HexCoordinate) -> WorldResult<DirectionMap<&Tile>> {
        if !self.contains(pos) {
            return Err(WorldGenError::NotInCollection(pos));
        }
        Ok(pos
            .neighbors()
            .filter_map(|(dir, n)| self.get(n).map(|tile| (dir, tile)))
            .collect())
    }

    pub fn tiles_in_range(&self, origin: HexCoordinate, range: i32) -> WorldResult<TileSet> {
        if !self.contains(origin) {
            return Err(WorldGenError::NotInCollection(origin));
        }
        if range < 0 {
            return Err(WorldGenError::NegativeRange(range));
        }
        Ok(expand_range(origin, range, |pos| self.contains(pos)))
    }

    /// Cluster the whole world; an edge joins two tiles when both satisfy `predicate`.
    pub fn cluster_where<P>(&self, predicate: P) -> Vec<Cluster>
    where
        P: Fn(&Tile) -> bool,
    {
        self.positions()
            .cluster_where(|pos| self.get(pos).is_some_and(&predicate))
    }

    // ===== CHUNKS =====

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.chunks.values()
    }

    pub fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Member tiles of a chunk.
    pub fn chunk_tiles<'a>(&'a self, chunk: &'a Chunk) -> impl Iterator<Item = &'a Tile> + 'a {
        chunk.slots().iter().map(move |&slot| &self.tiles[slot])
    }
}
