//! Fixed-size blocks of tiles.
//!
//! A chunk covers every coordinate whose x and y fall in the same
//! `CHUNK_SIDE_LENGTH`-wide band. The world is a hexagon, so chunks along its
//! border only hold the part of their block that exists.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{WorldGenError, WorldResult};
use crate::hex::HexCoordinate;

pub const CHUNK_SIDE_LENGTH: i32 = 16;
pub const CHUNK_TILE_COUNT: usize = (CHUNK_SIDE_LENGTH * CHUNK_SIDE_LENGTH) as usize;

/// Position of a chunk on the chunk grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
}

impl ChunkPos {
    /// The chunk whose block contains `pos`.
    pub fn containing(pos: HexCoordinate) -> Self {
        Self {
            x: pos.x().div_euclid(CHUNK_SIDE_LENGTH),
            y: pos.y().div_euclid(CHUNK_SIDE_LENGTH),
        }
    }

    pub fn contains(&self, pos: HexCoordinate) -> bool {
        Self::containing(pos) == *self
    }

    /// Every coordinate of the block, populated or not.
    pub fn positions(&self) -> impl Iterator<Item = HexCoordinate> {
        let x0 = self.x * CHUNK_SIDE_LENGTH;
        let y0 = self.y * CHUNK_SIDE_LENGTH;
        (x0..x0 + CHUNK_SIDE_LENGTH)
            .flat_map(move |x| (y0..y0 + CHUNK_SIDE_LENGTH).map(move |y| HexCoordinate::from_axial(x, y)))
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// A chunk and the arena slots of the world tiles inside its block.
///
/// The member list is frozen at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    pos: ChunkPos,
    slots: Box<[usize]>,
}

impl Chunk {
    /// Build a chunk from `(arena slot, coordinate)` pairs of its members.
    ///
    /// Each member must lie in the block and appear once, so a chunk never
    /// holds more than `CHUNK_TILE_COUNT` members. Border chunks hold fewer.
    pub fn new<I>(pos: ChunkPos, members: I) -> WorldResult<Self>
    where
        I: IntoIterator<Item = (usize, HexCoordinate)>,
    {
        let mut slots = Vec::new();
        let mut seen = BTreeSet::new();
        for (slot, coord) in members {
            if !pos.contains(coord) {
                return Err(WorldGenError::ChunkInvariant(format!(
                    "tile {coord} lies outside chunk {pos}"
                )));
            }
            if !seen.insert(coord) {
                return Err(WorldGenError::ChunkInvariant(format!(
                    "tile {coord} listed twice in chunk {pos}"
                )));
            }
            slots.push(slot);
        }
        Ok(Self {
            pos,
            slots: slots.into_boxed_slice(),
        })
    }

    pub fn pos(&self) -> ChunkPos {
        self.pos
    }

    /// Arena slots of the member tiles.
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    /// Number of populated members.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether every coordinate of the block exists in the world.
    pub fn is_full(&self) -> bool {
        self.slots.len() == CHUNK_TILE_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_has_side_squared_positions() {
        for pos in [ChunkPos { x: 0, y: 0 }, ChunkPos { x: -2, y: 3 }] {
            let coords: BTreeSet<_> = pos.positions().collect();
            assert_eq!(coords.len(), CHUNK_TILE_COUNT);
            assert!(coords.iter().all(|c| pos.contains(*c)));
        }
    }

    #[test]
    fn test_containing_floors_negative_coordinates() {
        assert_eq!(ChunkPos::containing(HexCoordinate::from_axial(-1, 0)), ChunkPos { x: -1, y: 0 });
        assert_eq!(ChunkPos::containing(HexCoordinate::from_axial(-16, 15)), ChunkPos { x: -1, y: 0 });
        assert_eq!(ChunkPos::containing(HexCoordinate::from_axial(-17, 16)), ChunkPos { x: -2, y: 1 });
    }

    #[test]
    fn test_new_rejects_foreign_member() {
        let pos = ChunkPos { x: 0, y: 0 };
        let err = Chunk::new(pos, vec![(0, HexCoordinate::from_axial(16, 0))]).unwrap_err();
        assert!(matches!(err, WorldGenError::ChunkInvariant(_)));
    }

    #[test]
    fn test_new_rejects_duplicate_member() {
        let pos = ChunkPos { x: 0, y: 0 };
        let coord = HexCoordinate::from_axial(3, 4);
        let err = Chunk::new(pos, vec![(0, coord), (1, coord)]).unwrap_err();
        assert!(matches!(err, WorldGenError::ChunkInvariant(_)));
    }

    #[test]
    fn test_full_chunk() {
        let pos = ChunkPos { x: 1, y: -1 };
        let chunk = Chunk::new(pos, pos.positions().enumerate()).unwrap();
        assert!(chunk.is_full());
        assert_eq!(chunk.len(), CHUNK_TILE_COUNT);

        let partial = Chunk::new(pos, pos.positions().enumerate().take(10)).unwrap();
        assert!(!partial.is_full());
        assert_eq!(partial.len(), 10);
    }
}
