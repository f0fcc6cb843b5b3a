//! Error types for world generation.
//!
//! Nothing inside the generator does I/O, so every variant here is a logic
//! error: either a broken invariant or a precondition a caller failed to
//! meet. Stages propagate them with `?` and the pipeline aborts the run.

use thiserror::Error;

use crate::cluster::ContinentId;
use crate::hex::HexCoordinate;

/// Errors that can occur while building or generating a world.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldGenError {
    /// Cube coordinate components did not sum to zero.
    #[error("invalid cube coordinate ({x}, {y}, {z}): components must sum to 0")]
    InvalidCoordinate {
        /// The x component.
        x: i32,
        /// The y component.
        y: i32,
        /// The z component.
        z: i32,
    },

    /// A chunk was built with members outside its block, or too many of them.
    #[error("chunk invariant violated: {0}")]
    ChunkInvariant(String),

    /// The origin of an adjacency or range query is not in the collection.
    #[error("tile {0} is not in the collection")]
    NotInCollection(HexCoordinate),

    /// A range query was given a negative range.
    #[error("range must be non-negative, was {0}")]
    NegativeRange(i32),

    /// Tried to add a tile to a cluster or continent that already holds it.
    #[error("tile {0} is already present")]
    TileAlreadyPresent(HexCoordinate),

    /// Tried to remove a tile from a cluster or continent that does not hold it.
    #[error("tile {0} is not present")]
    TileNotPresent(HexCoordinate),

    /// Referenced a continent id that is not registered.
    #[error("unknown continent {0}")]
    UnknownContinent(ContinentId),

    /// Generation parameters failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The background generation thread died before producing a world.
    #[error("generation worker failed: {0}")]
    Worker(String),
}

/// Result type for world generation operations.
pub type WorldResult<T> = Result<T, WorldGenError>;
