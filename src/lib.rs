//! Hex-grid world generation library
//!
//! Builds a hexagonal world of tiles and runs it through a fixed sequence of
//! generator stages: noise terrain, peaks, continents, oceans, biomes,
//! beaches and fresh water. Generation is deterministic for a given seed and
//! radius. The finished [`World`] is read-only and shared behind an `Arc`.

pub mod ascii;
pub mod biome;
pub mod chunk;
pub mod cluster;
pub mod config;
pub mod display;
pub mod error;
pub mod generate;
pub mod hex;
pub mod layout;
pub mod pipeline;
pub mod range;
pub mod seeds;
pub mod tile;
pub mod tiles;
pub mod world;

pub use biome::Biome;
pub use config::WorldConfig;
pub use error::{WorldGenError, WorldResult};
pub use hex::{HexCoordinate, HexDirection};
pub use pipeline::{generate_world, GenerationHandle, Pipeline};
pub use tile::Tile;
pub use world::{World, WorldBuilder};
