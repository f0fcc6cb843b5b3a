//! The generation pipeline
//!
//! Runs the stages in order on a fresh world builder, each with its own RNG
//! seeded from the world seeds, then freezes the result. The finished world
//! is handed out once, behind an `Arc`.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::WorldConfig;
use crate::error::{WorldGenError, WorldResult};
use crate::generate::Stage;
use crate::world::{World, WorldBuilder};

/// An ordered list of generator stages.
#[derive(Clone, Debug)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// The standard stage order, configured from `config`.
    pub fn new(config: &WorldConfig) -> Self {
        Self::with_stages(Stage::standard(config))
    }

    pub fn with_stages(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn run(&self, world: &mut WorldBuilder) -> WorldResult<()> {
        for stage in &self.stages {
            let start = Instant::now();
            let mut rng = ChaCha8Rng::seed_from_u64(stage.seed(world.seeds()));
            stage.generate(world, &mut rng)?;
            tracing::debug!(
                stage = stage.name(),
                elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                "stage finished"
            );
        }
        Ok(())
    }
}

/// Generate a complete world.
pub fn generate_world(config: &WorldConfig) -> WorldResult<Arc<World>> {
    config.validate()?;
    let start = Instant::now();

    let mut builder = WorldBuilder::new(config.radius, config.seed)?;
    Pipeline::new(config).run(&mut builder)?;
    let world = builder.finish();

    tracing::info!(
        seed = world.seed(),
        radius = world.radius(),
        tiles = world.tiles().len(),
        continents = world.continents().len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "world generated"
    );
    Ok(Arc::new(world))
}

/// A world being generated on a background thread.
pub struct GenerationHandle {
    handle: JoinHandle<WorldResult<Arc<World>>>,
}

impl GenerationHandle {
    pub fn spawn(config: WorldConfig) -> Self {
        let handle = thread::spawn(move || generate_world(&config));
        Self { handle }
    }

    /// Whether the world is ready; `wait` will not block once this is true.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until generation ends.
    pub fn wait(self) -> WorldResult<Arc<World>> {
        self.handle
            .join()
            .map_err(|_| WorldGenError::Worker("generation thread panicked".to_string()))?
    }
}
