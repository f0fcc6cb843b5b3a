use std::error::Error;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing::Level;

use hexworld::ascii::{self, AsciiMode};
use hexworld::{GenerationHandle, HexCoordinate, WorldConfig};

#[derive(Parser, Debug)]
#[command(name = "hexworld")]
#[command(about = "Generate procedural hex-grid worlds and print them as ASCII")]
struct Args {
    /// Rings of tiles around the center (default: 50, or the config file's value)
    #[arg(short, long)]
    radius: Option<u32>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with generation parameter overrides
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Map view: biome, elevation, humidity, water or continents
    #[arg(short, long, default_value = "biome")]
    mode: AsciiMode,

    /// Skip printing the map
    #[arg(long)]
    no_map: bool,

    /// Print one tile's info, given as x,y,z
    #[arg(long)]
    info: Option<String>,

    /// Include position, chunk and water details in tile info
    #[arg(long)]
    debug: bool,

    /// Log per-stage timings
    #[arg(short, long)]
    verbose: bool,
}

fn parse_coordinate(text: &str) -> Result<HexCoordinate, Box<dyn Error>> {
    let parts: Vec<i32> = text
        .split(',')
        .map(|part| part.trim().parse::<i32>())
        .collect::<Result<_, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(HexCoordinate::new(*x, *y, *z)?),
        _ => Err(format!("expected x,y,z but got '{text}'").into()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();

    // --seed wins, then the config file, then a random seed
    let fallback_seed = || args.seed.unwrap_or_else(rand::random);
    let mut config = match &args.config {
        Some(path) => WorldConfig::from_json_or_seed(&std::fs::read_to_string(path)?, fallback_seed)?,
        None => WorldConfig {
            seed: fallback_seed(),
            ..WorldConfig::default()
        },
    };
    if let Some(radius) = args.radius {
        config.radius = radius;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    println!("Generating world with seed: {}", config.seed);
    println!("Radius: {} ({} tiles)", config.radius, 3 * config.radius as u64 * (config.radius as u64 + 1) + 1);

    let handle = GenerationHandle::spawn(config);
    while !handle.is_finished() {
        thread::sleep(Duration::from_millis(50));
    }
    let world = handle.wait()?;

    println!("Continents: {}", world.continents().len());
    for continent in world.continents() {
        println!("  {} - {} tiles", continent.id(), continent.len());
    }
    println!("Biomes:");
    print!("{}", ascii::biome_stats(&world));

    if !args.no_map {
        println!();
        println!("=== MAP ({} View) ===", args.mode.name());
        print!("{}", ascii::render_ascii_map(&world, args.mode));
        println!();
        match args.mode {
            AsciiMode::Biome => print!("{}", ascii::biome_legend()),
            AsciiMode::Elevation => print!("{}", ascii::height_legend()),
            _ => {}
        }
    }

    if let Some(text) = &args.info {
        let pos = parse_coordinate(text)?;
        match world.tile(pos) {
            Some(tile) => {
                println!();
                println!("{}", tile.info(args.debug));
                if let Some(continent) = world.continent_of(pos) {
                    println!("Continent: {}", continent.id());
                }
            }
            None => println!("No tile at {pos}"),
        }
    }

    Ok(())
}
