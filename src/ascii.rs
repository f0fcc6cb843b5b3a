//! ASCII rendering for world maps
//!
//! Draws the hexagonal world as offset text rows, one character per tile,
//! for quick inspection from a terminal.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::str::FromStr;

use crate::biome::Biome;
use crate::hex::HexCoordinate;
use crate::tile::{Tile, ELEVATION_MAX, ELEVATION_MIN};
use crate::world::World;

/// ASCII rendering modes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AsciiMode {
    /// Show biome characters
    #[default]
    Biome,
    /// Show elevation gradient
    Elevation,
    /// Show humidity gradient
    Humidity,
    /// Show standing water
    Water,
    /// Show continent ids
    Continents,
}

impl AsciiMode {
    pub fn name(&self) -> &'static str {
        match self {
            AsciiMode::Biome => "Biome",
            AsciiMode::Elevation => "Elevation",
            AsciiMode::Humidity => "Humidity",
            AsciiMode::Water => "Water",
            AsciiMode::Continents => "Continents",
        }
    }

    pub fn all() -> &'static [AsciiMode] {
        &[
            AsciiMode::Biome,
            AsciiMode::Elevation,
            AsciiMode::Humidity,
            AsciiMode::Water,
            AsciiMode::Continents,
        ]
    }
}

impl FromStr for AsciiMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AsciiMode::all()
            .iter()
            .copied()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<_> = AsciiMode::all().iter().map(|m| m.name().to_lowercase()).collect();
                format!("unknown map mode '{s}', expected one of: {}", names.join(", "))
            })
    }
}

/// Get ASCII character for a biome
pub fn biome_char(biome: Biome) -> char {
    match biome {
        Biome::None => '?',
        Biome::Ocean => '~',
        Biome::Lake => 'o',
        Biome::Beach => ':',
        Biome::Plains => '"',
        Biome::Forest => 'T',
        Biome::Desert => 'd',
    }
}

/// Get ASCII character for elevation (11-level gradient)
pub fn height_char(elevation: i32) -> char {
    const CHARS: &[char] = &['~', '.', '-', '=', '+', '*', '#', '%', '^', 'A', 'M'];
    let span = (ELEVATION_MAX - ELEVATION_MIN) as f64;
    let normalized = ((elevation - ELEVATION_MIN) as f64 / span).clamp(0.0, 1.0);
    let idx = (normalized * (CHARS.len() - 1) as f64) as usize;
    CHARS[idx.min(CHARS.len() - 1)]
}

/// Get ASCII character for humidity
pub fn humidity_char(humidity: f64) -> char {
    const CHARS: &[char] = &['_', '.', '-', ':', ';', '=', '+', '#', '%', '~'];
    let idx = (humidity.clamp(0.0, 1.0) * (CHARS.len() - 1) as f64) as usize;
    CHARS[idx.min(CHARS.len() - 1)]
}

/// Get ASCII character for standing water
pub fn water_char(tile: &Tile) -> char {
    if tile.biome().is_water() {
        return '~';
    }
    match tile.water_level() {
        w if w <= 0.0 => '.',
        w if w < 0.5 => ',',
        w if w < 1.0 => 'o',
        _ => 'O',
    }
}

fn continent_char(world: &World, pos: HexCoordinate) -> char {
    match world.continent_of(pos) {
        Some(continent) => {
            let offset = (continent.id().0 % 26) as u8;
            (b'A' + offset) as char
        }
        None => ' ',
    }
}

/// Render a world to an ASCII string.
///
/// Rows run along constant z with north at the top; each row is indented so
/// neighboring tiles line up diagonally.
pub fn render_ascii_map(world: &World, mode: AsciiMode) -> String {
    let r = world.radius() as i32;
    let mut result = String::new();

    for z in -r..=r {
        let indent = z.unsigned_abs() as usize;
        result.push_str(&" ".repeat(indent));
        let x_lo = (-r).max(-z - r);
        let x_hi = r.min(-z + r);
        for x in x_lo..=x_hi {
            let pos = HexCoordinate::from_axial(x, -x - z);
            let ch = match world.tile(pos) {
                None => ' ',
                Some(tile) => match mode {
                    AsciiMode::Biome => biome_char(tile.biome()),
                    AsciiMode::Elevation => height_char(tile.elevation()),
                    AsciiMode::Humidity => humidity_char(tile.humidity()),
                    AsciiMode::Water => water_char(tile),
                    AsciiMode::Continents => continent_char(world, pos),
                },
            };
            result.push(ch);
            result.push(' ');
        }
        result.truncate(result.trim_end_matches(' ').len());
        result.push('\n');
    }

    result
}

/// Generate legend for biome characters
pub fn biome_legend() -> String {
    let mut legend = String::from("=== BIOME LEGEND ===\n");
    for &biome in Biome::all() {
        let _ = writeln!(legend, "  {} {}", biome_char(biome), biome.display_name());
    }
    legend
}

/// Generate height legend
pub fn height_legend() -> String {
    format!(
        "=== HEIGHT LEGEND ===\n\
         Ocean floor -> High peaks:\n\
         ~ . - = + * # % ^ A M\n\
         ({ELEVATION_MIN})            ({ELEVATION_MAX})\n"
    )
}

/// Biome statistics as a printable table, most common first
pub fn biome_stats(world: &World) -> String {
    let counts: BTreeMap<Biome, usize> = world.biome_counts();
    let total = world.tiles().len().max(1);
    let mut rows: Vec<(Biome, usize)> = counts.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut text = String::new();
    for (biome, count) in rows {
        let _ = writeln!(
            text,
            "  {:<8} {:>7} ({:>5.1}%)",
            biome.display_name(),
            count,
            count as f64 * 100.0 / total as f64
        );
    }
    text
}
