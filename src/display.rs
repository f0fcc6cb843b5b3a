//! Display attributes derived from tile data
//!
//! Nothing here is stored on the tile. Colors and info text are computed on
//! demand from the current tile state, so renderers can call them freely on a
//! finished world.

use crate::range::ValueRange;
use crate::tile::{Tile, ELEVATION_RANGE, HUMIDITY_RANGE};

/// An RGB color.
pub type Rgb = (u8, u8, u8);

/// Standing water at which the water view saturates.
pub const WATER_DISPLAY_RANGE: ValueRange = ValueRange::new(0.0, 3.0);

/// What a tile's color shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TileColorMode {
    Elevation,
    Humidity,
    WaterLevel,
    #[default]
    Biome,
    /// Biome color shaded by elevation
    Composite,
}

impl TileColorMode {
    pub fn name(&self) -> &'static str {
        match self {
            TileColorMode::Elevation => "Elevation",
            TileColorMode::Humidity => "Humidity",
            TileColorMode::WaterLevel => "Water level",
            TileColorMode::Biome => "Biome",
            TileColorMode::Composite => "Composite",
        }
    }

    pub fn all() -> &'static [TileColorMode] {
        &[
            TileColorMode::Elevation,
            TileColorMode::Humidity,
            TileColorMode::WaterLevel,
            TileColorMode::Biome,
            TileColorMode::Composite,
        ]
    }

    /// Colors at the low and high end of a gradient mode.
    fn gradient(&self) -> Option<(Rgb, Rgb)> {
        match self {
            TileColorMode::Elevation => Some(((0, 0, 0), (255, 255, 255))),
            TileColorMode::Humidity => Some(((255, 255, 255), (0, 120, 255))),
            TileColorMode::WaterLevel => Some(((255, 255, 255), (0, 0, 255))),
            TileColorMode::Biome | TileColorMode::Composite => None,
        }
    }
}

/// Linear interpolation between two colors, `t` in [0, 1].
pub fn lerp_color(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    (mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

fn scale_color(color: Rgb, factor: f64) -> Rgb {
    let scale = |c: u8| (c as f64 * factor).round().clamp(0.0, 255.0) as u8;
    (scale(color.0), scale(color.1), scale(color.2))
}

/// Position of `value` within `range`, in [0, 1].
fn fraction(range: &ValueRange, value: f64) -> f64 {
    range.map_to(range.coerce(value), &ValueRange::new(0.0, 1.0))
}

impl Tile {
    pub fn color(&self, mode: TileColorMode) -> Rgb {
        let elevation = fraction(&ELEVATION_RANGE, self.elevation() as f64);
        match mode {
            TileColorMode::Biome => self.biome().color(),
            TileColorMode::Composite => scale_color(self.biome().color(), 0.55 + 0.45 * elevation),
            gradient => {
                let t = match gradient {
                    TileColorMode::Humidity => fraction(&HUMIDITY_RANGE, self.humidity()),
                    TileColorMode::WaterLevel => fraction(&WATER_DISPLAY_RANGE, self.water_level()),
                    _ => elevation,
                };
                match gradient.gradient() {
                    Some((low, high)) => lerp_color(low, high, t),
                    None => self.biome().color(),
                }
            }
        }
    }

    /// Human-readable summary, with position and water details when `debug` is set.
    pub fn info(&self, debug: bool) -> String {
        let mut text = format!(
            "Biome: {}\nElevation: {}\nHumidity: {}%",
            self.biome().display_name(),
            self.elevation(),
            (self.humidity() * 100.0).round() as i32
        );
        if debug {
            text.push_str(&format!(
                "\nPos: {}\nChunk: {}\nWater: {:.2} | {:.2}",
                self.pos(),
                self.chunk(),
                self.water_level(),
                self.total_water_traversed()
            ));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::Biome;
    use crate::hex::HexCoordinate;
    use crate::tile::{ELEVATION_MAX, ELEVATION_MIN};

    #[test]
    fn test_elevation_gradient_ends() {
        let mut tile = Tile::new(HexCoordinate::ORIGIN);
        tile.set_elevation(ELEVATION_MIN);
        assert_eq!(tile.color(TileColorMode::Elevation), (0, 0, 0));
        tile.set_elevation(ELEVATION_MAX);
        assert_eq!(tile.color(TileColorMode::Elevation), (255, 255, 255));
    }

    #[test]
    fn test_biome_and_composite_colors() {
        let mut tile = Tile::new(HexCoordinate::ORIGIN);
        tile.set_biome(Biome::Forest);
        tile.set_elevation(ELEVATION_MAX);
        assert_eq!(tile.color(TileColorMode::Biome), Biome::Forest.color());
        // Highest ground is unshaded
        assert_eq!(tile.color(TileColorMode::Composite), Biome::Forest.color());
        tile.set_elevation(0);
        let shaded = tile.color(TileColorMode::Composite);
        assert!(shaded.1 < Biome::Forest.color().1);
    }

    #[test]
    fn test_water_level_saturates() {
        let mut tile = Tile::new(HexCoordinate::ORIGIN);
        assert_eq!(tile.color(TileColorMode::WaterLevel), (255, 255, 255));
        tile.add_water(50.0);
        assert_eq!(tile.color(TileColorMode::WaterLevel), (0, 0, 255));
    }

    #[test]
    fn test_info_text() {
        let mut tile = Tile::new(HexCoordinate::from_axial(2, -1));
        tile.set_biome(Biome::Plains);
        tile.set_elevation(14);
        tile.set_humidity(0.426);
        assert_eq!(tile.info(false), "Biome: Plains\nElevation: 14\nHumidity: 43%");

        tile.add_water(0.5);
        let debug = tile.info(true);
        assert!(debug.starts_with("Biome: Plains\n"));
        assert!(debug.contains("Pos: (2, -1, -1)"));
        assert!(debug.contains("Chunk: [0, -1]"));
        assert!(debug.contains("Water: 0.50 | 0.50"));
    }
}
