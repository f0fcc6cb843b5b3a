//! Biome classification for tiles.

use crate::display::Rgb;

/// Terrain class of a tile. `None` means no stage has classified it yet.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum Biome {
    #[default]
    None,
    Ocean,
    Lake,
    Beach,
    Plains,
    Forest,
    Desert,
}

impl Biome {
    pub fn all() -> &'static [Biome] {
        &[
            Biome::None,
            Biome::Ocean,
            Biome::Lake,
            Biome::Beach,
            Biome::Plains,
            Biome::Forest,
            Biome::Desert,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Biome::None => "None",
            Biome::Ocean => "Ocean",
            Biome::Lake => "Lake",
            Biome::Beach => "Beach",
            Biome::Plains => "Plains",
            Biome::Forest => "Forest",
            Biome::Desert => "Desert",
        }
    }

    /// Ocean and lake tiles. They never hold standing water of their own.
    pub fn is_water(&self) -> bool {
        matches!(self, Biome::Ocean | Biome::Lake)
    }

    pub fn is_land(&self) -> bool {
        matches!(self, Biome::Beach | Biome::Plains | Biome::Forest | Biome::Desert)
    }

    /// Base color used by the biome and composite display modes.
    pub fn color(&self) -> Rgb {
        match self {
            Biome::None => (0, 0, 0),
            Biome::Ocean => (20, 60, 140),
            Biome::Lake => (60, 120, 200),
            Biome::Beach => (230, 215, 160),
            Biome::Plains => (140, 190, 80),
            Biome::Forest => (40, 110, 50),
            Biome::Desert => (220, 190, 110),
        }
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_and_land_are_disjoint() {
        for biome in Biome::all() {
            assert!(!(biome.is_water() && biome.is_land()), "{biome}");
        }
        assert!(!Biome::None.is_water());
        assert!(!Biome::None.is_land());
        assert_eq!(Biome::default(), Biome::None);
    }
}
