//! Pixel geometry for drawing flat-topped hex tiles.

use crate::hex::HexCoordinate;

/// Maps tile coordinates to pixel positions and back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexLayout {
    tile_radius: f64,
    origin: (f64, f64),
}

impl HexLayout {
    pub const MIN_TILE_RADIUS: f64 = 10.0;
    pub const MAX_TILE_RADIUS: f64 = 200.0;

    /// `origin` is the pixel position of the center of tile (0, 0, 0).
    pub fn new(tile_radius: f64, origin: (f64, f64)) -> Self {
        Self {
            tile_radius: tile_radius.clamp(Self::MIN_TILE_RADIUS, Self::MAX_TILE_RADIUS),
            origin,
        }
    }

    pub fn tile_radius(&self) -> f64 {
        self.tile_radius
    }

    /// Zoom in or out. The radius is clamped to the supported range.
    pub fn set_tile_radius(&mut self, radius: f64) {
        self.tile_radius = radius.clamp(Self::MIN_TILE_RADIUS, Self::MAX_TILE_RADIUS);
    }

    pub fn tile_width(&self) -> f64 {
        self.tile_radius * 2.0
    }

    pub fn tile_height(&self) -> f64 {
        3.0f64.sqrt() * self.tile_radius
    }

    pub fn tile_to_pixel(&self, pos: HexCoordinate) -> (f64, f64) {
        let (px, py) = pos.to_planar();
        (
            px * self.tile_radius + self.origin.0,
            py * self.tile_radius + self.origin.1,
        )
    }

    /// The tile under a pixel.
    pub fn pixel_to_tile(&self, pixel: (f64, f64)) -> HexCoordinate {
        let sx = pixel.0 - self.origin.0;
        let sy = pixel.1 - self.origin.1;
        let fx = sx * 2.0 / (3.0 * self.tile_radius);
        let fy = -(sx + 3.0f64.sqrt() * sy) / (3.0 * self.tile_radius);
        HexCoordinate::round(fx, fy, -fx - fy)
    }

    /// Corner positions of a tile, clockwise from the east corner.
    pub fn vertices(&self, pos: HexCoordinate) -> [(f64, f64); 6] {
        let (cx, cy) = self.tile_to_pixel(pos);
        let half_width = self.tile_width() / 2.0;
        let quarter_width = self.tile_width() / 4.0;
        let half_height = self.tile_height() / 2.0;
        [
            (cx + half_width, cy),
            (cx + quarter_width, cy + half_height),
            (cx - quarter_width, cy + half_height),
            (cx - half_width, cy),
            (cx - quarter_width, cy - half_height),
            (cx + quarter_width, cy - half_height),
        ]
    }
}
