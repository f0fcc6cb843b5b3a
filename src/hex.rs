//! Cube coordinates for a hexagonal grid.
//!
//! Every coordinate satisfies `x + y + z == 0`. The y axis points north and
//! the six directions are listed clockwise starting there, so a direction's
//! neighbors in [`HexDirection::ALL`] are also its neighbors on the grid.

use std::fmt;
use std::ops::Add;

use crate::error::{WorldGenError, WorldResult};

/// Position of a hex tile in cube coordinates.
///
/// Ordering is lexicographic on `(x, y, z)`. Collections keyed by coordinate
/// rely on it to iterate in the same order on every run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexCoordinate {
    x: i32,
    y: i32,
    z: i32,
}

impl HexCoordinate {
    pub const ORIGIN: HexCoordinate = HexCoordinate { x: 0, y: 0, z: 0 };

    /// Build a coordinate from all three components, checking the cube invariant.
    pub fn new(x: i32, y: i32, z: i32) -> WorldResult<Self> {
        if x + y + z != 0 {
            return Err(WorldGenError::InvalidCoordinate { x, y, z });
        }
        Ok(Self { x, y, z })
    }

    /// Build a coordinate from x and y, deriving z.
    pub const fn from_axial(x: i32, y: i32) -> Self {
        Self { x, y, z: -x - y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn z(&self) -> i32 {
        self.z
    }

    /// The coordinate one step away in `dir`.
    pub fn neighbor(&self, dir: HexDirection) -> Self {
        *self + dir.offset()
    }

    /// All six neighboring coordinates, whether or not they exist in any world.
    pub fn neighbors(self) -> impl Iterator<Item = (HexDirection, HexCoordinate)> {
        HexDirection::ALL.iter().map(move |&dir| (dir, self.neighbor(dir)))
    }

    /// Number of steps between two tiles.
    pub fn distance_to(&self, other: HexCoordinate) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        let dz = (self.z - other.z).unsigned_abs();
        dx.max(dy).max(dz)
    }

    pub fn is_adjacent_to(&self, other: HexCoordinate) -> bool {
        self.distance_to(other) == 1
    }

    /// Direction from this tile to an adjacent one, `None` if not adjacent.
    pub fn direction_to(&self, other: HexCoordinate) -> Option<HexDirection> {
        HexDirection::ALL
            .iter()
            .copied()
            .find(|&dir| self.neighbor(dir) == other)
    }

    /// Every coordinate within `radius` steps of the origin, in ascending order.
    ///
    /// There are `3r(r+1) + 1` of them.
    pub fn within_radius(radius: u32) -> Vec<HexCoordinate> {
        let r = radius as i32;
        (-r..=r)
            .flat_map(|x| {
                let lo = (-r).max(-x - r);
                let hi = r.min(-x + r);
                (lo..=hi).map(move |y| Self::from_axial(x, y))
            })
            .collect()
    }

    /// Round fractional cube coordinates to the nearest tile.
    ///
    /// The component that moved the most while rounding is re-derived from
    /// the other two so the result always satisfies the cube invariant.
    pub fn round(fx: f64, fy: f64, fz: f64) -> Self {
        let mut rx = fx.round();
        let mut ry = fy.round();
        let mut rz = fz.round();

        let dx = (rx - fx).abs();
        let dy = (ry - fy).abs();
        let dz = (rz - fz).abs();

        if dx > dy && dx > dz {
            rx = -ry - rz;
        } else if dy > dz {
            ry = -rx - rz;
        } else {
            rz = -rx - ry;
        }

        Self {
            x: rx as i32,
            y: ry as i32,
            z: rz as i32,
        }
    }

    /// Center of this tile on a plane where tiles have unit radius.
    ///
    /// x grows to the east, y grows to the south (screen convention).
    pub fn to_planar(&self) -> (f64, f64) {
        let px = 1.5 * self.x as f64;
        let py = -(3.0f64).sqrt() * (self.x as f64 / 2.0 + self.y as f64);
        (px, py)
    }
}

impl Add for HexCoordinate {
    type Output = HexCoordinate;

    fn add(self, rhs: HexCoordinate) -> HexCoordinate {
        HexCoordinate {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl fmt::Display for HexCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// One of the six directions out of a hex tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HexDirection {
    North = 0,
    NorthEast = 1,
    SouthEast = 2,
    South = 3,
    SouthWest = 4,
    NorthWest = 5,
}

impl HexDirection {
    /// All directions, clockwise from north.
    pub const ALL: [HexDirection; 6] = [
        HexDirection::North,
        HexDirection::NorthEast,
        HexDirection::SouthEast,
        HexDirection::South,
        HexDirection::SouthWest,
        HexDirection::NorthWest,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Unit step in this direction.
    pub fn offset(self) -> HexCoordinate {
        match self {
            HexDirection::North => HexCoordinate::from_axial(0, 1),
            HexDirection::NorthEast => HexCoordinate::from_axial(1, 0),
            HexDirection::SouthEast => HexCoordinate::from_axial(1, -1),
            HexDirection::South => HexCoordinate::from_axial(0, -1),
            HexDirection::SouthWest => HexCoordinate::from_axial(-1, 0),
            HexDirection::NorthWest => HexCoordinate::from_axial(-1, 1),
        }
    }

    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 3) % 6]
    }

    /// The two directions that share an edge of the hexagon with this one.
    pub fn adjacent_directions(self) -> [HexDirection; 2] {
        [Self::ALL[(self.index() + 5) % 6], Self::ALL[(self.index() + 1) % 6]]
    }

    pub fn is_adjacent_to(self, other: HexDirection) -> bool {
        self.adjacent_directions().contains(&other)
    }

    pub fn name(self) -> &'static str {
        match self {
            HexDirection::North => "north",
            HexDirection::NorthEast => "north-east",
            HexDirection::SouthEast => "south-east",
            HexDirection::South => "south",
            HexDirection::SouthWest => "south-west",
            HexDirection::NorthWest => "north-west",
        }
    }
}

/// A small map keyed by direction, holding at most one value per direction.
///
/// Iterates in [`HexDirection::ALL`] order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectionMap<T> {
    slots: [Option<T>; 6],
}

impl<T> Default for DirectionMap<T> {
    fn default() -> Self {
        Self {
            slots: [None, None, None, None, None, None],
        }
    }
}

impl<T> DirectionMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dir: HexDirection, value: T) -> Option<T> {
        self.slots[dir.index()].replace(value)
    }

    pub fn get(&self, dir: HexDirection) -> Option<&T> {
        self.slots[dir.index()].as_ref()
    }

    pub fn remove(&mut self, dir: HexDirection) -> Option<T> {
        self.slots[dir.index()].take()
    }

    pub fn contains(&self, dir: HexDirection) -> bool {
        self.slots[dir.index()].is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = (HexDirection, &T)> + '_ {
        HexDirection::ALL
            .iter()
            .zip(self.slots.iter())
            .filter_map(|(&dir, slot)| slot.as_ref().map(|value| (dir, value)))
    }

    pub fn keys(&self) -> impl Iterator<Item = HexDirection> + '_ {
        self.iter().map(|(dir, _)| dir)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter().map(|(_, value)| value)
    }
}

impl<T> FromIterator<(HexDirection, T)> for DirectionMap<T> {
    fn from_iter<I: IntoIterator<Item = (HexDirection, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (dir, value) in iter {
            map.insert(dir, value);
        }
        map
    }
}
