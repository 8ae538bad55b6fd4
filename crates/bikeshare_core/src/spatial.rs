//! Grid geometry: station coordinates and the two distance metrics the model uses.
//!
//! Travel happens along city blocks, so trip length is Manhattan distance.
//! Euclidean distance is only used to pick the nearest alternate station on a
//! redirect.

/// Length of one block in miles.
pub const BLOCK_LENGTH_MILES: f64 = 0.05;

/// Riding time for one block in simulation minutes.
pub const MINUTES_PER_BLOCK: f64 = 0.5;

/// Integer intersection coordinate on the street grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Riding distance between two intersections in blocks.
pub fn manhattan_blocks(a: GridCoord, b: GridCoord) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Straight-line distance between two intersections, in block units.
pub fn euclidean_distance(a: GridCoord, b: GridCoord) -> f64 {
    f64::from(a.x - b.x).hypot(f64::from(a.y - b.y))
}
