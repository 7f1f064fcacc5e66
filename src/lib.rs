pub mod actors;
pub mod clock;
pub mod config;
pub mod neighborhood;
pub mod registry;
pub mod report;
pub mod scenario;
pub mod simulation;
pub mod util;

use serde::{Deserialize, Serialize};

/// Number of houses in a standard neighborhood file
pub const NUM_HOUSES: usize = 10;

/// A point on the neighborhood grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two grid points
    pub fn manhattan_distance(&self, other: &Position) -> u64 {
        u64::from(self.x.abs_diff(other.x)) + u64::from(self.y.abs_diff(other.y))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
