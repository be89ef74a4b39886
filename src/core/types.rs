//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Grid position of a tile (column `x`, row `y`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: usize,
    pub y: usize,
}

impl TileCoord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance in tile steps
    pub fn manhattan(&self, other: &TileCoord) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Straight-line Manhattan path: fully along x first, then fully along y.
    ///
    /// Both endpoints are included. A zero-length path yields just `self`.
    pub fn manhattan_path(&self, dest: &TileCoord) -> Vec<TileCoord> {
        let mut path = Vec::with_capacity(self.manhattan(dest) + 1);
        path.push(*self);

        let mut x = self.x;
        while x != dest.x {
            x = if dest.x > x { x + 1 } else { x - 1 };
            path.push(TileCoord::new(x, self.y));
        }

        let mut y = self.y;
        while y != dest.y {
            y = if dest.y > y { y + 1 } else { y - 1 };
            path.push(TileCoord::new(dest.x, y));
        }

        path
    }

    /// Step one tile in a cardinal direction, if that stays non-negative
    pub fn step(&self, direction: Direction) -> Option<TileCoord> {
        let (dx, dy) = direction.offset();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(TileCoord::new(x, y))
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four cardinal directions used for flood fill and AI steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
        }
    }
}

/// Unique identifier for units (monotonically assigned, starting at 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier for civilizations (index into the game's civilization list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CivId(pub u32);

impl CivId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Turn counter
pub type Turn = u32;
