//! Screen geometry
//!
//! Positions and extents are signed so that relative movement coming from
//! the decoder (which may be negative or absurdly large) can be expressed
//! directly and clamped afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell coordinate, zero-indexed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Clamp into `[0, width) x [0, height)` of the given extent
    pub fn clamp_to(self, size: Extent) -> Self {
        Self {
            x: self.x.clamp(0, (size.width - 1).max(0)),
            y: self.y.clamp(0, (size.height - 1).max(0)),
        }
    }

    /// Row-major index of this position within `size`.
    ///
    /// Only meaningful for positions already clamped into `size`.
    pub fn linear(self, size: Extent) -> usize {
        self.y as usize * size.width as usize + self.x as usize
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}; {})", self.x, self.y)
    }
}

/// Screen size in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent {
    pub width: i32,
    pub height: i32,
}

impl Extent {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Number of cells, or `None` if the extent is empty, negative or too large
    pub fn cell_count(self) -> Option<usize> {
        if self.width <= 0 || self.height <= 0 {
            return None;
        }
        (self.width as usize).checked_mul(self.height as usize)
    }

    /// Bottom-right cell
    pub fn last(self) -> Position {
        Position::new(self.width - 1, self.height - 1)
    }

    pub fn contains(self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self {
            width: 80,
            height: 25,
        }
    }
}
