#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use grid::*;
pub use link::*;
pub use power::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod grid;
mod link;
mod power;
mod tile;
mod types;

/// An encoded level: declared size plus row-major cell bytes, top to bottom
/// then left to right.
///
/// Each byte: bit 0 = West link, bit 1 = South, bit 2 = East, bit 3 = North,
/// bit 4 = house flag, bit 5 = power-plant flag, higher bits unused. The
/// per-cell rules are checked when the grid is built; `Level` itself only
/// guarantees the cell count matches the declared size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Level {
    size: Coord2,
    cells: Vec<u8>,
}

impl Level {
    pub fn new(size: Coord2, cells: Vec<u8>) -> Result<Self> {
        if cells.len() != usize::from(mult(size.0, size.1)) {
            return Err(GameError::SizeMismatch);
        }
        Ok(Self { size, cells })
    }

    /// The classic flat encoding, `[width, height, cell, ...]`.
    pub fn from_flat(data: &[u8]) -> Result<Self> {
        let [width, height, cells @ ..] = data else {
            return Err(GameError::SizeMismatch);
        };
        Self::new((*width, *height), cells.to_vec())
    }

    /// Levels ship over the wire as the flat encoding in a JSON array.
    pub fn from_json(text: &str) -> Result<Self> {
        let data: Vec<u8> = serde_json::from_str(text).map_err(|_| GameError::MalformedLevel)?;
        Self::from_flat(&data)
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn cell(&self, x: Coord, y: Coord) -> u8 {
        self.cells[usize::from(y) * usize::from(self.size.0) + usize::from(x)]
    }
}

/// Which way the player spins a tile. The primary pointer action maps to
/// `Right` (clockwise), the secondary one to `Left`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Spin {
    Left,
    Right,
}

/// Outcome of asking the engine for a rotation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    NoChange,
    Rotated,
    Solved,
}

impl MoveOutcome {
    /// Whether this outcome could have caused an update to the game.
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            NoChange => false,
            Rotated => true,
            Solved => true,
        }
    }

    pub const fn is_solved(self) -> bool {
        matches!(self, Self::Solved)
    }
}
