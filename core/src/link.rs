use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::Direction;

bitflags! {
    /// Which compass edges of a tile carry a line, in the cell-byte bit
    /// layout of the level format.
    ///
    /// Valid tiles hold a value in [1, 14]: an empty mask has no lines and a
    /// full mask is a four-way cross, and both are rejected at construction.
    /// Rotation permutes the four bits, so neither value can appear later.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LinkMask: u8 {
        const W = 1;
        const S = 1 << 1;
        const E = 1 << 2;
        const N = 1 << 3;
    }
}

impl LinkMask {
    pub const fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::North => Self::N,
            Direction::East => Self::E,
            Direction::South => Self::S,
            Direction::West => Self::W,
        }
    }

    /// Circular left-rotate of the 4-bit field: every edge moves one step
    /// counter-clockwise (E becomes N, N becomes W, and so on).
    pub const fn rotated_left(self) -> Self {
        let bits = self.bits();
        Self::from_bits_retain(((bits << 1) | (bits >> 3)) & 0xF)
    }

    /// Inverse of [`rotated_left`](Self::rotated_left): every edge moves one
    /// step clockwise.
    pub const fn rotated_right(self) -> Self {
        let bits = self.bits();
        Self::from_bits_retain(((bits >> 1) | (bits << 3)) & 0xF)
    }

    /// Shape and display angle for this mask, `None` for the two invalid
    /// values.
    pub const fn classify(self) -> Option<(Layout, Rotation)> {
        SHAPES[self.bits() as usize]
    }

    pub const fn layout(self) -> Option<Layout> {
        match self.classify() {
            Some((layout, _)) => Some(layout),
            None => None,
        }
    }

    pub const fn rotation(self) -> Option<Rotation> {
        match self.classify() {
            Some((_, rotation)) => Some(rotation),
            None => None,
        }
    }
}

/// Rotation-invariant shape classification of a tile's live edges.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    /// Exactly one live edge, a dead-end stub.
    Straight,
    /// Two adjacent live edges.
    Elbow,
    /// Two opposite live edges.
    Through,
    /// Three live edges.
    Junction,
}

impl Layout {
    /// Glyph the presentation layer keys tile artwork on.
    pub const fn glyph(self) -> char {
        match self {
            Self::Straight => 'O',
            Self::Elbow => 'L',
            Self::Through => 'I',
            Self::Junction => 'T',
        }
    }
}

/// One of the four discrete display orientations of a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const fn degrees(self) -> u16 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }
}

/// Lookup table over all 16 mask values, replacing per-call bit matching.
/// Angles follow the clockwise N -> E -> S -> W convention: each layout's
/// reference pose (0 degrees) points north.
const SHAPES: [Option<(Layout, Rotation)>; 16] = {
    use Layout::*;
    use Rotation::*;

    [
        None,                   // 0b0000
        Some((Straight, R270)), // W
        Some((Straight, R180)), // S
        Some((Elbow, R180)),    // S|W
        Some((Straight, R90)),  // E
        Some((Through, R90)),   // E|W
        Some((Elbow, R90)),     // E|S
        Some((Junction, R90)),  // E|S|W
        Some((Straight, R0)),   // N
        Some((Elbow, R270)),    // N|W
        Some((Through, R0)),    // N|S
        Some((Junction, R180)), // N|S|W
        Some((Elbow, R0)),      // N|E
        Some((Junction, R270)), // N|E|W
        Some((Junction, R0)),   // N|E|S
        None,                   // 0b1111
    ]
};
