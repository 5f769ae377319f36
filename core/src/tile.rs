use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Cell-byte flag marking a house tile.
const HOUSE: u8 = 1 << 4;
/// Cell-byte flag marking the power plant.
const POWERPLANT: u8 = 1 << 5;

/// What a tile represents besides its line segments.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Line,
    House,
    PowerPlant,
}

impl TileKind {
    pub const fn is_power_plant(self) -> bool {
        matches!(self, Self::PowerPlant)
    }
}

/// A single grid cell: its position, live edges, kind, and power state.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    coords: Coord2,
    links: LinkMask,
    kind: TileKind,
    layout: Layout,
    powered: bool,
}

impl Tile {
    /// Decodes one cell byte of the level format: the low nibble is the link
    /// mask, bit 4 the house flag, bit 5 the power-plant flag. Higher bits
    /// are unused.
    pub fn from_cell(coords: Coord2, cell: u8) -> Result<Self> {
        let (x, y) = coords;

        let links = LinkMask::from_bits_truncate(cell);
        if links.is_empty() {
            return Err(GameError::NoLinks(x, y));
        }
        if links.is_all() {
            return Err(GameError::FullCross(x, y));
        }

        let kind = if cell & HOUSE == HOUSE {
            if cell & POWERPLANT == POWERPLANT {
                return Err(GameError::HouseAndPlant(x, y));
            }
            TileKind::House
        } else if cell & POWERPLANT == POWERPLANT {
            TileKind::PowerPlant
        } else {
            TileKind::Line
        };

        let (layout, _) = links.classify().expect("mask already validated");

        Ok(Self {
            coords,
            links,
            kind,
            layout,
            powered: false,
        })
    }

    pub const fn coords(&self) -> Coord2 {
        self.coords
    }

    pub const fn x(&self) -> Coord {
        self.coords.0
    }

    pub const fn y(&self) -> Coord {
        self.coords.1
    }

    pub const fn links(&self) -> LinkMask {
        self.links
    }

    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Shape classification, fixed at construction; rotation never changes it.
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Display angle derived from the current mask.
    pub fn rotation(&self) -> Rotation {
        self.links.rotation().expect("mask valid by construction")
    }

    pub const fn is_powered(&self) -> bool {
        self.powered
    }

    pub(crate) fn set_power(&mut self, powered: bool) {
        self.powered = powered;
    }

    pub fn has_link(&self, direction: Direction) -> bool {
        self.links.intersects(LinkMask::from_direction(direction))
    }

    pub fn rotate_left(&mut self) {
        self.links = self.links.rotated_left();
    }

    pub fn rotate_right(&mut self) {
        self.links = self.links.rotated_right();
    }

    /// Whether power can flow between this tile and `other`.
    ///
    /// True for the tile itself; otherwise both tiles must be exactly one
    /// grid step apart and each must have its edge toward the other set.
    /// Symmetric in result, since the edges are always checked as an
    /// opposite pair.
    pub fn connects_to(&self, other: &Tile) -> bool {
        if self.coords == other.coords {
            return true;
        }

        let diff_x = i16::from(other.x()) - i16::from(self.x());
        let diff_y = i16::from(other.y()) - i16::from(self.y());

        let towards = match (diff_x, diff_y) {
            (1, 0) => Direction::East,
            (-1, 0) => Direction::West,
            (0, 1) => Direction::South,
            (0, -1) => Direction::North,
            _ => return false,
        };

        self.has_link(towards) && other.has_link(towards.opposite())
    }

    /// The grid-adjacent tiles power can actually flow to, in N,E,S,W order.
    pub fn connected_neighbors(&self, grid: &Grid) -> SmallVec<[Coord2; 4]> {
        grid.iter_neighbors(self.coords)
            .filter_map(|(_, pos)| grid.tile(pos))
            .filter(|other| self.connects_to(other))
            .map(Tile::coords)
            .collect()
    }
}
