use thiserror::Error;

use crate::Coord;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cell data does not match the declared grid size")]
    SizeMismatch,
    #[error("Level is not a flat array of cell bytes")]
    MalformedLevel,
    #[error("Tile {0}|{1} has no live edges")]
    NoLinks(Coord, Coord),
    #[error("Tile {0}|{1} is a full cross")]
    FullCross(Coord, Coord),
    #[error("Tile {0}|{1} is both a house and a power plant")]
    HouseAndPlant(Coord, Coord),
    #[error("Level has no power plant")]
    NoPowerPlant,
    #[error("Tile {0}|{1} is a second power plant")]
    SecondPowerPlant(Coord, Coord),
}

pub type Result<T> = core::result::Result<T, GameError>;
