use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size rectangular field of tiles, owning every tile exclusively.
///
/// Construction validates each cell byte and requires exactly one power
/// plant; afterwards only rotation and the power pass mutate tiles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    tiles: Array2<Tile>,
    plant: Coord2,
}

impl Grid {
    /// Builds the grid row by row from the level's cell bytes, in load
    /// order = spatial order.
    pub fn from_level(level: &Level) -> Result<Self> {
        let (width, height) = level.size();

        let mut tiles = Vec::with_capacity(level.cells().len());
        let mut plant = None;
        for y in 0..height {
            for x in 0..width {
                let tile = Tile::from_cell((x, y), level.cell(x, y))?;
                if tile.kind().is_power_plant() {
                    if plant.is_some() {
                        return Err(GameError::SecondPowerPlant(x, y));
                    }
                    plant = Some((x, y));
                }
                tiles.push(tile);
            }
        }

        let plant = plant.ok_or(GameError::NoPowerPlant)?;
        let tiles = Array2::from_shape_vec((height as usize, width as usize), tiles)
            .expect("row-major cell count matches the validated size");

        Ok(Self { tiles, plant })
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.tiles.dim();
        (dim.1.try_into().unwrap(), dim.0.try_into().unwrap())
    }

    pub fn total_tiles(&self) -> CellCount {
        self.tiles.len().try_into().unwrap()
    }

    /// Bounds-safe lookup; `None` outside the grid.
    pub fn tile(&self, coords: Coord2) -> Option<&Tile> {
        self.tiles.get(coords.to_nd_index())
    }

    pub(crate) fn tile_mut(&mut self, coords: Coord2) -> Option<&mut Tile> {
        self.tiles.get_mut(coords.to_nd_index())
    }

    /// The adjacent tile in `direction`, if there is one.
    pub fn neighbor(&self, coords: Coord2, direction: Direction) -> Option<&Tile> {
        let pos = apply_delta(coords, direction.delta(), self.size())?;
        self.tile(pos)
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.tiles.iter_neighbors(coords)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }

    /// Where the single power plant sits.
    pub fn plant_coords(&self) -> Coord2 {
        self.plant
    }

    pub fn powered_count(&self) -> CellCount {
        self.tiles()
            .filter(|tile| tile.is_powered())
            .count()
            .try_into()
            .unwrap()
    }

    /// The solved predicate: every tile reaches the power plant.
    pub fn is_fully_powered(&self) -> bool {
        self.tiles().all(Tile::is_powered)
    }
}

impl Index<Coord2> for Grid {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.tiles[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const PLANT: u8 = 1 << 5;

    fn grid(flat: &[u8]) -> Grid {
        Grid::from_level(&Level::from_flat(flat).unwrap()).unwrap()
    }

    #[test]
    fn from_level_places_tiles_in_row_major_order() {
        let grid = grid(&[2, 2, 4 | PLANT, 1, 2, 8]);

        assert_eq!(grid.size(), (2, 2));
        assert_eq!(grid.total_tiles(), 4);
        assert_eq!(grid[(1, 0)].links(), LinkMask::W);
        assert_eq!(grid[(0, 1)].links(), LinkMask::S);
        assert_eq!(grid[(1, 1)].links(), LinkMask::N);
    }

    #[test]
    fn from_level_locates_the_power_plant() {
        let grid = grid(&[2, 1, 4, 1 | PLANT]);

        assert_eq!(grid.plant_coords(), (1, 0));
        assert_eq!(grid[(1, 0)].kind(), TileKind::PowerPlant);
    }

    #[test]
    fn from_level_rejects_missing_or_duplicate_plants() {
        let no_plant = Level::from_flat(&[2, 1, 4, 1]).unwrap();
        assert_eq!(Grid::from_level(&no_plant), Err(GameError::NoPowerPlant));

        let two_plants = Level::from_flat(&[2, 1, 4 | PLANT, 1 | PLANT]).unwrap();
        assert_eq!(
            Grid::from_level(&two_plants),
            Err(GameError::SecondPowerPlant(1, 0))
        );
    }

    #[test]
    fn from_level_reports_the_offending_tile() {
        let bad_mask = Level::new((2, 1), vec![4 | PLANT, 0]).unwrap();
        assert_eq!(Grid::from_level(&bad_mask), Err(GameError::NoLinks(1, 0)));
    }

    #[test]
    fn tile_lookup_is_bounds_safe() {
        let grid = grid(&[2, 1, 4 | PLANT, 1]);

        assert!(grid.tile((1, 0)).is_some());
        assert_eq!(grid.tile((2, 0)), None);
        assert_eq!(grid.tile((0, 1)), None);
    }

    #[test]
    fn neighbor_lookup_follows_directions() {
        let grid = grid(&[2, 2, 4 | PLANT, 1, 2, 8]);

        let east = grid.neighbor((0, 0), Direction::East).unwrap();
        assert_eq!(east.coords(), (1, 0));

        let south = grid.neighbor((0, 0), Direction::South).unwrap();
        assert_eq!(south.coords(), (0, 1));

        assert!(grid.neighbor((0, 0), Direction::North).is_none());
        assert!(grid.neighbor((0, 0), Direction::West).is_none());
    }

    #[test]
    fn connected_neighbors_reports_mutual_links_only() {
        // plant E-W pair on the top row; the bottom tiles face nobody
        let grid = grid(&[2, 2, 4 | PLANT, 1, 2, 8]);

        let plant_neighbors = grid[(0, 0)].connected_neighbors(&grid);
        assert_eq!(plant_neighbors.as_slice(), &[(1, 0)]);

        assert!(grid[(0, 1)].connected_neighbors(&grid).is_empty());
        assert!(grid[(1, 1)].connected_neighbors(&grid).is_empty());
    }

    #[test]
    fn connected_neighbors_sees_vertical_links() {
        let grid = grid(&[1, 2, 2 | PLANT, 8]);

        assert_eq!(
            grid[(0, 0)].connected_neighbors(&grid).as_slice(),
            &[(0, 1)]
        );
        assert_eq!(
            grid[(0, 1)].connected_neighbors(&grid).as_slice(),
            &[(0, 0)]
        );
    }
}
