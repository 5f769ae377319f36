use ndarray::Array2;

/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Count type used for tile totals and powered-tile counts.
pub type CellCount = u16;

/// Count type for the running move counter.
pub type MoveCount = u32;

/// Two-dimensional coordinates `(x, y)`; `y` grows downward.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

/// Rows are stored row-major, so `(x, y)` becomes `[y, x]`.
impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// The four compass edges of a tile, in the conventional N,E,S,W scan order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let dim = self.dim();
        let size = (dim.1.try_into().unwrap(), dim.0.try_into().unwrap());
        NeighborIter::new(index, size)
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
pub(crate) fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Iterates the up-to-4 orthogonal neighbors of a cell, with the direction
/// they lie in.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = (Direction, Coord2);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= Direction::ALL.len() {
                return None;
            }

            let direction = Direction::ALL[self.index as usize];
            self.index += 1;

            if let Some(next) = apply_delta(self.center, direction.delta(), self.bounds) {
                return Some((direction, next));
            }
        }
    }
}
