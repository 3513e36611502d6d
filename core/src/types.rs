use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Zero-based `(row, col)` location of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: Coord,
    pub col: Coord,
}

impl Position {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    /// Position of the `index`-th cell in row-major order on a board `width` columns wide.
    pub(crate) fn from_flat_index(index: usize, width: Coord) -> Self {
        let width = usize::from(width);
        Self {
            row: (index / width) as Coord,
            col: (index % width) as Coord,
        }
    }
}

impl From<(Coord, Coord)> for Position {
    fn from((row, col): (Coord, Coord)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Position {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.row.into(), self.col.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, pos: Position) -> NeighborIter;
}

/// Arrays are indexed `[row, col]`, so `dim()` is `(rows, cols)`.
impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, pos: Position) -> NeighborIter {
        let (rows, cols) = self.dim();
        NeighborIter::new(pos, (rows as Coord, cols as Coord))
    }
}

/// `(d_row, d_col)` offsets of the 3x3 neighbourhood, centre excluded.
const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `pos`, returning a value only when it remains in bounds.
fn apply_delta(pos: Position, delta: (i8, i8), bounds: (Coord, Coord)) -> Option<Position> {
    let (d_row, d_col) = delta;
    let (rows, cols) = bounds;

    let row = pos.row.checked_add_signed(d_row)?;
    if row >= rows {
        return None;
    }

    let col = pos.col.checked_add_signed(d_col)?;
    if col >= cols {
        return None;
    }

    Some(Position::new(row, col))
}

/// Up-to-8 neighbours of a cell, clipped to the board edges.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Position,
    bounds: (Coord, Coord),
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Position, bounds: (Coord, Coord)) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}
