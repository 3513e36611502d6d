//! Minesweeper board engine: mine placement, flood reveal, flag bookkeeping
//! and the win/loss state machine of a single game session.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod session;
mod types;

/// Board dimensions and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    /// Requires a non-empty board and `0 < mines < width * height`.
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(width, height, mines).validate()
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(30, 16, 99)
    }

    pub fn validate(self) -> Result<Self> {
        if self.width == 0 || self.height == 0 || self.mines == 0 || self.mines >= self.total_cells()
        {
            log::warn!(
                "Rejected configuration {}x{} with {} mines",
                self.width,
                self.height,
                self.mines
            );
            return Err(GameError::InvalidConfiguration {
                width: self.width,
                height: self.height,
                mines: self.mines,
            });
        }
        Ok(self)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    pub(crate) fn shape(&self) -> [usize; 2] {
        [self.height.into(), self.width.into()]
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::intermediate()
    }
}

/// Mine positions of one board, fixed from generation until the board is dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout from explicit positions; duplicates collapse into one mine.
    pub fn from_mine_coords(config: GameConfig, mines: &[Position]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(config.shape());

        for &pos in mines {
            if !config.contains(pos) {
                return Err(GameError::OutOfBounds(pos));
            }
            mine_mask[pos.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.width(), self.height(), self.mine_count)
    }

    pub fn validate_position(&self, pos: Position) -> Result<Position> {
        if pos.row < self.height() && pos.col < self.width() {
            Ok(pos)
        } else {
            Err(GameError::OutOfBounds(pos))
        }
    }

    pub fn width(&self) -> Coord {
        self.mine_mask.ncols() as Coord
    }

    pub fn height(&self) -> Coord {
        self.mine_mask.nrows() as Coord
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, pos: Position) -> bool {
        self[pos]
    }

    /// Mines in the bounds-clipped 3x3 neighbourhood of `pos`, `pos` excluded.
    pub fn adjacent_mine_count(&self, pos: Position) -> u8 {
        self.iter_neighbors(pos)
            .filter(|&neighbor| self.contains_mine(neighbor))
            .count() as u8
    }

    /// Mine positions in row-major order.
    pub fn mines(&self) -> Vec<Position> {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| Position::new(row as Coord, col as Coord))
            .collect()
    }

    pub(crate) fn iter_neighbors(&self, pos: Position) -> NeighborIter {
        self.mine_mask.iter_neighbors(pos)
    }
}

impl Index<Position> for MineLayout {
    type Output = bool;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.mine_mask[pos.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    /// The cell is already revealed and cannot carry a flag.
    Blocked,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Blocked => false,
            Self::Flagged => true,
            Self::Unflagged => true,
        }
    }
}

/// Cells opened by a single safe [`Board::open`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reveal {
    /// Neighbour mine count of the requested cell.
    pub adjacent_mines: u8,
    /// Every position opened by the call, requested cell first.
    pub opened: Vec<Position>,
}

impl Reveal {
    /// Whether a zero-count cell chain-opened its neighbours.
    pub fn is_chain(&self) -> bool {
        self.opened.len() > 1
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    AlreadyRevealed,
    /// The cell is flagged and must be unflagged first.
    Blocked,
    Detonated,
    Cleared(Reveal),
}

impl RevealOutcome {
    pub const fn has_update(&self) -> bool {
        use RevealOutcome::*;
        match self {
            AlreadyRevealed => false,
            Blocked => false,
            Detonated => true,
            Cleared(_) => true,
        }
    }
}
