use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Revealed,
    /// A revealed mine.
    Exploded,
}

impl CellState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed | Self::Exploded)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    state: CellState,
    is_mine: bool,
    adjacent_mines: Option<u8>,
}

impl Cell {
    pub(crate) const fn new(is_mine: bool) -> Self {
        Self {
            state: CellState::Hidden,
            is_mine,
            adjacent_mines: None,
        }
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    /// Cached neighbour mine count, only known once the cell was revealed.
    pub const fn adjacent_mines(&self) -> Option<u8> {
        self.adjacent_mines
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    pub(crate) fn cache_adjacent_mines(&mut self, count: u8) {
        self.adjacent_mines = Some(count);
    }

    /// What a player may know about this cell while the game is running.
    pub fn view(&self) -> CellView {
        let revealed = self.state.is_revealed();
        CellView {
            state: self.state,
            adjacent_mines: if revealed { self.adjacent_mines } else { None },
            is_mine: revealed.then_some(self.is_mine),
        }
    }
}

/// Read-only projection of a cell handed to the presentation layer.
///
/// `adjacent_mines` is only set for revealed safe cells and `is_mine` only once
/// the cell was revealed (or the game is over, see
/// [`GameSession::cell_view`](crate::GameSession::cell_view)).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub state: CellState,
    pub adjacent_mines: Option<u8>,
    pub is_mine: Option<bool>,
}
