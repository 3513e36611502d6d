use alloc::vec;
use alloc::vec::Vec;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Grid of cells over a fixed mine layout.
///
/// The board only knows how cells change; deciding when a game is over is left
/// to [`GameSession`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    mine_layout: MineLayout,
    cells: Array2<Cell>,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
}

impl Board {
    /// Validates `config` and places its mines uniformly at random from `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomMineGenerator::new(seed))
    }

    pub fn with_generator(config: GameConfig, generator: impl MineGenerator) -> Result<Self> {
        Self::from_layout(generator.generate(config)?)
    }

    /// Builds a board over `mine_layout`, which must leave at least one mine and one safe cell.
    pub fn from_layout(mine_layout: MineLayout) -> Result<Self> {
        mine_layout.game_config().validate()?;
        let cells = Array2::from_shape_fn(
            (usize::from(mine_layout.height()), usize::from(mine_layout.width())),
            |(row, col)| {
                Cell::new(mine_layout.contains_mine(Position::new(row as Coord, col as Coord)))
            },
        );
        Ok(Self {
            mine_layout,
            cells,
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
        })
    }

    pub fn config(&self) -> GameConfig {
        self.mine_layout.game_config()
    }

    pub fn width(&self) -> Coord {
        self.mine_layout.width()
    }

    pub fn height(&self) -> Coord {
        self.mine_layout.height()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    /// Every safe cell has been revealed.
    pub fn is_cleared(&self) -> bool {
        self.revealed_count.0 == self.mine_layout.safe_cell_count()
    }

    /// Whether any mine has been revealed.
    pub fn has_exploded(&self) -> bool {
        self.cells
            .iter()
            .any(|cell| cell.state() == CellState::Exploded)
    }

    pub fn cell(&self, pos: Position) -> Result<&Cell> {
        let pos = self.mine_layout.validate_position(pos)?;
        Ok(&self.cells[pos.to_nd_index()])
    }

    pub fn cell_view(&self, pos: Position) -> Result<CellView> {
        self.cell(pos).map(Cell::view)
    }

    /// Mine positions in row-major order.
    pub fn all_mines(&self) -> Vec<Position> {
        self.mine_layout.mines()
    }

    /// All positions in row-major order.
    pub fn iter_positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (height, width) = (self.height(), self.width());
        (0..height).flat_map(move |row| (0..width).map(move |col| Position::new(row, col)))
    }

    pub fn count_adjacent_mines(&self, pos: Position) -> Result<u8> {
        let pos = self.mine_layout.validate_position(pos)?;
        Ok(self.mine_layout.adjacent_mine_count(pos))
    }

    pub fn toggle_flag(&mut self, pos: Position) -> Result<FlagOutcome> {
        use CellState::*;

        let pos = self.mine_layout.validate_position(pos)?;
        let cell = &mut self.cells[pos.to_nd_index()];

        let outcome = match cell.state() {
            Hidden => {
                cell.set_state(Flagged);
                self.flagged_count += 1;
                FlagOutcome::Flagged
            }
            Flagged => {
                cell.set_state(Hidden);
                self.flagged_count -= 1;
                FlagOutcome::Unflagged
            }
            Revealed | Exploded => FlagOutcome::Blocked,
        };
        log::debug!("Toggle flag at {}: {:?}", pos, outcome);
        Ok(outcome)
    }

    /// Opens a cell, flood-filling outwards from cells with no adjacent mines.
    pub fn open(&mut self, pos: Position) -> Result<RevealOutcome> {
        use CellState::*;

        let pos = self.mine_layout.validate_position(pos)?;
        let cell = self.cells[pos.to_nd_index()];

        match cell.state() {
            Revealed | Exploded => return Ok(RevealOutcome::AlreadyRevealed),
            Flagged => return Ok(RevealOutcome::Blocked),
            Hidden => {}
        }

        if cell.is_mine() {
            self.cells[pos.to_nd_index()].set_state(Exploded);
            self.revealed_count += 1;
            log::debug!("Detonated mine at {}", pos);
            return Ok(RevealOutcome::Detonated);
        }

        let adjacent_mines = self.reveal_safe_cell(pos);
        log::debug!("Open cell at {}, mine count: {}", pos, adjacent_mines);
        let mut opened = vec![pos];

        if adjacent_mines == 0 {
            // cells are marked revealed before being queued, so none is visited twice
            let mut to_visit = vec![pos];
            while let Some(visit_pos) = to_visit.pop() {
                for neighbor in self.mine_layout.iter_neighbors(visit_pos) {
                    if self.cells[neighbor.to_nd_index()].state() != Hidden {
                        continue;
                    }

                    let neighbor_mines = self.reveal_safe_cell(neighbor);
                    opened.push(neighbor);
                    log::trace!(
                        "Flood opened cell at {}, mine count: {}",
                        neighbor,
                        neighbor_mines
                    );

                    if neighbor_mines == 0 {
                        to_visit.push(neighbor);
                    }
                }
            }
            log::debug!("Flood fill from {} opened {} cells", pos, opened.len());
        }

        Ok(RevealOutcome::Cleared(Reveal {
            adjacent_mines,
            opened,
        }))
    }

    /// Reveals a hidden cell known to be safe and returns its cached count.
    fn reveal_safe_cell(&mut self, pos: Position) -> u8 {
        let adjacent_mines = match self.cells[pos.to_nd_index()].adjacent_mines() {
            Some(count) => count,
            None => self.mine_layout.adjacent_mine_count(pos),
        };

        let cell = &mut self.cells[pos.to_nd_index()];
        debug_assert!(!cell.is_mine() && cell.state() == CellState::Hidden);
        cell.cache_adjacent_mines(adjacent_mines);
        cell.set_state(CellState::Revealed);
        self.revealed_count += 1;
        adjacent_mines
    }
}
