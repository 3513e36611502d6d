//! Text rendering of a game session.

use std::fmt;
use termsweeper_core::{CellState, CellView, GameSession, GameStatus, Position};

const HIDDEN: char = '·';
const FLAGGED: char = '⚑';
const MINE: char = '✷';

/// Mines counter, status face, elapsed seconds and the grid with row and column labels.
pub struct SessionView<'a> {
    pub session: &'a GameSession,
    pub elapsed_secs: u32,
}

pub fn face(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Playing => "🙂",
        GameStatus::Won => "😎",
        GameStatus::Lost => "😵",
    }
}

fn glyph(view: CellView) -> char {
    match (view.state, view.adjacent_mines) {
        (CellState::Hidden, _) => HIDDEN,
        (CellState::Flagged, _) => FLAGGED,
        (CellState::Exploded, _) => MINE,
        (CellState::Revealed, Some(0) | None) => ' ',
        (CellState::Revealed, Some(count)) => char::from(b'0' + count),
    }
}

impl fmt::Display for SessionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.session;
        let board = session.board();

        writeln!(
            f,
            "{:03}  {}  {:03}",
            session.mines_left(),
            face(session.status()),
            self.elapsed_secs
        )?;

        write!(f, "   ")?;
        for col in 0..board.width() {
            write!(f, "{col:>3}")?;
        }
        writeln!(f)?;

        for row in 0..board.height() {
            write!(f, "{row:>3}")?;
            for col in 0..board.width() {
                let view = session
                    .cell_view(Position::new(row, col))
                    .map_err(|_| fmt::Error)?;
                write!(f, "  {}", glyph(view))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
