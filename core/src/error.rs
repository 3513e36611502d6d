use thiserror::Error;

use crate::{CellCount, Coord, Position};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: a {width}x{height} board cannot hold {mines} mines")]
    InvalidConfiguration {
        width: Coord,
        height: Coord,
        mines: CellCount,
    },
    #[error("Position {0} is outside the board")]
    OutOfBounds(Position),
    #[error("Game already ended, no new moves are accepted")]
    SessionOver,
}

pub type Result<T> = core::result::Result<T, GameError>;
