use alloc::vec::Vec;

use crate::*;
pub use random::*;

mod random;

/// Strategy producing the mine layout of a new board.
pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}

/// Places mines exactly where told, used for replays and deterministic setups.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    mines: Vec<Position>,
}

impl FixedMineGenerator {
    pub fn new(mines: impl Into<Vec<Position>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    /// Duplicate positions count once, so they only pass when `config` expects fewer mines.
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        let config = config.validate()?;
        let layout = MineLayout::from_mine_coords(config, &self.mines)?;
        if layout.mine_count() != config.mines {
            log::warn!(
                "Fixed layout holds {} mines but {} were configured",
                layout.mine_count(),
                config.mines
            );
            return Err(GameError::InvalidConfiguration {
                width: config.width,
                height: config.height,
                mines: config.mines,
            });
        }
        Ok(layout)
    }
}
