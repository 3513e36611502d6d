use alloc::vec::Vec;
use rand::{RngCore, SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
///
/// Any state goes back to `Playing` through a reset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Player intent translated by the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Open,
    Flag,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Open(RevealOutcome),
    Flag(FlagOutcome),
}

impl ActionOutcome {
    pub fn has_update(&self) -> bool {
        match self {
            Self::Open(outcome) => outcome.has_update(),
            Self::Flag(outcome) => outcome.has_update(),
        }
    }
}

/// One play-through from a fresh mine layout to a win or a loss.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    status: GameStatus,
    triggered_mine: Option<Position>,
    seeds: SmallRng,
}

impl GameSession {
    /// Starts a game on a random layout; later resets draw their layouts from the same `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let mut seeds = SmallRng::seed_from_u64(seed);
        let board = Board::new(config, seeds.next_u64())?;
        Ok(Self::with_seeds(board, seeds))
    }

    /// Continues a game on an existing board, e.g. one built from a fixed layout.
    pub fn from_board(board: Board, seed: u64) -> Self {
        Self::with_seeds(board, SmallRng::seed_from_u64(seed))
    }

    fn with_seeds(board: Board, seeds: SmallRng) -> Self {
        let status = if board.has_exploded() {
            GameStatus::Lost
        } else if board.is_cleared() {
            GameStatus::Won
        } else {
            GameStatus::Playing
        };
        let triggered_mine = board
            .iter_positions()
            .find(|&pos| matches!(board.cell(pos), Ok(cell) if cell.state() == CellState::Exploded));
        Self {
            board,
            status,
            triggered_mine,
            seeds,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.board.config()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.board.revealed_count()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.board.flagged_count()
    }

    pub fn mine_count(&self) -> CellCount {
        self.board.mine_count()
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> isize {
        (self.board.mine_count() as isize) - (self.board.flagged_count() as isize)
    }

    /// The mine whose detonation lost the game.
    pub fn triggered_mine(&self) -> Option<Position> {
        self.triggered_mine
    }

    pub fn all_mines(&self) -> Vec<Position> {
        self.board.all_mines()
    }

    /// Cell as it should be displayed.
    ///
    /// Once the game is over every mine is disclosed: after a loss unflagged
    /// mines read as `Exploded`, after a win they read as `Flagged`. The
    /// board's own counters are left untouched.
    pub fn cell_view(&self, pos: Position) -> Result<CellView> {
        let cell = self.board.cell(pos)?;
        let mut view = cell.view();

        let disclosed_state = match self.status {
            GameStatus::Playing => return Ok(view),
            GameStatus::Won => CellState::Flagged,
            GameStatus::Lost => CellState::Exploded,
        };
        if cell.is_mine() && cell.state() == CellState::Hidden {
            view.state = disclosed_state;
        }
        view.is_mine = Some(cell.is_mine());
        Ok(view)
    }

    pub fn handle(&mut self, pos: Position, action: Action) -> Result<ActionOutcome> {
        match action {
            Action::Open => self.handle_open(pos).map(ActionOutcome::Open),
            Action::Flag => self.handle_flag(pos).map(ActionOutcome::Flag),
        }
    }

    pub fn handle_open(&mut self, pos: Position) -> Result<RevealOutcome> {
        self.check_playing()?;

        let outcome = self.board.open(pos)?;
        match outcome {
            RevealOutcome::Detonated => {
                self.triggered_mine = Some(pos);
                self.end_game(GameStatus::Lost);
            }
            RevealOutcome::Cleared(_) if self.board.is_cleared() => {
                self.end_game(GameStatus::Won);
            }
            _ => {}
        }
        Ok(outcome)
    }

    pub fn handle_flag(&mut self, pos: Position) -> Result<FlagOutcome> {
        self.check_playing()?;
        self.board.toggle_flag(pos)
    }

    /// Replaces the board with a freshly generated one.
    ///
    /// An invalid `config` is rejected and leaves the current game as it was.
    pub fn reset(&mut self, config: GameConfig) -> Result<()> {
        let board = Board::new(config, self.seeds.next_u64())?;
        self.board = board;
        self.status = GameStatus::Playing;
        self.triggered_mine = None;
        log::debug!(
            "Reset to {}x{} with {} mines",
            config.width,
            config.height,
            config.mines
        );
        Ok(())
    }

    /// Resets with the current dimensions and mine count.
    pub fn restart(&mut self) -> Result<()> {
        self.reset(self.config())
    }

    fn end_game(&mut self, status: GameStatus) {
        debug_assert!(status.is_finished());
        log::debug!(
            "Game ended {:?} with {} of {} safe cells revealed",
            status,
            self.board.revealed_count(),
            self.board.mine_layout().safe_cell_count()
        );
        self.status = status;
    }

    fn check_playing(&self) -> Result<()> {
        if self.status.is_playing() {
            Ok(())
        } else {
            Err(GameError::SessionOver)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(width: Coord, height: Coord, mines: &[Position]) -> GameSession {
        let config = GameConfig::new_unchecked(width, height, mines.len() as CellCount);
        let layout = MineLayout::from_mine_coords(config, mines).unwrap();
        GameSession::from_board(Board::from_layout(layout).unwrap(), 0)
    }

    #[test]
    fn opening_mine_loses() {
        let mine = Position::new(0, 0);
        let mut session = session(2, 2, &[mine]);

        assert_eq!(session.handle_open(mine), Ok(RevealOutcome::Detonated));
        assert_eq!(session.status(), GameStatus::Lost);
        assert_eq!(session.triggered_mine(), Some(mine));
        assert!(session.is_finished());
    }

    #[test]
    fn moves_after_loss_are_rejected() {
        let mut session = session(3, 3, &[Position::new(0, 0)]);
        session.handle_open(Position::new(0, 0)).unwrap();
        let before = session.board().clone();

        assert_eq!(
            session.handle_open(Position::new(2, 2)),
            Err(GameError::SessionOver)
        );
        assert_eq!(
            session.handle_flag(Position::new(2, 2)),
            Err(GameError::SessionOver)
        );
        assert_eq!(session.board(), &before);
        assert_eq!(session.revealed_count(), 1);
    }

    #[test]
    fn flood_fill_wins() {
        let mut session = session(3, 3, &[Position::new(0, 0)]);

        let outcome = session.handle_open(Position::new(2, 2)).unwrap();

        assert!(matches!(outcome, RevealOutcome::Cleared(ref reveal) if reveal.opened.len() == 8));
        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(session.triggered_mine(), None);
    }

    #[test]
    fn numbered_open_keeps_playing() {
        let mut session = session(3, 3, &[Position::new(0, 0)]);

        session.handle_open(Position::new(1, 1)).unwrap();

        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.revealed_count(), 1);
    }

    #[test]
    fn flagging_never_changes_status() {
        let mut session = session(2, 1, &[Position::new(0, 0)]);

        assert_eq!(
            session.handle_flag(Position::new(0, 0)),
            Ok(FlagOutcome::Flagged)
        );
        assert_eq!(
            session.handle_flag(Position::new(0, 1)),
            Ok(FlagOutcome::Flagged)
        );
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.mines_left(), -1);
    }

    #[test]
    fn handle_dispatches_actions() {
        let mut session = session(2, 1, &[Position::new(0, 0)]);

        let flagged = session.handle(Position::new(0, 0), Action::Flag).unwrap();
        assert_eq!(flagged, ActionOutcome::Flag(FlagOutcome::Flagged));

        let blocked = session.handle(Position::new(0, 0), Action::Open).unwrap();
        assert_eq!(blocked, ActionOutcome::Open(RevealOutcome::Blocked));
        assert!(!blocked.has_update());

        let opened = session.handle(Position::new(0, 1), Action::Open).unwrap();
        assert!(opened.has_update());
        assert_eq!(session.status(), GameStatus::Won);
    }

    #[test]
    fn out_of_bounds_keeps_playing() {
        let mut session = session(2, 2, &[Position::new(0, 0)]);
        let outside = Position::new(0, 2);

        assert_eq!(
            session.handle_open(outside),
            Err(GameError::OutOfBounds(outside))
        );
        assert_eq!(session.status(), GameStatus::Playing);
    }

    #[test]
    fn lost_view_discloses_unflagged_mines() {
        let mines = [Position::new(0, 0), Position::new(0, 2), Position::new(2, 2)];
        let mut session = session(3, 3, &mines);
        session.handle_flag(Position::new(0, 2)).unwrap();
        session.handle_flag(Position::new(1, 1)).unwrap();
        session.handle_open(Position::new(0, 0)).unwrap();

        let exploded = session.cell_view(Position::new(2, 2)).unwrap();
        assert_eq!(exploded.state, CellState::Exploded);
        assert_eq!(exploded.is_mine, Some(true));

        let flagged_mine = session.cell_view(Position::new(0, 2)).unwrap();
        assert_eq!(flagged_mine.state, CellState::Flagged);

        let wrong_flag = session.cell_view(Position::new(1, 1)).unwrap();
        assert_eq!(wrong_flag.state, CellState::Flagged);
        assert_eq!(wrong_flag.is_mine, Some(false));

        // the board itself only holds the detonated mine
        assert_eq!(session.revealed_count(), 1);
        assert_eq!(
            session.board().cell(Position::new(2, 2)).unwrap().state(),
            CellState::Hidden
        );
    }

    #[test]
    fn won_view_flags_remaining_mines() {
        let mut session = session(3, 1, &[Position::new(0, 0)]);

        session.handle_open(Position::new(0, 2)).unwrap();
        assert_eq!(session.status(), GameStatus::Won);

        let mine = session.cell_view(Position::new(0, 0)).unwrap();
        assert_eq!(mine.state, CellState::Flagged);
        assert_eq!(mine.is_mine, Some(true));
        assert_eq!(session.flagged_count(), 0);
    }

    #[test]
    fn playing_view_hides_mines() {
        let session = session(2, 2, &[Position::new(0, 0)]);

        let view = session.cell_view(Position::new(0, 0)).unwrap();
        assert_eq!(view.state, CellState::Hidden);
        assert_eq!(view.is_mine, None);
    }

    #[test]
    fn reset_starts_fresh_game() {
        let mut session = GameSession::new(GameConfig::beginner(), 42).unwrap();
        let mines = session.all_mines();
        session.handle_flag(mines[1]).unwrap();
        session.handle_open(mines[0]).unwrap();
        assert_eq!(session.status(), GameStatus::Lost);

        session.reset(GameConfig::expert()).unwrap();

        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.revealed_count(), 0);
        assert_eq!(session.flagged_count(), 0);
        assert_eq!(session.triggered_mine(), None);
        assert_eq!(session.config(), GameConfig::expert());
        assert_eq!(session.all_mines().len(), 99);
    }

    #[test]
    fn invalid_reset_keeps_current_game() {
        let mut session = GameSession::new(GameConfig::beginner(), 1).unwrap();
        session.handle_flag(Position::new(4, 4)).unwrap();

        let config = GameConfig::new_unchecked(3, 3, 9);
        assert!(matches!(
            session.reset(config),
            Err(GameError::InvalidConfiguration { .. })
        ));
        assert_eq!(session.config(), GameConfig::beginner());
        assert_eq!(session.flagged_count(), 1);
    }

    #[test]
    fn restart_keeps_config() {
        let mut session = GameSession::new(GameConfig::beginner(), 5).unwrap();
        session.handle_flag(Position::new(0, 0)).unwrap();

        session.restart().unwrap();

        assert_eq!(session.config(), GameConfig::beginner());
        assert_eq!(session.flagged_count(), 0);
    }

    #[test]
    fn from_board_derives_status() {
        let config = GameConfig::new_unchecked(2, 1, 1);
        let layout = MineLayout::from_mine_coords(config, &[Position::new(0, 0)]).unwrap();
        let mut board = Board::from_layout(layout).unwrap();
        board.open(Position::new(0, 0)).unwrap();

        let session = GameSession::from_board(board, 0);

        assert_eq!(session.status(), GameStatus::Lost);
        assert_eq!(session.triggered_mine(), Some(Position::new(0, 0)));
    }
}
