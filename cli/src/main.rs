use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use termsweeper_core::{ActionOutcome, FlagOutcome, GameError, GameSession, GameStatus, RevealOutcome};

use crate::cli::Cli;
use crate::clock::GameClock;
use crate::command::{Command, HELP, ParseCommandError};
use crate::render::{SessionView, face};

mod cli;
mod clock;
mod command;
mod render;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity.tracing_level_filter());

    let config = cli.game_config().context("invalid board configuration")?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!(
        "Starting {}x{} game with {} mines, seed {}",
        config.width,
        config.height,
        config.mines,
        seed
    );

    let session = GameSession::new(config, seed)?;
    run(session, io::stdin().lock(), io::stdout().lock())
}

/// Logs go to stderr, the board owns stdout.
fn init_logging(level: tracing_subscriber::filter::LevelFilter) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn run(mut session: GameSession, input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
    let mut clock = GameClock::start();
    write!(output, "{}", view(&session, &clock))?;
    writeln!(output, "{HELP}")?;

    for line in input.lines() {
        let line = line.context("failed to read command")?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(ParseCommandError::Empty) => continue,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Restart => {
                session.restart()?;
                clock = GameClock::start();
                write!(output, "{}", view(&session, &clock))?;
            }
            Command::Act(action, pos) => match session.handle(pos, action) {
                Ok(outcome) => {
                    if session.is_finished() {
                        clock.stop();
                    }
                    if let Some(note) = describe(&outcome) {
                        writeln!(output, "{note}")?;
                    }
                    if outcome.has_update() {
                        write!(output, "{}", view(&session, &clock))?;
                    }
                    if let Some(banner) = banner(session.status()) {
                        writeln!(output, "{banner}")?;
                    }
                }
                Err(err @ GameError::SessionOver) => {
                    writeln!(output, "{err}, type r to restart")?
                }
                Err(err) => writeln!(output, "{err}")?,
            },
        }
        output.flush()?;
    }
    Ok(())
}

fn view<'a>(session: &'a GameSession, clock: &GameClock) -> SessionView<'a> {
    SessionView {
        session,
        elapsed_secs: clock.elapsed_secs(),
    }
}

fn describe(outcome: &ActionOutcome) -> Option<&'static str> {
    match outcome {
        ActionOutcome::Open(RevealOutcome::AlreadyRevealed) => Some("already open"),
        ActionOutcome::Open(RevealOutcome::Blocked) => Some("cell is flagged, unflag it first"),
        ActionOutcome::Flag(FlagOutcome::Blocked) => Some("cannot flag an open cell"),
        _ => None,
    }
}

fn banner(status: GameStatus) -> Option<String> {
    match status {
        GameStatus::Playing => None,
        GameStatus::Won => Some(format!("{} cleared! type r to play again", face(status))),
        GameStatus::Lost => Some(format!("{} boom! type r to try again", face(status))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termsweeper_core::{Board, GameConfig, MineLayout, Position};

    fn play(script: &str) -> String {
        let config = GameConfig::new(3, 1, 1).unwrap();
        let layout = MineLayout::from_mine_coords(config, &[Position::new(0, 0)]).unwrap();
        let session = GameSession::from_board(Board::from_layout(layout).unwrap(), 7);

        let mut output = Vec::new();
        run(session, script.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn winning_game_prints_banner() {
        let output = play("f 0 0\no 0 0\no 0 2\no 0 1\nq\n");

        assert!(output.contains("cell is flagged, unflag it first"));
        assert!(output.contains("  0  ⚑  1   \n"));
        assert!(output.contains("😎 cleared!"));
        assert!(output.contains("Game already ended"));
    }

    #[test]
    fn losing_game_reports_and_restarts() {
        let output = play("o 0 0\nr\no 9 9\nbogus\nq\n");

        assert!(output.contains("😵 boom!"));
        assert!(output.contains("001  😵  000\n"));
        assert!(output.ends_with(
            "Position (9, 9) is outside the board\nunknown command `bogus`, type ? for help\n"
        ));
        assert_eq!(output.matches("000  🙂").count(), 0);
        assert_eq!(output.matches("001  🙂").count(), 2);
    }
}
