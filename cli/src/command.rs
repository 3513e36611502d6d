//! Player input, one command per line.

use std::str::FromStr;
use termsweeper_core::{Action, Coord, Position};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  o ROW COL   open a cell
  f ROW COL   flag or unflag a cell
  r           restart with a new layout
  ?           show this help
  q           quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Act(Action, Position),
    Restart,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, type ? for help")]
    Unknown(String),
    #[error("expected a row and a column")]
    MissingCoordinate,
    #[error("`{0}` is not a valid coordinate")]
    InvalidCoordinate(String),
    #[error("unexpected input `{0}`")]
    TrailingInput(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(ParseCommandError::Empty)?;

        let command = match name.to_ascii_lowercase().as_str() {
            "o" | "open" => Command::Act(Action::Open, parse_position(&mut words)?),
            "f" | "flag" => Command::Act(Action::Flag, parse_position(&mut words)?),
            "r" | "restart" => Command::Restart,
            "?" | "h" | "help" => Command::Help,
            "q" | "quit" => Command::Quit,
            _ => return Err(ParseCommandError::Unknown(name.to_owned())),
        };

        match words.next() {
            Some(extra) => Err(ParseCommandError::TrailingInput(extra.to_owned())),
            None => Ok(command),
        }
    }
}

fn parse_position<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Position, ParseCommandError> {
    let mut coord = || {
        let word = words.next().ok_or(ParseCommandError::MissingCoordinate)?;
        word.parse::<Coord>()
            .map_err(|_| ParseCommandError::InvalidCoordinate(word.to_owned()))
    };
    let row = coord()?;
    let col = coord()?;
    Ok(Position::new(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_actions() {
        assert_eq!(
            "o 3 4".parse::<Command>(),
            Ok(Command::Act(Action::Open, Position::new(3, 4)))
        );
        assert_eq!(
            "  FLAG 0   15 ".parse::<Command>(),
            Ok(Command::Act(Action::Flag, Position::new(0, 15)))
        );
    }

    #[test]
    fn parses_controls() {
        assert_eq!("r".parse::<Command>(), Ok(Command::Restart));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "dig 1 1".parse::<Command>(),
            Err(ParseCommandError::Unknown("dig".into()))
        );
        assert_eq!(
            "o 1".parse::<Command>(),
            Err(ParseCommandError::MissingCoordinate)
        );
        assert_eq!(
            "f -1 2".parse::<Command>(),
            Err(ParseCommandError::InvalidCoordinate("-1".into()))
        );
        assert_eq!(
            "o 1 2 3".parse::<Command>(),
            Err(ParseCommandError::TrailingInput("3".into()))
        );
    }
}
