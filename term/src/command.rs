use std::num::ParseIntError;
use std::str::FromStr;

use sweeper_core::{Coord, Coord2};
use thiserror::Error;

/// A single line of player input.
///
/// Coordinates are typed 1-based and stored 0-based.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Chord(Coord2),
    NewGame,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command, type `h` for help")]
    Empty,
    #[error("Unknown command `{0}`, type `h` for help")]
    Unknown(String),
    #[error("`{0}` needs a row and a column")]
    MissingCoords(String),
    #[error("Invalid number `{value}`: {source}")]
    BadNumber {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("Rows and columns start at 1")]
    ZeroCoord,
    #[error("Unexpected input `{0}`")]
    Trailing(String),
}

pub const HELP: &str = "\
Commands (rows and columns start at 1):
  r ROW COL   reveal a cell
  f ROW COL   toggle a flag
  c ROW COL   chord: open the neighbors of a satisfied number
  n           start a new game
  h           show this help
  q           quit";

fn parse_coord(value: &str) -> Result<Coord, CommandError> {
    let number: Coord = value.parse().map_err(|source| CommandError::BadNumber {
        value: value.to_string(),
        source,
    })?;
    number.checked_sub(1).ok_or(CommandError::ZeroCoord)
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();

        let make: fn(Coord2) -> Command = match name.as_str() {
            "r" | "reveal" | "o" | "open" => Command::Reveal,
            "f" | "flag" => Command::Flag,
            "c" | "chord" => Command::Chord,
            "n" | "new" => return no_arguments(Command::NewGame, words),
            "h" | "help" | "?" => return no_arguments(Command::Help, words),
            "q" | "quit" | "exit" => return no_arguments(Command::Quit, words),
            _ => return Err(CommandError::Unknown(name)),
        };

        let (Some(row), Some(col)) = (words.next(), words.next()) else {
            return Err(CommandError::MissingCoords(name));
        };
        let coords = (parse_coord(row)?, parse_coord(col)?);
        no_arguments(make(coords), words)
    }
}

fn no_arguments<'a>(
    command: Command,
    mut rest: impl Iterator<Item = &'a str>,
) -> Result<Command, CommandError> {
    match rest.next() {
        Some(extra) => Err(CommandError::Trailing(extra.to_string())),
        None => Ok(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cell_commands_as_zero_based() {
        assert_eq!("r 1 1".parse::<Command>(), Ok(Command::Reveal((0, 0))));
        assert_eq!("  Flag 3   12 ".parse::<Command>(), Ok(Command::Flag((2, 11))));
        assert_eq!("c 16 30".parse::<Command>(), Ok(Command::Chord((15, 29))));
        assert_eq!("open 2 2".parse::<Command>(), Ok(Command::Reveal((1, 1))));
    }

    #[test]
    fn parses_game_commands() {
        assert_eq!("n".parse::<Command>(), Ok(Command::NewGame));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("QUIT".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "x 1 1".parse::<Command>(),
            Err(CommandError::Unknown("x".to_string()))
        );
        assert_eq!(
            "r 4".parse::<Command>(),
            Err(CommandError::MissingCoords("r".to_string()))
        );
        assert_eq!("f 0 3".parse::<Command>(), Err(CommandError::ZeroCoord));
        assert_eq!(
            "q now".parse::<Command>(),
            Err(CommandError::Trailing("now".to_string()))
        );
        assert!(matches!(
            "r a 2".parse::<Command>(),
            Err(CommandError::BadNumber { value, .. }) if value == "a"
        ));
        assert!(matches!(
            "r -1 2".parse::<Command>(),
            Err(CommandError::BadNumber { .. })
        ));
    }
}
