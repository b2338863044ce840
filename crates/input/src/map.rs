//! Mapping from typed lines to player commands.
//!
//! Accepted forms (surrounding whitespace ignored, words separated by any run
//! of whitespace):
//!
//! ```text
//! d <x> <y>    dig
//! f <x> <y>    toggle flag
//! g <x> <y>    guess (chord)
//! q            quit
//! ```
//!
//! Only the first letter of the command word is significant, so `dig 3 4` is
//! the same as `d 3 4`.

use thiserror::Error;

use crate::types::PlayerAction;

/// A parsed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Action { action: PlayerAction, x: i32, y: i32 },
    Quit,
}

/// Why a line could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("missing coordinate")]
    MissingCoordinate,

    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let mut words = line.split_whitespace();
    let word = words.next().ok_or(ParseError::Empty)?;

    if matches!(word.to_ascii_lowercase().as_str(), "q" | "quit" | "exit") {
        return Ok(Command::Quit);
    }

    let action =
        PlayerAction::from_str(word).ok_or_else(|| ParseError::UnknownCommand(word.to_string()))?;
    let x = parse_coordinate(words.next())?;
    let y = parse_coordinate(words.next())?;
    Ok(Command::Action { action, x, y })
}

fn parse_coordinate(word: Option<&str>) -> Result<i32, ParseError> {
    let word = word.ok_or(ParseError::MissingCoordinate)?;
    word.parse()
        .map_err(|_| ParseError::InvalidCoordinate(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_commands() {
        assert_eq!(
            parse_command("d 3 4"),
            Ok(Command::Action {
                action: PlayerAction::Dig,
                x: 3,
                y: 4
            })
        );
        assert_eq!(
            parse_command("  flag 0   9 "),
            Ok(Command::Action {
                action: PlayerAction::Flag,
                x: 0,
                y: 9
            })
        );
        assert_eq!(
            parse_command("G 1 1"),
            Ok(Command::Action {
                action: PlayerAction::Guess,
                x: 1,
                y: 1
            })
        );
    }

    #[test]
    fn test_negative_coordinates_parse() {
        // Range checking belongs to the board.
        assert_eq!(
            parse_command("d -1 2"),
            Ok(Command::Action {
                action: PlayerAction::Dig,
                x: -1,
                y: 2
            })
        );
    }

    #[test]
    fn test_quit_commands() {
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert_eq!(parse_command("QUIT"), Ok(Command::Quit));
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(parse_command(""), Err(ParseError::Empty));
        assert_eq!(parse_command("   "), Err(ParseError::Empty));
        assert_eq!(
            parse_command("x 1 1"),
            Err(ParseError::UnknownCommand("x".to_string()))
        );
        assert_eq!(parse_command("d 1"), Err(ParseError::MissingCoordinate));
        assert_eq!(
            parse_command("d one 1"),
            Err(ParseError::InvalidCoordinate("one".to_string()))
        );
    }
}
