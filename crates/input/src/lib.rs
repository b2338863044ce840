//! Line input module (engine-facing).
//!
//! Turns one line typed by the player into a [`Command`]. Reading the lines and
//! deciding what to do with a malformed one is left to the caller; this crate
//! only classifies them.

pub mod map;

pub use tui_minesweeper_types as types;

pub use map::{parse_command, Command, ParseError};
