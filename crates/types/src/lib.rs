//! Shared types and constants.
//!
//! This crate defines the plain data types used across the workspace. It has no
//! dependencies so it can be used by the board logic, the input parser and the
//! terminal layer alike.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_BOARD_WIDTH` | 10 | Board columns |
//! | `DEFAULT_BOARD_HEIGHT` | 10 | Board rows |
//! | `DEFAULT_MINES` | 10 | Mines placed at startup |
//! | `DEFAULT_FRAME_MS` | 100 | Render loop frame interval |
//! | `TAB_WIDTH` | 4 | Spaces a tab expands to |
//!
//! # Examples
//!
//! ```
//! use tui_minesweeper_types::{GameStatus, PlayerAction};
//!
//! assert_eq!(PlayerAction::from_str("dig"), Some(PlayerAction::Dig));
//! assert_eq!(PlayerAction::from_char('F'), Some(PlayerAction::Flag));
//! assert!(GameStatus::Won.is_terminal());
//! ```

/// Default board width in slots.
pub const DEFAULT_BOARD_WIDTH: u16 = 10;

/// Default board height in slots.
pub const DEFAULT_BOARD_HEIGHT: u16 = 10;

/// Default number of mines.
pub const DEFAULT_MINES: u32 = 10;

/// Default frame interval of the render loop in milliseconds.
pub const DEFAULT_FRAME_MS: u64 = 100;

/// Number of spaces a tab character expands to.
pub const TAB_WIDTH: usize = 4;

/// Narrow stand-in for a wide glyph that does not fit its bound.
pub const PLACEHOLDER_GLYPH: char = '?';

/// Revealed mine.
pub const MINE_GLYPH: char = '*';

/// Hidden slot carrying a flag.
pub const FLAG_GLYPH: char = 'F';

/// Hidden slot.
pub const HIDDEN_GLYPH: char = '█';

/// Revealed slot without adjacent mines.
pub const EMPTY_GLYPH: char = ' ';

/// Player actions that can be applied to a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    /// Reveal a slot, flooding empty regions.
    Dig,
    /// Toggle the flag on a hidden slot.
    Flag,
    /// Chord: dig all unflagged neighbors of a revealed slot once its flags
    /// match its mine count.
    Guess,
}

impl PlayerAction {
    /// Parse action from its key letter (case-insensitive).
    ///
    /// ```
    /// use tui_minesweeper_types::PlayerAction;
    ///
    /// assert_eq!(PlayerAction::from_char('d'), Some(PlayerAction::Dig));
    /// assert_eq!(PlayerAction::from_char('G'), Some(PlayerAction::Guess));
    /// assert_eq!(PlayerAction::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'd' => Some(PlayerAction::Dig),
            'f' => Some(PlayerAction::Flag),
            'g' => Some(PlayerAction::Guess),
            _ => None,
        }
    }

    /// Parse action from a command word.
    ///
    /// Only the first letter is significant, so `d`, `dig` and `DIG` are all
    /// [`PlayerAction::Dig`].
    pub fn from_str(s: &str) -> Option<Self> {
        s.chars().next().and_then(Self::from_char)
    }

    /// Key letter of this action.
    pub fn as_char(&self) -> char {
        match self {
            PlayerAction::Dig => 'd',
            PlayerAction::Flag => 'f',
            PlayerAction::Guess => 'g',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerAction::Dig => "dig",
            PlayerAction::Flag => "flag",
            PlayerAction::Guess => "guess",
        }
    }
}

/// Board-level game state.
///
/// `Playing` is initial; `Lost` and `Won` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Playing,
    Lost,
    Won,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// Player-visible state of a single slot.
///
/// `Flagged` and `Revealed` are mutually exclusive; `Hidden` is initial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SlotState {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}
