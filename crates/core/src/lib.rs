//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the minefield rules with **zero dependencies** on
//! terminals, threads or I/O:
//!
//! - **Deterministic**: the same seed places the same mines
//! - **Testable**: every rule is reachable through plain method calls
//! - **Bounded**: flood fill runs on an explicit work-list, not recursion
//!
//! # Module Structure
//!
//! - [`board`]: slot grid, dig / flag / chord actions, win and loss detection
//! - [`rng`]: seedable LCG used for mine placement
//! - [`error`]: bounds and dimension errors
//!
//! # Example
//!
//! ```
//! use tui_minesweeper_core::Board;
//! use tui_minesweeper_types::{GameStatus, PlayerAction};
//!
//! let mut board = Board::new(3, 3, 12345).unwrap();
//! board.place_mine(2, 2).unwrap();
//!
//! board.apply(PlayerAction::Dig, 0, 0).unwrap();
//! assert_eq!(board.revealed_count(), 8);
//! assert_eq!(board.status(), GameStatus::Won);
//! ```

pub mod board;
pub mod error;
pub mod rng;

pub use tui_minesweeper_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Slot};
pub use error::{BoardError, BoardResult};
pub use rng::SimpleRng;
