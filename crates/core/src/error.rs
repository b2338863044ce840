//! Board error types.

use thiserror::Error;

/// Errors raised by board operations.
///
/// Game logic never clamps coordinates; an out-of-range position is a caller
/// bug and is reported as such.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("slot ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u16,
        height: u16,
    },

    #[error("invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;
