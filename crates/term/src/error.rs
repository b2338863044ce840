//! Errors surfaced by the terminal layer.

use std::io;

use thiserror::Error;

use crate::core::BoardError;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("render loop is already running")]
    AlreadyRunning,

    #[error("render loop panicked")]
    RenderPanicked,

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
