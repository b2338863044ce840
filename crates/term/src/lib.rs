//! Terminal display layer.
//!
//! A small, game-oriented rendering stack for plain text terminals. Widgets
//! draw into a shared character grid; a background thread flushes the grid to
//! a sink at a fixed frame rate, and only when something actually changed.
//!
//! - [`glyph`]: display width of a character (narrow or wide)
//! - [`grid`]: the cell grid, with wide glyphs spanning two cells
//! - [`screen`]: [`ScreenBuffer`], its drawing calls and the render loop
//! - [`widget`]: [`WidgetTree`], z-ordered nodes with hit testing and dispatch
//! - [`session`]: one game wired together from the pieces above

pub mod config;
pub mod error;
pub mod glyph;
pub mod grid;
pub mod pacer;
pub mod screen;
pub mod session;
pub mod widget;

pub use tui_minesweeper_core as core;
pub use tui_minesweeper_types as types;

pub use config::GameConfig;
pub use error::{Error, Result};
pub use grid::{Cell, Grid};
pub use pacer::FramePacer;
pub use screen::ScreenBuffer;
pub use session::Session;
pub use widget::{SharedTree, Widget, WidgetId, WidgetKind, WidgetTree};
