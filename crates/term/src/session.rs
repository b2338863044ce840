//! One game: a board mounted in a widget tree, drawn by a render loop.

use std::io::Write;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::GameConfig;
use crate::core::{Board, BoardError};
use crate::error::Result;
use crate::screen::ScreenBuffer;
use crate::types::{GameStatus, PlayerAction};
use crate::widget::{SharedTree, Widget, WidgetId, WidgetKind, WidgetTree};

pub struct Session {
    tree: SharedTree,
    root: WidgetId,
    board: WidgetId,
    screen: Arc<ScreenBuffer>,
}

impl Session {
    /// Validate `config`, build its board and scatter the mines.
    pub fn new(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        let mut board = Board::new(config.width, config.height, config.seed)?;
        let placed = board.add_random_mines(config.mines);
        if placed < config.mines {
            warn!(placed, requested = config.mines, "board ran out of room for mines");
        }
        info!(
            width = config.width,
            height = config.height,
            mines = placed,
            seed = config.seed,
            "new game"
        );
        Ok(Self::from_board(board, config.frame_ms))
    }

    /// Mount an already prepared board at the screen origin.
    pub fn from_board(board: Board, frame_ms: u64) -> Self {
        let (width, height) = GameConfig {
            width: board.width(),
            height: board.height(),
            mines: board.mine_count(),
            frame_ms,
            ..GameConfig::default()
        }
        .screen_size();
        let screen = ScreenBuffer::new(width, height).with_frame_interval(frame_ms);

        let mut tree = WidgetTree::new();
        let root = tree.spawn(Widget::new(WidgetKind::Screen).with_size(width as i32, height as i32));
        let board = tree.spawn_board(board, 0, 0);
        tree.add(root, &[board]);

        Self {
            tree: tree.into_shared(),
            root,
            board,
            screen: Arc::new(screen),
        }
    }

    /// Route a player action at board coordinates through the tree.
    ///
    /// Returns whether any widget handled it. Coordinates off the board fail
    /// with [`BoardError::OutOfBounds`] before anything is dispatched.
    pub fn apply(&self, action: PlayerAction, x: i32, y: i32) -> Result<bool> {
        let mut tree = self.tree.lock();
        if let Some(board) = tree.board(self.board) {
            if board.slot(x, y).is_none() {
                return Err(BoardError::OutOfBounds {
                    x,
                    y,
                    width: board.width(),
                    height: board.height(),
                }
                .into());
            }
        }
        let handled = tree.dispatch_key_pressed(self.root, x, y, action)?;
        tree.dispatch_key_released(self.root, x, y, action)?;
        Ok(handled)
    }

    pub fn status(&self) -> GameStatus {
        self.with_board(Board::status).unwrap_or_default()
    }

    pub fn is_finished(&self) -> bool {
        self.status().is_terminal()
    }

    /// Run `f` against the board while holding the tree lock.
    pub fn with_board<R>(&self, f: impl FnOnce(&Board) -> R) -> Option<R> {
        self.tree.lock().board(self.board).map(f)
    }

    pub fn screen(&self) -> &Arc<ScreenBuffer> {
        &self.screen
    }

    pub fn tree(&self) -> &SharedTree {
        &self.tree
    }

    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// Draw one frame into the screen without flushing it.
    pub fn render_frame(&self) {
        self.tree.lock().render(self.root, &self.screen);
    }

    /// Start the render loop writing frames to `sink`.
    pub fn start<W: Write + Send + 'static>(&self, sink: W) -> Result<()> {
        self.screen.run(Arc::clone(&self.tree), self.root, sink)
    }

    /// Ask the render loop to stop.
    pub fn shut(&self) {
        self.screen.shut();
    }

    /// Wait for the render loop to finish.
    pub fn join(&self) -> Result<()> {
        self.screen.join()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_places_configured_mines() {
        let config = GameConfig {
            width: 4,
            height: 4,
            mines: 5,
            seed: 9,
            ..GameConfig::default()
        };
        let session = Session::new(&config).unwrap();
        assert_eq!(session.with_board(Board::mine_count), Some(5));
        assert_eq!(session.status(), GameStatus::Playing);
    }

    #[test]
    fn off_board_action_is_out_of_bounds() {
        let mut board = Board::new(3, 3, 1).unwrap();
        board.place_mine(2, 2).unwrap();
        let session = Session::from_board(board, 10);
        assert!(matches!(
            session.apply(PlayerAction::Dig, 8, 0),
            Err(crate::error::Error::Board(BoardError::OutOfBounds { x: 8, y: 0, .. }))
        ));
        assert!(session.apply(PlayerAction::Dig, 0, 0).unwrap());
        assert_eq!(session.status(), GameStatus::Won);
        // Terminal board: on-board actions are ignored, not errors.
        assert!(!session.apply(PlayerAction::Flag, 2, 2).unwrap());
    }
}
