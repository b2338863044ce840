//! Board module - minefield state and the three player actions
//!
//! The board is a `width x height` grid of slots stored as a flat row-major
//! array (`y * width + x`). Coordinates are `(x, y)` with `x` growing to the
//! right and `y` growing downwards.
//!
//! Counters are kept incrementally:
//! - `adjacent_mines` of every slot is bumped when a neighboring mine is placed
//! - `revealed` / `flagged` change only on a fresh reveal or a flag toggle
//!
//! The board is `playing` until a mine is revealed (`lost`) or every safe slot
//! is revealed (`won`). Both are terminal: later actions are no-ops.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::error::{BoardError, BoardResult};
use crate::rng::SimpleRng;
use crate::types::{
    GameStatus, PlayerAction, SlotState, EMPTY_GLYPH, FLAG_GLYPH, HIDDEN_GLYPH, MINE_GLYPH,
};

/// Columns needed by the status line of a `width x height` board holding
/// `mines` mines, and at least `width`.
pub fn status_width(width: u16, height: u16, mines: u32) -> usize {
    let capacity = width as u32 * height as u32;
    let counter = format!("Flags: {}/{}", capacity, mines).len();
    counter.max("Game Over!".len()).max(width as usize)
}

/// A single minefield slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slot {
    mine: bool,
    revealed: bool,
    flagged: bool,
    adjacent_mines: u8,
}

impl Slot {
    pub fn is_mine(&self) -> bool {
        self.mine
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Number of mines among the (up to) 8 surrounding slots.
    pub fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub fn state(&self) -> SlotState {
        if self.revealed {
            SlotState::Revealed
        } else if self.flagged {
            SlotState::Flagged
        } else {
            SlotState::Hidden
        }
    }

    /// Glyph drawn for this slot.
    pub fn glyph(&self) -> char {
        match self.state() {
            SlotState::Revealed if self.mine => MINE_GLYPH,
            SlotState::Revealed => match self.adjacent_mines {
                0 => EMPTY_GLYPH,
                n => char::from(b'0' + n),
            },
            SlotState::Flagged => FLAG_GLYPH,
            SlotState::Hidden => HIDDEN_GLYPH,
        }
    }
}

/// The minefield.
#[derive(Debug, Clone)]
pub struct Board {
    width: u16,
    height: u16,
    /// Flat array of slots, row-major order (y * width + x)
    slots: Vec<Slot>,
    mines: u32,
    revealed: u32,
    flagged: u32,
    lost: bool,
    rng: SimpleRng,
}

impl Board {
    /// Create an empty board. `seed` drives random mine placement.
    pub fn new(width: u16, height: u16, seed: u32) -> BoardResult<Self> {
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            slots: vec![Slot::default(); len],
            mines: 0,
            revealed: 0,
            flagged: 0,
            lost: false,
            rng: SimpleRng::new(seed),
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of slots.
    pub fn capacity(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    pub fn mine_count(&self) -> u32 {
        self.mines
    }

    pub fn revealed_count(&self) -> u32 {
        self.revealed
    }

    pub fn flagged_count(&self) -> u32 {
        self.flagged
    }

    /// Slots that are neither revealed nor flagged.
    pub fn hidden_count(&self) -> u32 {
        self.capacity() - self.revealed - self.flagged
    }

    /// Current game state.
    ///
    /// Loss is recorded by the action that revealed a mine; a win is derived
    /// from the counters, so a board with no safe slot left is won as soon as
    /// it is looked at.
    pub fn status(&self) -> GameStatus {
        if self.lost {
            GameStatus::Lost
        } else if self.capacity() as i64 - self.mines as i64 - self.revealed as i64 <= 0 {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status().is_terminal()
    }

    /// One-line summary: flag/mine counts while playing, a banner once over.
    pub fn status_line(&self) -> String {
        match self.status() {
            GameStatus::Playing => format!("Flags: {}/{}", self.flagged, self.mines),
            GameStatus::Won => "You Win!".to_string(),
            GameStatus::Lost => "Game Over!".to_string(),
        }
    }

    /// Columns wide enough for any status line of this board, and at least the
    /// board width.
    pub fn status_width(&self) -> usize {
        status_width(self.width, self.height, self.mines)
    }

    /// Get slot at position (x, y)
    /// Returns None if out of bounds
    pub fn slot(&self, x: i32, y: i32) -> Option<&Slot> {
        self.index(x, y).map(|idx| &self.slots[idx])
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn checked_index(&self, x: i32, y: i32) -> BoardResult<usize> {
        self.index(x, y).ok_or(BoardError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }

    /// Indices of the slots at Chebyshev distance 1, clipped at the edges.
    fn neighbors(&self, idx: usize) -> ArrayVec<usize, 8> {
        let x = (idx % self.width as usize) as i32;
        let y = (idx / self.width as usize) as i32;
        let mut out = ArrayVec::new();
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if let Some(n) = self.index(x + dx, y + dy) {
                    out.push(n);
                }
            }
        }
        out
    }

    /// Reveal a slot, clearing its flag. Counts only fresh reveals.
    fn reveal(&mut self, idx: usize) {
        let slot = &mut self.slots[idx];
        if slot.revealed {
            return;
        }
        if slot.flagged {
            slot.flagged = false;
            self.flagged -= 1;
        }
        slot.revealed = true;
        self.revealed += 1;
    }

    /// Dig at (x, y).
    ///
    /// A flagged target is still dug. Digging a slot with no adjacent mines
    /// floods outwards over every unrevealed, unflagged, mine-free neighbor.
    ///
    /// Returns `Ok(false)` if a mine was hit.
    pub fn dig(&mut self, x: i32, y: i32) -> BoardResult<bool> {
        let idx = self.checked_index(x, y)?;
        if self.is_finished() {
            return Ok(!self.lost);
        }
        Ok(self.dig_index(idx))
    }

    fn dig_index(&mut self, idx: usize) -> bool {
        self.reveal(idx);
        let slot = self.slots[idx];
        if slot.mine {
            self.lost = true;
            debug!(idx, "mine revealed");
            return false;
        }
        if slot.adjacent_mines != 0 {
            return true;
        }

        // Explicit work-list; `reveal` before push keeps every slot queued once.
        let mut pending = vec![idx];
        while let Some(current) = pending.pop() {
            for n in self.neighbors(current) {
                let neighbor = self.slots[n];
                if neighbor.revealed || neighbor.flagged || neighbor.mine {
                    continue;
                }
                self.reveal(n);
                if neighbor.adjacent_mines == 0 {
                    pending.push(n);
                }
            }
        }
        true
    }

    /// Chord at (x, y).
    ///
    /// On a revealed slot whose flagged-neighbor count equals its mine count,
    /// digs every neighbor that is neither revealed nor flagged, stopping at the
    /// first mine. Anything else leaves the board unchanged.
    ///
    /// Returns `Ok(false)` if a mine was hit.
    pub fn guess(&mut self, x: i32, y: i32) -> BoardResult<bool> {
        let idx = self.checked_index(x, y)?;
        if self.is_finished() {
            return Ok(!self.lost);
        }
        let slot = self.slots[idx];
        if !slot.revealed {
            return Ok(true);
        }

        let neighbors = self.neighbors(idx);
        let flags = neighbors
            .iter()
            .filter(|&&n| self.slots[n].flagged)
            .count();
        if flags != slot.adjacent_mines as usize {
            return Ok(true);
        }

        for n in neighbors {
            let neighbor = self.slots[n];
            if !neighbor.revealed && !neighbor.flagged && !self.dig_index(n) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Toggle the flag on a hidden slot. Revealed slots are left alone.
    pub fn toggle_flag(&mut self, x: i32, y: i32) -> BoardResult<()> {
        let idx = self.checked_index(x, y)?;
        if self.is_finished() {
            return Ok(());
        }
        let slot = &mut self.slots[idx];
        if slot.revealed {
            return Ok(());
        }
        slot.flagged = !slot.flagged;
        if slot.flagged {
            self.flagged += 1;
        } else {
            self.flagged -= 1;
        }
        Ok(())
    }

    /// Apply a player action at (x, y).
    ///
    /// Returns `Ok(false)` when the board is already over and the action was
    /// ignored, `Ok(true)` when it was handled.
    pub fn apply(&mut self, action: PlayerAction, x: i32, y: i32) -> BoardResult<bool> {
        if self.is_finished() {
            return Ok(false);
        }
        match action {
            PlayerAction::Dig => {
                self.dig(x, y)?;
            }
            PlayerAction::Flag => self.toggle_flag(x, y)?,
            PlayerAction::Guess => {
                self.guess(x, y)?;
            }
        }
        let status = self.status();
        if status.is_terminal() {
            debug!(?status, revealed = self.revealed, "board finished");
        }
        Ok(true)
    }

    /// Place a mine on a random mine-free slot.
    ///
    /// Returns false once every slot already holds a mine.
    pub fn add_random_mine(&mut self) -> bool {
        let capacity = self.capacity();
        if self.mines >= capacity {
            return false;
        }
        loop {
            let idx = self.rng.next_range(capacity) as usize;
            if !self.slots[idx].mine {
                self.arm(idx);
                return true;
            }
        }
    }

    /// Place up to `count` random mines. Returns how many were placed.
    pub fn add_random_mines(&mut self, count: u32) -> u32 {
        let placed = (0..count).take_while(|_| self.add_random_mine()).count() as u32;
        debug!(placed, requested = count, "mines placed");
        placed
    }

    /// Place a mine at (x, y). Returns `Ok(false)` if one is already there.
    pub fn place_mine(&mut self, x: i32, y: i32) -> BoardResult<bool> {
        let idx = self.checked_index(x, y)?;
        if self.slots[idx].mine {
            return Ok(false);
        }
        self.arm(idx);
        Ok(true)
    }

    fn arm(&mut self, idx: usize) {
        self.slots[idx].mine = true;
        for n in self.neighbors(idx) {
            self.slots[n].adjacent_mines += 1;
        }
        self.mines += 1;
    }
}
