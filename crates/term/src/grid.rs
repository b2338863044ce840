//! Character grid backing the screen buffer.
//!
//! A cell is either a glyph or a hole: the right half of a wide glyph stored in
//! the cell to its left. Holes are never printed and never written over
//! directly; they only appear and disappear together with their wide glyph.

use crate::glyph::{is_wide, width};
use crate::types::PLACEHOLDER_GLYPH;

/// A single display column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Glyph(char),
    Hole,
}

impl Cell {
    pub const BLANK: Cell = Cell::Glyph(' ');

    pub fn is_hole(&self) -> bool {
        matches!(self, Cell::Hole)
    }

    fn is_wide_glyph(&self) -> bool {
        matches!(*self, Cell::Glyph(c) if is_wide(c))
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Result of placing one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Put {
    /// Columns the cursor moves past.
    pub advance: u16,
    /// Whether any cell changed.
    pub changed: bool,
}

/// 2D grid of cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Grid {
    /// Blank grid. Both dimensions are raised to at least 1.
    pub fn new(width: u16, height: u16) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Overwrite one cell, returning whether it changed.
    ///
    /// Replacing a wide glyph with anything but another wide glyph turns its
    /// now-orphaned hole into a blank.
    fn store(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        let Some(i) = self.idx(x, y) else {
            return false;
        };
        let old = self.cells[i];
        if old == cell {
            return false;
        }
        self.cells[i] = cell;
        if old.is_wide_glyph() && !cell.is_wide_glyph() {
            if let Some(next) = self.idx(x + 1, y) {
                if self.cells[next].is_hole() {
                    self.cells[next] = Cell::BLANK;
                }
            }
        }
        true
    }

    /// Place `c` at (x, y), where `edge` is the exclusive right bound of the
    /// region being written.
    ///
    /// - a hole at the target rejects the write
    /// - a wide glyph takes two columns and leaves a hole in the second
    /// - a wide glyph with a single column left before `edge` becomes
    ///   [`PLACEHOLDER_GLYPH`]
    pub fn put_glyph(&mut self, x: u16, y: u16, c: char, edge: u16) -> Put {
        let edge = edge.min(self.width);
        match self.get(x, y) {
            None | Some(Cell::Hole) => {
                return Put {
                    advance: 1,
                    changed: false,
                }
            }
            Some(Cell::Glyph(_)) => {}
        }

        if width(c) == 1 {
            return Put {
                advance: 1,
                changed: self.store(x, y, Cell::Glyph(c)),
            };
        }
        if x + 1 >= edge {
            return Put {
                advance: 1,
                changed: self.store(x, y, Cell::Glyph(PLACEHOLDER_GLYPH)),
            };
        }
        let head = self.store(x, y, Cell::Glyph(c));
        let tail = self.store(x + 1, y, Cell::Hole);
        Put {
            advance: 2,
            changed: head || tail,
        }
    }

    /// Printable text of row `y`, holes skipped.
    pub fn row_text(&self, y: u16) -> Option<String> {
        if y >= self.height {
            return None;
        }
        let start = (y as usize) * (self.width as usize);
        let row = &self.cells[start..start + self.width as usize];
        Some(
            row.iter()
                .filter_map(|cell| match cell {
                    Cell::Glyph(c) => Some(*c),
                    Cell::Hole => None,
                })
                .collect(),
        )
    }

    /// Serialize every row followed by a line break into `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        let mut utf8 = [0u8; 4];
        for row in self.cells.chunks(self.width as usize) {
            for cell in row {
                if let Cell::Glyph(c) = cell {
                    out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
                }
            }
            out.push(b'\n');
        }
    }
}
