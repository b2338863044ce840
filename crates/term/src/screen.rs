//! ScreenBuffer: the shared character grid and the render loop that flushes it.
//!
//! Every drawing call takes `&self`; the grid sits behind a mutex so the input
//! thread and the render thread never see a torn frame. The dirty flag is an
//! atomic so the render loop can check it without taking the grid lock.
//!
//! Drawing never fails: coordinates and sizes are clamped into the grid and
//! anything that cannot be drawn is dropped.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::glyph::is_wide;
use crate::grid::{Cell, Grid};
use crate::pacer::FramePacer;
use crate::types::TAB_WIDTH;
use crate::widget::{SharedTree, WidgetId};

pub struct ScreenBuffer {
    grid: Mutex<Grid>,
    dirty: AtomicBool,
    frame_ms: AtomicU64,
    running: AtomicBool,
    worker: Mutex<Option<JoinHandle<io::Result<()>>>>,
}

impl ScreenBuffer {
    /// Blank screen, marked dirty so the first frame is always flushed.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            grid: Mutex::new(Grid::new(width, height)),
            dirty: AtomicBool::new(true),
            frame_ms: AtomicU64::new(0),
            running: AtomicBool::new(false),
            worker: Mutex::new(None),
        }
    }

    pub fn with_frame_interval(self, frame_ms: u64) -> Self {
        self.set_frame_interval(frame_ms);
        self
    }

    pub fn width(&self) -> u16 {
        self.grid.lock().width()
    }

    pub fn height(&self) -> u16 {
        self.grid.lock().height()
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms.load(Ordering::Relaxed))
    }

    pub fn set_frame_interval(&self, frame_ms: u64) {
        self.frame_ms.store(frame_ms, Ordering::Relaxed);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Clear the dirty flag, returning whether it was set.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }

    fn mark(&self, changed: bool) {
        if changed {
            self.dirty.store(true, Ordering::Release);
        }
    }

    /// Replace the grid with a blank one of the new size and force a redraw.
    pub fn resize(&self, width: u16, height: u16) {
        let mut grid = self.grid.lock();
        *grid = Grid::new(width, height);
        self.dirty.store(true, Ordering::Release);
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.grid.lock().get(x, y)
    }

    /// Printable text of row `y`.
    pub fn row_text(&self, y: u16) -> Option<String> {
        self.grid.lock().row_text(y)
    }

    /// All rows, holes skipped.
    pub fn lines(&self) -> Vec<String> {
        let grid = self.grid.lock();
        (0..grid.height()).filter_map(|y| grid.row_text(y)).collect()
    }

    /// [`write_text`](Self::write_text) bounded by the whole screen.
    pub fn write(&self, text: &str, x: i32, y: i32) {
        self.write_text(text, x, y, i32::MAX, i32::MAX, 0);
    }

    /// Write `text` starting at `(x + indent, y)`.
    ///
    /// Text wraps back to column `x` on the next row when it reaches column
    /// `bound_w` and is clipped once the row reaches `bound_h`. A wide glyph
    /// that would straddle the bound wraps whole; only a one-column bound
    /// turns it into the placeholder. `\n`, `\r` and `\r\n` each break the
    /// line; a tab is four spaces.
    pub fn write_text(&self, text: &str, x: i32, y: i32, bound_w: i32, bound_h: i32, indent: i32) {
        let mut grid = self.grid.lock();
        let mut cursor = TextCursor::new(&grid, x, y, bound_w, bound_h, indent);
        let mut chars = text.chars().peekable();
        let mut changed = false;

        while let Some(c) = chars.next() {
            let open = match c {
                '\n' => cursor.line_break(),
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    cursor.line_break()
                }
                '\t' => (0..TAB_WIDTH).all(|_| cursor.put(&mut grid, ' ', &mut changed)),
                c if c.is_control() => true,
                c => cursor.put(&mut grid, c, &mut changed),
            };
            if !open {
                break;
            }
        }
        self.mark(changed);
    }

    /// Set one glyph at (x, y), clamped into the screen.
    ///
    /// Control characters are ignored, and so is a write onto the right half
    /// of a wide glyph.
    pub fn set_char(&self, c: char, x: i32, y: i32) {
        if c.is_control() {
            return;
        }
        let mut grid = self.grid.lock();
        let x = clamp_u16(x, 0, grid.width() - 1);
        let y = clamp_u16(y, 0, grid.height() - 1);
        let edge = grid.width();
        let put = grid.put_glyph(x, y, c, edge);
        self.mark(put.changed);
    }

    /// Fill a rectangle with `c`, clamped into the screen.
    pub fn fill(&self, c: char, x: i32, y: i32, width: i32, height: i32) {
        if c.is_control() {
            return;
        }
        let mut grid = self.grid.lock();
        let (w, h) = (grid.width(), grid.height());
        let left = clamp_u16(x, 0, w - 1);
        let top = clamp_u16(y, 0, h - 1);
        let right = (left as i64 + width.max(1) as i64).min(w as i64) as u16;
        let bottom = (top as i64 + height.max(1) as i64).min(h as i64) as u16;

        let mut changed = false;
        for row in top..bottom {
            let mut col = left;
            while col < right {
                let put = grid.put_glyph(col, row, c, right);
                changed |= put.changed;
                col += put.advance;
            }
        }
        self.mark(changed);
    }

    /// Write every row, each ending in `\n`, to `sink`, whether dirty or not.
    pub fn flush<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        let mut buf = Vec::new();
        {
            let grid = self.grid.lock();
            buf.reserve(grid.cells().len() + grid.height() as usize);
            grid.encode_into(&mut buf);
        }
        sink.write_all(&buf)?;
        sink.flush()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Start the render loop on its own thread.
    ///
    /// Each frame renders `root` of `tree` into this screen, flushes to `sink`
    /// if anything changed, then sleeps out the rest of the frame interval.
    /// Fails with [`Error::AlreadyRunning`] while a previous loop is alive.
    pub fn run<W>(self: &Arc<Self>, tree: SharedTree, root: WidgetId, mut sink: W) -> Result<()>
    where
        W: Write + Send + 'static,
    {
        let mut worker = self.worker.lock();
        if worker.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return Err(Error::AlreadyRunning);
        }
        if self.running.swap(true, Ordering::AcqRel) {
            return Err(Error::AlreadyRunning);
        }

        let screen = Arc::clone(self);
        let spawned = thread::Builder::new()
            .name("render".to_string())
            .spawn(move || {
                info!(frame_ms = screen.frame_ms.load(Ordering::Relaxed), "render loop started");
                let result = render_frames(&screen, &tree, root, &mut sink);
                screen.running.store(false, Ordering::Release);
                match &result {
                    Ok(()) => info!("render loop stopped"),
                    Err(err) => error!(%err, "render loop failed"),
                }
                result
            });

        match spawned {
            Ok(handle) => {
                *worker = Some(handle);
                Ok(())
            }
            Err(err) => {
                self.running.store(false, Ordering::Release);
                Err(err.into())
            }
        }
    }

    /// Ask the render loop to stop after its current frame. Does not wait.
    pub fn shut(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Wait for the render thread to exit and return how it ended.
    ///
    /// Returns immediately if no loop was started.
    pub fn join(&self) -> Result<()> {
        let handle = self.worker.lock().take();
        match handle {
            Some(handle) => match handle.join() {
                Ok(result) => result.map_err(Error::from),
                Err(_) => Err(Error::RenderPanicked),
            },
            None => Ok(()),
        }
    }
}

fn render_frames<W: Write>(
    screen: &ScreenBuffer,
    tree: &SharedTree,
    root: WidgetId,
    sink: &mut W,
) -> io::Result<()> {
    let start = Instant::now();
    let mut pacer = FramePacer::new(screen.frame_ms.load(Ordering::Relaxed), 0);
    while screen.is_running() {
        tree.lock().render(root, screen);
        if screen.take_dirty() {
            debug!("flushing frame");
            screen.flush(sink)?;
        }
        pacer.set_interval(screen.frame_ms.load(Ordering::Relaxed));
        let delay = pacer.next_delay(start.elapsed().as_millis() as u64);
        thread::sleep(Duration::from_millis(delay));
    }
    Ok(())
}

fn clamp_u16(v: i32, lo: u16, hi: u16) -> u16 {
    v.clamp(lo as i32, hi as i32) as u16
}

/// Write position of one `write_text` call.
struct TextCursor {
    left: u32,
    col: u32,
    row: u32,
    right: u32,
    bottom: u32,
}

impl TextCursor {
    fn new(grid: &Grid, x: i32, y: i32, bound_w: i32, bound_h: i32, indent: i32) -> Self {
        let right = clamp_u16(bound_w, 1, grid.width()) as u32;
        let bottom = clamp_u16(bound_h, 1, grid.height()) as u32;
        let left = clamp_u16(x, 0, (right - 1) as u16) as u32;
        let row = clamp_u16(y, 0, (bottom - 1) as u16) as u32;
        Self {
            left,
            col: left + indent.max(0) as u32,
            row,
            right,
            bottom,
        }
    }

    /// Move past the bound onto following rows. Returns false once clipped.
    fn wrap(&mut self) -> bool {
        if self.col >= self.right {
            let span = self.right - self.left;
            let wraps = (self.col - self.right) / span + 1;
            self.col -= wraps * span;
            self.row = self.row.saturating_add(wraps);
        }
        self.row < self.bottom
    }

    fn line_break(&mut self) -> bool {
        self.col = self.left;
        self.row = self.row.saturating_add(1);
        self.row < self.bottom
    }

    fn put(&mut self, grid: &mut Grid, c: char, changed: &mut bool) -> bool {
        if !self.wrap() {
            return false;
        }
        let straddles = is_wide(c) && self.col + 1 >= self.right;
        if straddles && self.right - self.left > 1 && !self.line_break() {
            return false;
        }
        let put = grid.put_glyph(self.col as u16, self.row as u16, c, self.right as u16);
        *changed |= put.changed;
        self.col += put.advance as u32;
        true
    }
}
