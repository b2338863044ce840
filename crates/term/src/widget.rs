//! Widget tree: positioned, z-ordered nodes drawn into a [`ScreenBuffer`].
//!
//! Nodes live in an arena and are addressed by [`WidgetId`]. Parent/child links
//! are stored as id sets on both ends, so a node can sit under several parents
//! at once without any ownership cycle.
//!
//! Ordering: each parent keeps its children sorted by `z`, ties in insertion
//! order, as they were when inserted. Changing a node's `z` has no effect on its
//! position until [`WidgetTree::refresh`] re-inserts it under every parent.
//!
//! Coordinates of a child are relative to its parent's origin. Rendering sums
//! the offsets along the path; input dispatch translates the point into each
//! child's local space on the way down.
//!
//! The whole tree is shared between the input and render threads as a
//! [`SharedTree`]; one lock covers every node and every link.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use crate::core::{Board, BoardResult};
use crate::screen::ScreenBuffer;
use crate::types::PlayerAction;

/// Tree handle shared by the input loop and the render loop.
pub type SharedTree = Arc<Mutex<WidgetTree>>;

/// Stable handle of a node inside one [`WidgetTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(usize);

/// Node variants and the data each one draws from.
#[derive(Debug)]
pub enum WidgetKind {
    /// Root of a render pass. Draws nothing itself.
    Screen,
    /// Plain grouping node.
    Container,
    /// A minefield. Draws its status line below the grid and handles actions.
    Board(Board),
    /// One board slot, drawn from the nearest board ancestor.
    Slot { col: u16, row: u16 },
}

/// Geometry plus kind of one node.
#[derive(Debug)]
pub struct Widget {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub width: i32,
    pub height: i32,
    pub kind: WidgetKind,
}

impl Widget {
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            x: 0,
            y: 0,
            z: 0,
            width: 0,
            height: 0,
            kind,
        }
    }

    pub fn with_pos(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Inclusive bounding-box test in the parent's coordinate space.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.x <= x && x <= self.x + self.width && self.y <= y && y <= self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyPhase {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy)]
struct ChildEntry {
    z: i32,
    id: WidgetId,
}

#[derive(Debug)]
struct Node {
    widget: Widget,
    /// Sorted back-to-front.
    children: Vec<ChildEntry>,
    parents: BTreeSet<WidgetId>,
}

/// Arena of widgets.
#[derive(Debug, Default)]
pub struct WidgetTree {
    nodes: Vec<Node>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the tree for sharing between threads.
    pub fn into_shared(self) -> SharedTree {
        Arc::new(Mutex::new(self))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a detached node.
    pub fn spawn(&mut self, widget: Widget) -> WidgetId {
        let id = WidgetId(self.nodes.len());
        self.nodes.push(Node {
            widget,
            children: Vec::new(),
            parents: BTreeSet::new(),
        });
        id
    }

    /// Insert a board at (x, y) together with one slot child per cell.
    ///
    /// The board's height includes the status line drawn under the grid.
    pub fn spawn_board(&mut self, board: Board, x: i32, y: i32) -> WidgetId {
        let (cols, rows) = (board.width(), board.height());
        let widget = Widget::new(WidgetKind::Board(board))
            .with_pos(x, y)
            .with_size(cols as i32, rows as i32 + 1);
        let board_id = self.spawn(widget);

        let mut slots = Vec::with_capacity(cols as usize * rows as usize);
        for row in 0..rows {
            for col in 0..cols {
                // Zero-size: the hit box is the slot's own point.
                let slot = Widget::new(WidgetKind::Slot { col, row }).with_pos(col as i32, row as i32);
                slots.push(self.spawn(slot));
            }
        }
        self.add(board_id, &slots);
        board_id
    }

    /// Panics if `id` was not issued by this tree.
    pub fn get(&self, id: WidgetId) -> &Widget {
        &self.nodes[id.0].widget
    }

    /// Mutable access to a node's geometry and data.
    ///
    /// Call [`refresh`](Self::refresh) after changing `z`.
    pub fn get_mut(&mut self, id: WidgetId) -> &mut Widget {
        &mut self.nodes[id.0].widget
    }

    pub fn board(&self, id: WidgetId) -> Option<&Board> {
        match &self.get(id).kind {
            WidgetKind::Board(board) => Some(board),
            _ => None,
        }
    }

    pub fn board_mut(&mut self, id: WidgetId) -> Option<&mut Board> {
        match &mut self.get_mut(id).kind {
            WidgetKind::Board(board) => Some(board),
            _ => None,
        }
    }

    /// Children of `id`, back to front.
    pub fn children(&self, id: WidgetId) -> impl DoubleEndedIterator<Item = WidgetId> + '_ {
        self.nodes[id.0].children.iter().map(|entry| entry.id)
    }

    pub fn parents(&self, id: WidgetId) -> impl Iterator<Item = WidgetId> + '_ {
        self.nodes[id.0].parents.iter().copied()
    }

    /// True if `ancestor` is `id` or reachable from `id` through parent links.
    pub fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut stack = vec![id];
        let mut seen = BTreeSet::new();
        while let Some(current) = stack.pop() {
            if current == ancestor {
                return true;
            }
            if seen.insert(current) {
                stack.extend(self.parents(current));
            }
        }
        false
    }

    fn insert_entry(&mut self, parent: WidgetId, child: WidgetId) {
        let z = self.nodes[child.0].widget.z;
        let children = &mut self.nodes[parent.0].children;
        let at = children.partition_point(|entry| entry.z <= z);
        children.insert(at, ChildEntry { z, id: child });
    }

    fn remove_entry(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        let children = &mut self.nodes[parent.0].children;
        match children.iter().position(|entry| entry.id == child) {
            Some(at) => {
                children.remove(at);
                true
            }
            None => false,
        }
    }

    /// Attach `children` under `parent`. Returns how many were attached.
    ///
    /// Children already under `parent` are skipped, as is any node that would
    /// close a cycle (the parent itself or one of its ancestors).
    pub fn add(&mut self, parent: WidgetId, children: &[WidgetId]) -> usize {
        let mut added = 0;
        for &child in children {
            if self.nodes[child.0].parents.contains(&parent) {
                continue;
            }
            if self.is_ancestor(child, parent) {
                warn!(?parent, ?child, "refusing to attach an ancestor as a child");
                continue;
            }
            self.insert_entry(parent, child);
            self.nodes[child.0].parents.insert(parent);
            added += 1;
        }
        added
    }

    /// Detach `children` from `parent`. Returns how many were detached.
    pub fn remove(&mut self, parent: WidgetId, children: &[WidgetId]) -> usize {
        let mut removed = 0;
        for &child in children {
            if self.remove_entry(parent, child) {
                self.nodes[child.0].parents.remove(&parent);
                removed += 1;
            }
        }
        removed
    }

    /// Detach every child of `parent`.
    pub fn clear(&mut self, parent: WidgetId) {
        let children = std::mem::take(&mut self.nodes[parent.0].children);
        for entry in children {
            self.nodes[entry.id.0].parents.remove(&parent);
        }
    }

    /// Re-insert `id` under each of its parents so its current `z` takes effect.
    ///
    /// A refreshed node also becomes the newest among siblings of equal `z`.
    pub fn refresh(&mut self, id: WidgetId) {
        let parents: Vec<WidgetId> = self.parents(id).collect();
        for parent in parents {
            if self.remove_entry(parent, id) {
                self.insert_entry(parent, id);
            }
        }
    }

    /// Front-most child of `id` whose box contains (x, y), in `id`'s local space.
    pub fn hit_test(&self, id: WidgetId, x: i32, y: i32) -> Option<WidgetId> {
        self.children(id)
            .rev()
            .find(|&child| self.get(child).contains(x, y))
    }

    /// Offer a key press at (x, y) to the subtree rooted at `id`.
    ///
    /// Children containing the point are tried front to back, recursively; the
    /// first that reports handled stops propagation. `id` itself only sees the
    /// event when no child took it.
    pub fn dispatch_key_pressed(
        &mut self,
        id: WidgetId,
        x: i32,
        y: i32,
        action: PlayerAction,
    ) -> BoardResult<bool> {
        self.dispatch(id, x, y, action, KeyPhase::Pressed)
    }

    /// Release counterpart of [`dispatch_key_pressed`](Self::dispatch_key_pressed).
    pub fn dispatch_key_released(
        &mut self,
        id: WidgetId,
        x: i32,
        y: i32,
        action: PlayerAction,
    ) -> BoardResult<bool> {
        self.dispatch(id, x, y, action, KeyPhase::Released)
    }

    fn dispatch(
        &mut self,
        id: WidgetId,
        x: i32,
        y: i32,
        action: PlayerAction,
        phase: KeyPhase,
    ) -> BoardResult<bool> {
        let front_to_back: Vec<WidgetId> = self.children(id).rev().collect();
        for child in front_to_back {
            let widget = self.get(child);
            if !widget.contains(x, y) {
                continue;
            }
            let (local_x, local_y) = (x - widget.x, y - widget.y);
            if self.dispatch(child, local_x, local_y, action, phase)? {
                return Ok(true);
            }
        }
        self.handle(id, x, y, action, phase)
    }

    fn handle(
        &mut self,
        id: WidgetId,
        x: i32,
        y: i32,
        action: PlayerAction,
        phase: KeyPhase,
    ) -> BoardResult<bool> {
        match (&mut self.get_mut(id).kind, phase) {
            (WidgetKind::Board(board), KeyPhase::Pressed) => board.apply(action, x, y),
            _ => Ok(false),
        }
    }

    /// Draw the subtree rooted at `root`. Parents draw before their children.
    pub fn render(&self, root: WidgetId, screen: &ScreenBuffer) {
        self.render_node(root, 0, 0, None, screen);
    }

    fn render_node(
        &self,
        id: WidgetId,
        origin_x: i32,
        origin_y: i32,
        board: Option<&Board>,
        screen: &ScreenBuffer,
    ) {
        let node = &self.nodes[id.0];
        let x = origin_x + node.widget.x;
        let y = origin_y + node.widget.y;
        let board = match &node.widget.kind {
            WidgetKind::Board(own) => Some(own),
            _ => board,
        };
        draw(&node.widget.kind, x, y, board, screen);
        for entry in &node.children {
            self.render_node(entry.id, x, y, board, screen);
        }
    }
}

fn draw(kind: &WidgetKind, x: i32, y: i32, board: Option<&Board>, screen: &ScreenBuffer) {
    match kind {
        WidgetKind::Screen | WidgetKind::Container => {}
        WidgetKind::Board(own) => {
            // Padded so a shorter line fully covers a longer one.
            let line = format!("{:<width$}", own.status_line(), width = own.status_width());
            screen.write(&line, x, y + own.height() as i32);
        }
        WidgetKind::Slot { col, row } => {
            if let Some(slot) = board.and_then(|b| b.slot(*col as i32, *row as i32)) {
                screen.set_char(slot.glyph(), x, y);
            }
        }
    }
}
