//! # Undo/Redo Stack
//!
//! Linear history of whole-state snapshots with a movable cursor.
//!
//! ## Design
//!
//! - Every edit pushes a complete snapshot, not a diff
//! - `current()` is always `history[cursor]`; history is never empty
//! - Pushing after an undo discards everything beyond the cursor
//! - With a limit, the oldest snapshots are dropped and the cursor shifts
//!   with them
//!
//! ## Example
//!
//! ```rust
//! use pagecraft_editor::UndoStack;
//!
//! let mut stack = UndoStack::new(vec!["a"]);
//! stack.push(vec!["a", "b"]);
//!
//! assert_eq!(stack.undo(), &vec!["a"]);
//! assert!(stack.can_redo());
//! assert_eq!(stack.redo(), &vec!["a", "b"]);
//! ```

use tracing::debug;

/// Default number of snapshots kept (0 = unlimited, bounded by the session)
pub const DEFAULT_HISTORY_LIMIT: usize = 0;

/// Undo/redo stack over snapshots of `T`
#[derive(Debug, Clone)]
pub struct UndoStack<T> {
    /// Snapshots, oldest first
    history: Vec<T>,

    /// Index of the current snapshot
    cursor: usize,

    /// Maximum number of snapshots kept (0 = unlimited)
    limit: usize,
}

impl<T: Clone> UndoStack<T> {
    /// Create a stack holding `initial` with unlimited history
    pub fn new(initial: T) -> Self {
        Self::with_limit(initial, DEFAULT_HISTORY_LIMIT)
    }

    /// Create a stack keeping at most `limit` snapshots (0 = unlimited)
    pub fn with_limit(initial: T, limit: usize) -> Self {
        Self {
            history: vec![initial],
            cursor: 0,
            limit,
        }
    }

    /// Record a new state. Redo history beyond the cursor is discarded.
    pub fn push(&mut self, state: T) {
        self.history.truncate(self.cursor + 1);
        self.history.push(state);

        // Trim if exceeded limit; a limit of 1 still keeps the current state
        if self.limit > 0 && self.history.len() > self.limit {
            let excess = self.history.len() - self.limit;
            self.history.drain(..excess);
        }

        self.cursor = self.history.len() - 1;
        debug!(cursor = self.cursor, len = self.history.len(), "History push");
    }

    /// Step back one snapshot. At the earliest snapshot this is a no-op.
    pub fn undo(&mut self) -> &T {
        if self.can_undo() {
            self.cursor -= 1;
            debug!(cursor = self.cursor, "Undo");
        }
        self.current()
    }

    /// Step forward one snapshot. At the latest snapshot this is a no-op.
    pub fn redo(&mut self) -> &T {
        if self.can_redo() {
            self.cursor += 1;
            debug!(cursor = self.cursor, "Redo");
        }
        self.current()
    }

    /// Replace the whole history with `initial`
    pub fn reset(&mut self, initial: T) {
        self.history.clear();
        self.history.push(initial);
        self.cursor = 0;
        debug!("History reset");
    }

    pub fn current(&self) -> &T {
        &self.history[self.cursor]
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    /// Number of snapshots held, current one included
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl<T: Clone + Default> Default for UndoStack<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
