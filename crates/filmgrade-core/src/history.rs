//! Undo/redo history over the adjustment state.
//!
//! Snapshot discipline: the host records a snapshot *before* applying an
//! intentional edit gesture; recording clears the redo stack. Undo and
//! redo are mirror operations and silently ignore empty stacks.
//!
//! Snapshots are full clones of [`AdjustmentState`]; loaded LUT grids are
//! `Arc`-shared, so snapshots stay cheap even with LUTs loaded.

use crate::AdjustmentState;

/// Snapshot-based undo/redo stacks.
///
/// # Example
///
/// ```rust
/// use filmgrade_core::{AdjustmentState, History};
///
/// let mut history = History::new();
/// let mut state = AdjustmentState::default();
///
/// history.record(&state);
/// state.contrast = 40.0;
///
/// state = history.undo(&state).unwrap();
/// assert_eq!(state.contrast, 0.0);
///
/// state = history.redo(&state).unwrap();
/// assert_eq!(state.contrast, 40.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct History {
    undo: Vec<AdjustmentState>,
    redo: Vec<AdjustmentState>,
}

impl History {
    /// Creates empty history stacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a snapshot of the state about to be mutated.
    ///
    /// Clears the redo stack: a new edit invalidates any undone future.
    pub fn record(&mut self, state: &AdjustmentState) {
        self.undo.push(state.clone());
        self.redo.clear();
    }

    /// Undoes the last edit.
    ///
    /// Pushes `current` onto the redo stack and returns the restored
    /// snapshot, or `None` if there is nothing to undo.
    #[must_use]
    pub fn undo(&mut self, current: &AdjustmentState) -> Option<AdjustmentState> {
        let restored = self.undo.pop()?;
        self.redo.push(current.clone());
        Some(restored)
    }

    /// Redoes the last undone edit.
    ///
    /// Pushes `current` onto the undo stack and returns the restored
    /// snapshot, or `None` if there is nothing to redo.
    #[must_use]
    pub fn redo(&mut self, current: &AdjustmentState) -> Option<AdjustmentState> {
        let restored = self.redo.pop()?;
        self.undo.push(current.clone());
        Some(restored)
    }

    /// Number of undoable snapshots.
    #[inline]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of redoable snapshots.
    #[inline]
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Drops all snapshots.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
