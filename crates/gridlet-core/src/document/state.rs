use gridlet_engine::engine::{Cell, CellKey, CellStore, DepthMode, Evaluator};

use crate::config::Config;

/// Maximum number of undo entries to keep
pub(crate) const MAX_UNDO_STACK: usize = 100;

/// Represents an undoable change to a single cell
#[derive(Clone, Debug, PartialEq)]
pub struct UndoAction {
    pub key: CellKey,
    pub old_cell: Option<Cell>,
    pub new_cell: Option<Cell>,
}

/// UI-agnostic document state for the spreadsheet.
///
/// Owns its cell store exclusively; independent documents share nothing.
pub struct Document {
    /// The spreadsheet cells
    pub(crate) store: CellStore,
    /// How formula nesting depth is counted
    pub depth_mode: DepthMode,
    /// Undo stack
    pub undo_stack: Vec<UndoAction>,
    /// Redo stack
    pub redo_stack: Vec<UndoAction>,
}

impl Document {
    /// Create an empty document with default settings.
    pub fn new() -> Self {
        Self::with_depth_mode(DepthMode::default())
    }

    pub fn with_depth_mode(depth_mode: DepthMode) -> Self {
        Document {
            store: CellStore::new(),
            depth_mode,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn with_config(config: &Config) -> Self {
        Self::with_depth_mode(config.engine.depth_mode)
    }

    /// Read-only view of the stored cells.
    pub fn store(&self) -> &CellStore {
        &self.store
    }

    pub(crate) fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::with_mode(&self.store, self.depth_mode)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
