use super::Document;
use super::state::{MAX_UNDO_STACK, UndoAction};
use crate::error::{GridletError, Result};
use gridlet_engine::EngineError;
use gridlet_engine::engine::{Cell, CellKey, CellRef, InputKind, classify};

impl Document {
    /// Apply text typed into the cell at (`row`, `col`).
    ///
    /// Empty text clears the cell, digits store a literal and `=...` stores a
    /// formula together with its value at this moment. A rejected edit leaves
    /// the document untouched.
    pub fn apply_edit(&mut self, row: usize, col: usize, input: &str) -> Result<()> {
        let key = CellKey::new(row, col)?;
        let new_cell = match self.cell_for_input(input) {
            Ok(cell) => cell,
            Err(e) => {
                tracing::debug!(cell = %key.cell_ref(), error = %e, "edit rejected");
                return Err(e.into());
            }
        };
        tracing::debug!(cell = %key.cell_ref(), input, "edit applied");
        self.write_cell(key, new_cell);
        Ok(())
    }

    /// Same as [`Document::apply_edit`] with the address given in A1 notation.
    pub fn apply_edit_at(&mut self, reference: &str, input: &str) -> Result<()> {
        let cell_ref = CellRef::parse(reference)?;
        self.apply_edit(cell_ref.row, cell_ref.col, input)
    }

    /// Clear the specified cell
    pub fn clear_cell(&mut self, row: usize, col: usize) -> Result<()> {
        let key = CellKey::new(row, col)?;
        self.write_cell(key, None);
        Ok(())
    }

    fn cell_for_input(&self, input: &str) -> std::result::Result<Option<Cell>, EngineError> {
        match classify(input) {
            InputKind::Delete => Ok(None),
            InputKind::Number => Ok(Some(Cell::new_literal(input))),
            InputKind::Equation => {
                let source = input.strip_prefix('=').unwrap_or(input);
                let value = self.evaluator().evaluate(source, 0)?;
                Ok(Some(Cell::new_formula(source, value)))
            }
            InputKind::Invalid => Err(EngineError::InvalidInput {
                input: input.to_string(),
            }),
        }
    }

    /// Store `cell` at `key` (or remove it), recording the change for undo.
    fn write_cell(&mut self, key: CellKey, cell: Option<Cell>) {
        let old_cell = self.store.get(key).cloned();
        if old_cell == cell {
            return;
        }
        self.push_undo(UndoAction {
            key,
            old_cell,
            new_cell: cell.clone(),
        });
        self.store.set(key, cell);
    }

    fn push_undo(&mut self, action: UndoAction) {
        self.undo_stack.push(action);
        self.redo_stack.clear();
        if self.undo_stack.len() > MAX_UNDO_STACK {
            self.undo_stack.remove(0);
        }
    }

    /// Revert the most recent edit. Returns the cell that changed.
    pub fn undo(&mut self) -> Result<CellRef> {
        let action = self.undo_stack.pop().ok_or(GridletError::NothingToUndo)?;
        self.store.set(action.key, action.old_cell.clone());
        let cell_ref = action.key.cell_ref();
        self.redo_stack.push(action);
        Ok(cell_ref)
    }

    /// Re-apply the most recently undone edit. Returns the cell that changed.
    pub fn redo(&mut self) -> Result<CellRef> {
        let action = self.redo_stack.pop().ok_or(GridletError::NothingToRedo)?;
        self.store.set(action.key, action.new_cell.clone());
        let cell_ref = action.key.cell_ref();
        self.undo_stack.push(action);
        Ok(cell_ref)
    }

    /// Re-evaluate every formula against the current cells and refresh the
    /// cached values of those that succeed.
    ///
    /// Cells that fail keep their previous cached value; their errors are
    /// returned in row-major order.
    pub fn recompute_all(&mut self) -> Vec<(CellRef, EngineError)> {
        let evaluator = self.evaluator();
        let results: Vec<(CellKey, std::result::Result<f64, EngineError>)> = self
            .store
            .iter()
            .filter_map(|(key, cell)| match cell {
                Cell::Formula { source, .. } => Some((key, evaluator.evaluate(source, 0))),
                Cell::Literal { .. } => None,
            })
            .collect();

        let mut failures = Vec::new();
        for (key, result) in results {
            match result {
                Ok(value) => {
                    let refreshed = match self.store.get(key) {
                        Some(Cell::Formula { source, .. }) => Cell::new_formula(source, value),
                        _ => continue,
                    };
                    self.store.insert(key, refreshed);
                }
                Err(e) => {
                    tracing::warn!(cell = %key.cell_ref(), error = %e, "recompute failed");
                    failures.push((key.cell_ref(), e));
                }
            }
        }
        failures
    }
}
