//! Cell data structures for the spreadsheet grid.
//!
//! - [`Cell`] - A literal number or a formula with its cached value
//! - [`CellStore`] - Sparse storage for cells, keyed by [`CellKey`]

use std::collections::BTreeMap;

use super::cell_ref::CellKey;
use super::format::format_number;

/// The content of a non-empty cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    /// A number as the user typed it. Kept as text so it redisplays verbatim.
    Literal { text: String },
    /// Formula source (without the leading `=`) and the value computed when it
    /// was written. The cache is not refreshed when dependencies change.
    Formula { source: String, cached_value: f64 },
}

impl Cell {
    pub fn new_literal(text: &str) -> Cell {
        Cell::Literal {
            text: text.to_string(),
        }
    }

    pub fn new_formula(source: &str, cached_value: f64) -> Cell {
        Cell::Formula {
            source: source.to_string(),
            cached_value,
        }
    }

    /// Text shown when the cell is not being edited.
    pub fn display(&self) -> String {
        match self {
            Cell::Literal { text } => text.clone(),
            Cell::Formula { cached_value, .. } => format_number(*cached_value),
        }
    }

    /// Text shown when the cell is opened for editing.
    pub fn to_input_string(&self) -> String {
        match self {
            Cell::Literal { text } => text.clone(),
            Cell::Formula { source, .. } => format!("={}", source),
        }
    }
}

/// Sparse grid storage. A missing entry is a blank cell.
#[derive(Clone, Debug, Default)]
pub struct CellStore {
    cells: BTreeMap<CellKey, Cell>,
}

impl CellStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: CellKey) -> Option<&Cell> {
        self.cells.get(&key)
    }

    /// Insert or replace a cell, returning the previous one.
    pub fn insert(&mut self, key: CellKey, cell: Cell) -> Option<Cell> {
        self.cells.insert(key, cell)
    }

    pub fn remove(&mut self, key: CellKey) -> Option<Cell> {
        self.cells.remove(&key)
    }

    /// Replace the entry at `key` with `cell`, or remove it when `None`.
    pub fn set(&mut self, key: CellKey, cell: Option<Cell>) {
        match cell {
            Some(cell) => {
                self.cells.insert(key, cell);
            }
            None => {
                self.cells.remove(&key);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellKey, &Cell)> {
        self.cells.iter().map(|(key, cell)| (*key, cell))
    }
}
