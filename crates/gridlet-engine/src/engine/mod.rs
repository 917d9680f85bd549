//! Spreadsheet engine API.
//!
//! This module provides the core computation engine for the spreadsheet:
//!
//! - [`CellRef`], [`CellKey`] - Address codec (A1 notation ↔ row/col ↔ store key)
//! - [`Cell`], [`CellStore`] - Cell contents and sparse storage
//! - [`classify`] - Decide whether edited text deletes, is a number, or is a formula
//! - [`Evaluator`] - Depth-bounded recursive formula evaluation
//! - [`format_number`] - Format values for display

mod cell;
mod cell_ref;
mod classify;
mod eval;
mod format;

pub use cell::{Cell, CellStore};
pub use cell_ref::{COLS, CellKey, CellRef, ROWS, column_labels};
pub use classify::{InputKind, classify};
pub use eval::{DepthMode, Evaluator, MAX_DEPTH, Operator, evaluate, operate, parse_literal};
pub use format::format_number;
