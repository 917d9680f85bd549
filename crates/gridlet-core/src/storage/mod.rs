//! Export of rendered values. There is no import: documents live in memory only.

mod csv;
mod md;

pub use csv::{write_csv, write_csv_to};
pub use md::{write_markdown, write_markdown_to};

use std::collections::BTreeMap;

use crate::document::Document;
use gridlet_engine::engine::CellRef;

/// Rendered text of every stored cell, with `marker` in place of failures.
fn rendered_cells(doc: &Document, marker: &str) -> BTreeMap<CellRef, String> {
    doc.render_all()
        .into_iter()
        .map(|cell| {
            let text = cell.display_or(marker).to_string();
            (cell.cell_ref, text)
        })
        .collect()
}
