//! Markdown export functionality

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use super::rendered_cells;
use crate::document::Document;
use crate::error::Result;
use gridlet_engine::engine::{CellRef, column_labels};

/// Write the grid to a markdown file
pub fn write_markdown(path: &Path, doc: &Document, error_marker: &str) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_markdown_to(&mut file, doc, error_marker)?;
    Ok(())
}

/// Write the grid as a markdown table, bounded by the populated cells.
pub fn write_markdown_to<W: Write>(w: &mut W, doc: &Document, error_marker: &str) -> Result<()> {
    let cells = rendered_cells(doc, error_marker);

    writeln!(w, "# Sheet")?;
    writeln!(w)?;

    let Some((min_row, min_col, max_row, max_col)) = find_grid_bounds(&cells) else {
        writeln!(w, "*Empty spreadsheet*")?;
        return Ok(());
    };

    // Header with column letters
    write!(w, "|   |")?;
    for label in column_labels().skip(min_col).take(max_col - min_col + 1) {
        write!(w, " {} |", label)?;
    }
    writeln!(w)?;

    write!(w, "|---|")?;
    for _ in min_col..=max_col {
        write!(w, "---|")?;
    }
    writeln!(w)?;

    for row in min_row..=max_row {
        write!(w, "| {} |", row + 1)?; // 1-based row numbers
        for col in min_col..=max_col {
            let display = cells
                .get(&CellRef::new(row, col))
                .map(String::as_str)
                .unwrap_or("");
            write!(w, " {} |", escape_markdown(display))?;
        }
        writeln!(w)?;
    }

    Ok(())
}

/// Find the bounds of the populated cells (min_row, min_col, max_row, max_col)
fn find_grid_bounds(cells: &BTreeMap<CellRef, String>) -> Option<(usize, usize, usize, usize)> {
    let mut refs = cells.keys();
    let first = refs.next()?;
    let mut bounds = (first.row, first.col, first.row, first.col);
    for cell_ref in refs {
        bounds.0 = bounds.0.min(cell_ref.row);
        bounds.1 = bounds.1.min(cell_ref.col);
        bounds.2 = bounds.2.max(cell_ref.row);
        bounds.3 = bounds.3.max(cell_ref.col);
    }
    Some(bounds)
}

/// Escape special markdown characters in cell content
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', "")
}
