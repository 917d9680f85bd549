//! CSV export functionality

use std::io::Write;
use std::path::Path;

use super::rendered_cells;
use crate::document::Document;
use crate::error::Result;
use gridlet_engine::engine::CellRef;

/// Export rendered values to a CSV file.
pub fn write_csv(path: &Path, doc: &Document, error_marker: &str) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_csv_to(&mut file, doc, error_marker)?;
    Ok(())
}

/// Write rendered values as CSV, from A1 to the last populated row and column.
pub fn write_csv_to<W: Write>(w: &mut W, doc: &Document, error_marker: &str) -> Result<()> {
    let cells = rendered_cells(doc, error_marker);
    let Some(max_row) = cells.keys().map(|c| c.row).max() else {
        return Ok(());
    };
    let max_col = cells.keys().map(|c| c.col).max().unwrap_or(0);

    for row in 0..=max_row {
        let fields: Vec<String> = (0..=max_col)
            .map(|col| {
                cells
                    .get(&CellRef::new(row, col))
                    .map(|value| escape_csv_field(value))
                    .unwrap_or_default()
            })
            .collect();
        writeln!(w, "{}", fields.join(","))?;
    }
    Ok(())
}

/// Escape a field for CSV output
fn escape_csv_field(field: &str) -> String {
    // Guard against CSV formula injection in spreadsheet apps. Negative
    // numbers are left alone.
    let first_non_space = field.trim_start_matches([' ', '\t']).chars().next();
    let is_number = field.parse::<f64>().is_ok();
    let safe_field = if !is_number && matches!(first_non_space, Some('=' | '+' | '-' | '@')) {
        format!("'{}", field)
    } else {
        field.to_string()
    };

    if safe_field.contains(',')
        || safe_field.contains('"')
        || safe_field.contains('\n')
        || safe_field.contains('\r')
    {
        format!("\"{}\"", safe_field.replace('"', "\"\""))
    } else {
        safe_field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_csv_field() {
        assert_eq!(escape_csv_field("simple"), "simple");
        assert_eq!(escape_csv_field("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv_field("with\"quote"), "\"with\"\"quote\"");
    }

    #[test]
    fn test_escape_csv_field_formula_injection() {
        assert_eq!(escape_csv_field("=1+1"), "'=1+1");
        assert_eq!(escape_csv_field("-#INF!"), "'-#INF!");
        assert_eq!(escape_csv_field("-3"), "-3");
    }

    #[test]
    fn test_csv_starts_at_origin() {
        let mut doc = Document::new();
        doc.apply_edit(1, 1, "6").unwrap();
        doc.apply_edit(0, 2, "2").unwrap();
        doc.apply_edit(1, 2, "=B2/C1").unwrap();

        let mut out = Vec::new();
        write_csv_to(&mut out, &doc, "#ERR!").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ",,2\n,6,3\n");
    }

    #[test]
    fn test_csv_empty_document_writes_nothing() {
        let mut out = Vec::new();
        write_csv_to(&mut out, &Document::new(), "#ERR!").unwrap();
        assert!(out.is_empty());
    }
}
