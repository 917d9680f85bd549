use super::Document;
use crate::error::Result;
use gridlet_engine::EngineError;
use gridlet_engine::engine::{Cell, CellKey, CellRef, format_number};

/// Display text for one stored cell, or the reason it could not be produced.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedCell {
    pub cell_ref: CellRef,
    pub value: std::result::Result<String, EngineError>,
}

impl RenderedCell {
    /// The rendered text, or `marker` if rendering failed.
    pub fn display_or<'a>(&'a self, marker: &'a str) -> &'a str {
        match &self.value {
            Ok(text) => text.as_str(),
            Err(_) => marker,
        }
    }
}

impl Document {
    /// Value shown for a cell outside of editing: the literal text, the cached
    /// formula value, or an empty string for a blank cell.
    pub fn display_value(&self, row: usize, col: usize) -> Result<String> {
        let key = CellKey::new(row, col)?;
        Ok(self.store.get(key).map(Cell::display).unwrap_or_default())
    }

    /// Text an editor shows when the cell gains focus.
    pub fn input_text(&self, row: usize, col: usize) -> Result<String> {
        let key = CellKey::new(row, col)?;
        Ok(self
            .store
            .get(key)
            .map(Cell::to_input_string)
            .unwrap_or_default())
    }

    /// Render every stored cell in row-major order.
    ///
    /// Formulas are evaluated again against the current cells, so the output
    /// follows later edits while cached values stay as they were. A failing
    /// cell is reported in its own entry and does not affect the others.
    pub fn render_all(&self) -> Vec<RenderedCell> {
        let evaluator = self.evaluator();
        self.store
            .iter()
            .map(|(key, cell)| {
                let value = match cell {
                    Cell::Literal { text } => Ok(text.clone()),
                    Cell::Formula { source, .. } => {
                        evaluator.evaluate(source, 0).map(format_number)
                    }
                };
                if let Err(e) = &value {
                    tracing::warn!(cell = %key.cell_ref(), error = %e, "render error");
                }
                RenderedCell {
                    cell_ref: key.cell_ref(),
                    value,
                }
            })
            .collect()
    }

    /// Rendered text for a single cell; blank cells render as an empty string.
    pub fn render_cell(&self, row: usize, col: usize) -> Result<String> {
        let key = CellKey::new(row, col)?;
        let text = match self.store.get(key) {
            None => String::new(),
            Some(Cell::Literal { text }) => text.clone(),
            Some(Cell::Formula { source, .. }) => {
                format_number(self.evaluator().evaluate(source, 0)?)
            }
        };
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_value_of_blank_cell_is_empty() {
        let doc = Document::new();
        assert_eq!(doc.display_value(5, 5).unwrap(), "");
        assert_eq!(doc.input_text(5, 5).unwrap(), "");
    }

    #[test]
    fn test_display_or_uses_marker_on_error() {
        let ok = RenderedCell {
            cell_ref: CellRef::new(0, 0),
            value: Ok("3".to_string()),
        };
        let failed = RenderedCell {
            cell_ref: CellRef::new(0, 1),
            value: Err(EngineError::DepthExceeded { depth: 11 }),
        };
        assert_eq!(ok.display_or("#ERR!"), "3");
        assert_eq!(failed.display_or("#ERR!"), "#ERR!");
    }

    #[test]
    fn test_render_cell_reevaluates() {
        let mut doc = Document::new();
        doc.apply_edit(0, 0, "2").unwrap();
        doc.apply_edit(0, 1, "=A1*A1").unwrap();
        doc.apply_edit(0, 0, "5").unwrap();
        assert_eq!(doc.display_value(0, 1).unwrap(), "4");
        assert_eq!(doc.render_cell(0, 1).unwrap(), "25");
    }
}
