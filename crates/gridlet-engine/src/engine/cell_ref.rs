//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "B2", "AB12") and zero-indexed row/column coordinates, plus the
//! canonical [`CellKey`] used to index the cell store.
//!
//! Only one- and two-letter columns are understood. The grid is fixed at
//! [`ROWS`] x [`COLS`], well inside the "ZZ" ceiling of the label encoding.
//!
//! # Examples
//!
//! ```
//! use gridlet_engine::engine::CellRef;
//!
//! let cell = CellRef::parse("B3").unwrap();
//! assert_eq!(cell.col, 1); // 0-indexed
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{EngineError, Result};

/// Number of addressable rows.
pub const ROWS: usize = 100;
/// Number of addressable columns.
pub const COLS: usize = 100;

/// Highest column index with a label ("ZZ").
const MAX_LABEL_COL: usize = 26 * 26 + 25;

/// A reference to a cell by row and column indices (0-indexed).
///
/// Ordering is row-major, which is also the order of [`CellKey`].
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell reference from spreadsheet notation (e.g., "A1", "ab12").
    /// Returns None if the input is invalid.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        Self::parse(name).ok()
    }

    /// Decode 1-2 letters followed by 1-2 digits. Letters are case-insensitive and
    /// the row number is 1-based in the text.
    ///
    /// The decoded address is not bounds-checked above; see [`CellRef::key`].
    /// A row number of zero ("A0") has no index and fails with `OutOfRange`.
    pub fn parse(name: &str) -> Result<CellRef> {
        let parse_err = || EngineError::Parse {
            text: name.to_string(),
        };
        let caps = address_re().captures(name).ok_or_else(parse_err)?;
        let letters = caps["letters"].to_ascii_uppercase();
        let number: usize = caps["numbers"].parse().map_err(|_| parse_err())?;

        let bytes = letters.as_bytes();
        let col = match bytes {
            [single] => (single - b'A') as usize,
            [first, second] => (first - b'A' + 1) as usize * 26 + (second - b'A') as usize,
            _ => return Err(parse_err()),
        };

        let row = number
            .checked_sub(1)
            .ok_or(EngineError::OutOfRange { row: usize::MAX, col })?;

        Ok(CellRef::new(row, col))
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    ///
    /// Only one or two letters are produced, so anything past "ZZ" (index 701)
    /// has no label and returns None.
    pub fn col_to_letters(col: usize) -> Option<String> {
        if col > MAX_LABEL_COL {
            return None;
        }
        let last = (b'A' + (col % 26) as u8) as char;
        if col < 26 {
            return Some(last.to_string());
        }
        let first = (b'A' + (col / 26) as u8 - 1) as char;
        Some(format!("{first}{last}"))
    }

    /// Canonical store key for this reference.
    pub fn key(&self) -> Result<CellKey> {
        CellKey::new(self.row, self.col)
    }
}

impl std::str::FromStr for CellRef {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match CellRef::col_to_letters(self.col) {
            Some(letters) => write!(f, "{}{}", letters, self.row + 1),
            None => write!(f, "R{}C{}", self.row + 1, self.col + 1),
        }
    }
}

/// Injective encoding of an in-grid address: `row * COLS + col`.
///
/// Equivalent to concatenating the two-digit padded row and column, so the
/// ordering matches that of the zero-padded string key.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CellKey(u16);

impl CellKey {
    pub fn new(row: usize, col: usize) -> Result<CellKey> {
        if row >= ROWS || col >= COLS {
            return Err(EngineError::OutOfRange { row, col });
        }
        Ok(CellKey((row * COLS + col) as u16))
    }

    pub fn row(self) -> usize {
        self.0 as usize / COLS
    }

    pub fn col(self) -> usize {
        self.0 as usize % COLS
    }

    pub fn cell_ref(self) -> CellRef {
        CellRef::new(self.row(), self.col())
    }
}

impl From<CellKey> for CellRef {
    fn from(key: CellKey) -> CellRef {
        key.cell_ref()
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.row(), self.col())
    }
}

/// Header labels for every column of the grid, left to right.
pub fn column_labels() -> impl Iterator<Item = String> {
    (0..COLS).filter_map(CellRef::col_to_letters)
}

fn address_re() -> &'static Regex {
    static ADDRESS_RE: OnceLock<Regex> = OnceLock::new();
    ADDRESS_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]{1,2})(?<numbers>[0-9]{1,2})$")
            .expect("address regex must compile")
    })
}

/// Unanchored reference token pattern, used to scan formulas.
pub(crate) fn reference_re() -> &'static Regex {
    static REFERENCE_RE: OnceLock<Regex> = OnceLock::new();
    REFERENCE_RE.get_or_init(|| {
        Regex::new(r"[A-Za-z]{1,2}[0-9]{1,2}").expect("reference token regex must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_to_letters_boundaries() {
        assert_eq!(CellRef::col_to_letters(0).as_deref(), Some("A"));
        assert_eq!(CellRef::col_to_letters(25).as_deref(), Some("Z"));
        assert_eq!(CellRef::col_to_letters(26).as_deref(), Some("AA"));
        assert_eq!(CellRef::col_to_letters(27).as_deref(), Some("AB"));
        assert_eq!(CellRef::col_to_letters(99).as_deref(), Some("CV"));
        assert_eq!(CellRef::col_to_letters(701).as_deref(), Some("ZZ"));
    }

    #[test]
    fn test_col_to_letters_stops_after_zz() {
        assert!(CellRef::col_to_letters(702).is_none());
        assert!(CellRef::col_to_letters(usize::MAX).is_none());
    }

    #[test]
    fn test_parse_two_letter_column_matches_label() {
        let aa1 = CellRef::parse("AA1").unwrap();
        assert_eq!(aa1, CellRef::new(0, 26));
        assert_eq!(CellRef::col_to_letters(aa1.col).as_deref(), Some("AA"));
    }

    #[test]
    fn test_parse_rejects_long_parts() {
        assert!(CellRef::parse("ABC1").is_err());
        assert!(CellRef::parse("A100").is_err());
        assert!(CellRef::parse(" A1").is_err());
    }

    #[test]
    fn test_parse_zero_row_is_out_of_range() {
        assert_eq!(
            CellRef::parse("A0"),
            Err(EngineError::OutOfRange {
                row: usize::MAX,
                col: 0
            })
        );
        assert!(matches!(
            CellRef::parse("ab0"),
            Err(EngineError::OutOfRange { col: 27, .. })
        ));
    }

    #[test]
    fn test_key_out_of_range() {
        assert_eq!(
            CellKey::new(100, 0),
            Err(EngineError::OutOfRange { row: 100, col: 0 })
        );
        assert!(CellRef::parse("ZZ1").unwrap().key().is_err());
        assert!(CellRef::new(0, 100).key().is_err());
    }

    #[test]
    fn test_key_is_injective_and_round_trips() {
        let mut seen = std::collections::HashSet::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                let key = CellKey::new(row, col).unwrap();
                assert!(seen.insert(key));
                assert_eq!(key.cell_ref(), CellRef::new(row, col));
            }
        }
    }

    #[test]
    fn test_key_display_is_zero_padded() {
        assert_eq!(CellKey::new(0, 0).unwrap().to_string(), "0000");
        assert_eq!(CellKey::new(3, 27).unwrap().to_string(), "0327");
        assert_eq!(CellKey::new(99, 99).unwrap().to_string(), "9999");
    }

    #[test]
    fn test_column_labels_cover_grid() {
        let labels: Vec<String> = column_labels().collect();
        assert_eq!(labels.len(), COLS);
        assert_eq!(labels[0], "A");
        assert_eq!(labels[26], "AA");
        assert_eq!(labels[COLS - 1], "CV");
    }
}
