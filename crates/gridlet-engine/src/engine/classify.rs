//! Classification of raw text typed into a cell.

use regex::Regex;
use std::sync::OnceLock;

/// What an edit means for the cell it was typed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// Empty input clears the cell.
    Delete,
    /// Digits only.
    Number,
    /// `=` followed by references joined with `+ - * /`.
    Equation,
    Invalid,
}

/// Decide how an edit should be applied.
///
/// Only the empty string deletes; whitespace is not trimmed and is invalid
/// everywhere. Number validation is deliberately loose: leading zeros are fine.
pub fn classify(input: &str) -> InputKind {
    if input.is_empty() {
        InputKind::Delete
    } else if number_re().is_match(input) {
        InputKind::Number
    } else if equation_re().is_match(input) {
        InputKind::Equation
    } else {
        InputKind::Invalid
    }
}

fn number_re() -> &'static Regex {
    static NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    NUMBER_RE.get_or_init(|| Regex::new(r"^[0-9]*$").expect("number regex must compile"))
}

fn equation_re() -> &'static Regex {
    static EQUATION_RE: OnceLock<Regex> = OnceLock::new();
    EQUATION_RE.get_or_init(|| {
        Regex::new(r"^=[A-Za-z]{1,2}[0-9]{1,2}(?:[-+*/][A-Za-z]{1,2}[0-9]{1,2})*$")
            .expect("equation regex must compile")
    })
}
