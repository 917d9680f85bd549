//! Error types for the Gridlet engine.

use thiserror::Error;

/// Errors produced while decoding addresses, classifying input or evaluating formulas.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid input: {input:?} is neither a number nor an equation")]
    InvalidInput { input: String },

    #[error("Invalid selection: no data at cell {reference}")]
    MissingReference { reference: String },

    #[error("Loop protection: formula nesting exceeded depth {depth}")]
    DepthExceeded { depth: usize },

    #[error("Invalid operator {op:?}: must be +, -, *, or /")]
    MalformedOperator { op: Option<char> },

    /// Zero-based indices; a zero row number in A1 text is reported as `usize::MAX`.
    #[error("Address out of range: row {row}, col {col} (max 99)")]
    OutOfRange { row: usize, col: usize },

    #[error("Invalid cell reference: {text:?}")]
    Parse { text: String },

    #[error("Cell text {text:?} does not start with an integer")]
    InvalidLiteral { text: String },

    #[error("Formula {formula:?} references no cells")]
    EmptyFormula { formula: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
