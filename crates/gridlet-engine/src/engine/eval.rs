//! Formula evaluation.
//!
//! A formula is a flat chain of cell references joined by `+ - * /`, reduced
//! strictly left to right with no precedence. Referenced formula cells are
//! evaluated recursively from their source text, not from their cached value.
//!
//! There is no cycle detection. Recursion is bounded by [`MAX_DEPTH`]; a
//! reference loop keeps recursing until the bound is hit and then fails with
//! [`EngineError::DepthExceeded`].

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::cell::{Cell, CellStore};
use super::cell_ref::{CellKey, CellRef, reference_re};
use crate::error::{EngineError, Result};

/// Deepest nesting level allowed while resolving references.
pub const MAX_DEPTH: usize = 10;

/// How nesting depth advances across the references of one formula.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepthMode {
    /// A single counter per formula: each reference that resolves to another
    /// formula bumps it before recursing, so the k-th such sibling is evaluated
    /// at `depth + k`.
    #[default]
    Shared,
    /// Every child formula is evaluated at `depth + 1`.
    PerPath,
}

/// Binary operator in a formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_char(c: char) -> Result<Operator> {
        match c {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Sub),
            '*' => Ok(Operator::Mul),
            '/' => Ok(Operator::Div),
            other => Err(EngineError::MalformedOperator { op: Some(other) }),
        }
    }

    /// Apply with IEEE semantics; dividing by zero yields an infinity or NaN.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
            Operator::Div => lhs / rhs,
        }
    }
}

/// Evaluates formula text against a cell store. Never mutates the store.
///
/// Results of referenced formula cells are memoized per `(cell, depth)` for
/// the lifetime of the evaluator. The store is borrowed immutably, so a cell
/// evaluated at a given depth always yields the same result.
pub struct Evaluator<'a> {
    store: &'a CellStore,
    mode: DepthMode,
    memo: RefCell<HashMap<(CellKey, usize), Result<f64>>>,
}

impl<'a> Evaluator<'a> {
    pub fn new(store: &'a CellStore) -> Self {
        Self::with_mode(store, DepthMode::default())
    }

    pub fn with_mode(store: &'a CellStore, mode: DepthMode) -> Self {
        Evaluator {
            store,
            mode,
            memo: RefCell::new(HashMap::new()),
        }
    }

    /// Evaluate `formula` (without the leading `=`) at nesting level `depth`.
    pub fn evaluate(&self, formula: &str, depth: usize) -> Result<f64> {
        if depth > MAX_DEPTH {
            return Err(EngineError::DepthExceeded { depth });
        }
        tracing::trace!(formula, depth, "evaluating formula");

        let operators = extract_operators(formula);

        // Every reference must exist before any of them is evaluated.
        let cells = reference_re()
            .find_iter(formula)
            .map(|m| self.resolve(m.as_str()))
            .collect::<Result<Vec<(CellKey, &Cell)>>>()?;

        let mut depth = depth;
        let mut values = Vec::with_capacity(cells.len());
        for (key, cell) in cells {
            let value = match cell {
                Cell::Formula { source, .. } => {
                    let child_depth = match self.mode {
                        DepthMode::Shared => {
                            depth += 1;
                            depth
                        }
                        DepthMode::PerPath => depth + 1,
                    };
                    self.evaluate_cell(key, source, child_depth)?
                }
                Cell::Literal { text } => parse_literal(text)?,
            };
            values.push(value);
        }

        if values.is_empty() {
            return Err(EngineError::EmptyFormula {
                formula: formula.to_string(),
            });
        }
        operate(&values, &operators)
    }

    fn evaluate_cell(&self, key: CellKey, source: &str, depth: usize) -> Result<f64> {
        let cached = self.memo.borrow().get(&(key, depth)).cloned();
        if let Some(result) = cached {
            return result;
        }
        let result = self.evaluate(source, depth);
        self.memo.borrow_mut().insert((key, depth), result.clone());
        result
    }

    fn resolve(&self, reference: &str) -> Result<(CellKey, &'a Cell)> {
        let key = CellRef::parse(reference)?.key()?;
        let cell = self
            .store
            .get(key)
            .ok_or_else(|| EngineError::MissingReference {
                reference: reference.to_string(),
            })?;
        Ok((key, cell))
    }
}

/// Evaluate with the default depth mode.
pub fn evaluate(store: &CellStore, formula: &str, depth: usize) -> Result<f64> {
    Evaluator::new(store).evaluate(formula, depth)
}

/// Operator characters in order of appearance. Anything else is ignored.
fn extract_operators(formula: &str) -> Vec<char> {
    formula
        .chars()
        .filter(|c| matches!(c, '+' | '-' | '*' | '/'))
        .collect()
}

/// Fold `values` left to right: `values[0] op[0] values[1] op[1] ...`.
///
/// Extra operators are ignored; a missing or unknown operator is an error.
pub fn operate(values: &[f64], operators: &[char]) -> Result<f64> {
    let Some((&first, rest)) = values.split_first() else {
        return Err(EngineError::EmptyFormula {
            formula: String::new(),
        });
    };

    let mut result = first;
    for (i, &value) in rest.iter().enumerate() {
        let op = operators
            .get(i)
            .copied()
            .ok_or(EngineError::MalformedOperator { op: None })
            .and_then(Operator::from_char)?;
        result = op.apply(result, value);
    }
    Ok(result)
}

/// Parse the leading integer of a literal's text.
///
/// Leading whitespace and a sign are accepted, then the longest run of ASCII
/// digits; anything after it is ignored ("12.7" is 12). No digits is an error.
pub fn parse_literal(text: &str) -> Result<f64> {
    let trimmed = text.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = unsigned
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    let invalid = || EngineError::InvalidLiteral {
        text: text.to_string(),
    };
    if digits_len == 0 {
        return Err(invalid());
    }
    let magnitude: f64 = unsigned[..digits_len].parse().map_err(|_| invalid())?;
    Ok(if negative { -magnitude } else { magnitude })
}
