//! Edit scripts: one `<REF> <TEXT>` edit per line.
//!
//! ```text
//! # comment
//! A1 3
//! B1 4
//! C1 =A1+B1
//! A1
//! ```
//!
//! A reference with no text deletes the cell.

use std::fmt;

use crate::error::{CliError, Result};

/// Where an edit came from, for error reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Line(usize),
    Set,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Line(n) => write!(f, "line {}", n),
            Source::Set => write!(f, "--set"),
        }
    }
}

/// A single edit to apply to the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edit {
    pub source: Source,
    pub reference: String,
    pub text: String,
}

impl Edit {
    /// Parse a `--set` argument of the form `REF=TEXT`.
    pub fn from_assignment(arg: &str) -> Result<Edit> {
        let (reference, text) = arg
            .split_once('=')
            .ok_or_else(|| CliError::InvalidAssignment(arg.to_string()))?;
        if reference.is_empty() {
            return Err(CliError::InvalidAssignment(arg.to_string()));
        }
        Ok(Edit {
            source: Source::Set,
            reference: reference.to_string(),
            text: text.to_string(),
        })
    }
}

/// Parse a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(content: &str) -> Vec<Edit> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(idx + 1, line))
        .collect()
}

fn parse_line(line_no: usize, line: &str) -> Option<Edit> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (reference, text) = match line.split_once(char::is_whitespace) {
        Some((reference, rest)) => (reference, rest.trim_start()),
        None => (line, ""),
    };
    Some(Edit {
        source: Source::Line(line_no),
        reference: reference.to_string(),
        text: text.to_string(),
    })
}
