//! Error types for the Gridlet command line

use thiserror::Error;

/// Errors raised while reading arguments and edit scripts
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid assignment {0:?}: expected REF=TEXT")]
    InvalidAssignment(String),

    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
