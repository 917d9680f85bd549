//! Error types for Gridlet core.

use std::path::PathBuf;

use thiserror::Error;

use gridlet_engine::EngineError;

/// Errors that can occur in the Gridlet document layer
#[derive(Error, Debug)]
pub enum GridletError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}

impl GridletError {
    /// The engine error behind this failure, if any.
    pub fn as_engine(&self) -> Option<&EngineError> {
        match self {
            GridletError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GridletError>;
