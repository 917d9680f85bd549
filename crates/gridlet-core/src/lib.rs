//! gridlet-core - UI-agnostic document model, configuration and export.

pub mod config;
pub mod document;
pub mod error;
pub mod storage;

pub use config::Config;
pub use document::{Document, RenderedCell, UndoAction};
pub use error::{GridletError, Result};

pub use gridlet_engine::engine::CellRef;
