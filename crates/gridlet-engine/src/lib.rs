//! gridlet_engine - Spreadsheet engine: addresses, classification and formula evaluation.

pub mod engine;
pub mod error;

pub use error::{EngineError, Result};
