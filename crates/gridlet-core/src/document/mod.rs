//! Document state and logic (UI-agnostic).

mod ops;
mod render;
mod state;

pub use render::RenderedCell;
pub use state::{Document, UndoAction};
