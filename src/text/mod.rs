//! # Text Rendering
//!
//! Rasterizes title cards: centered text on a solid background.

pub mod renderer;

pub use renderer::{TextRenderer, TextStyle};
