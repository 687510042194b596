//! # Composition Engine
//!
//! The slideshow engine coordinates image loading, transitions, the title
//! card and encoding.

pub mod engine;

// Re-exports for convenience
pub use engine::SlideshowEngine;
