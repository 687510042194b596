//! # Slideshow-Compositor
//!
//! Turn a directory of images into a slideshow video: every image is shown
//! for a fixed time, neighbours are joined by a transition (crossfade by
//! default), a title card is put in front, and the result is encoded with
//! FFmpeg.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use slideshow_compositor::{
//!     composition::SlideshowEngine,
//!     config::Config,
//!     transitions::TransitionRegistry,
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut config = Config::default();
//! config.input.image_dir = "holiday/".into();
//! config.title.font_path = "fonts/title.ttf".into();
//!
//! let registry = TransitionRegistry::new();
//! let crossfade = registry.get_transition("crossfade").unwrap();
//!
//! let engine = SlideshowEngine::new(config, crossfade);
//! engine.run()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`video`] - Frames, clips, image loading and encoding
//! - [`transitions`] - Ways of joining two clips
//! - [`text`] - Title card rendering
//! - [`composition`] - The slideshow pipeline
//! - [`config`] - Configuration management
//!
//! ## Custom Transitions
//!
//! Implement [`Transition`](transitions::Transition) and register it:
//!
//! ```rust,no_run
//! use slideshow_compositor::transitions::{Transition, TransitionRegistry};
//! use slideshow_compositor::video::Clip;
//! use slideshow_compositor::Result;
//!
//! struct HardCut;
//!
//! impl Transition for HardCut {
//!     fn name(&self) -> &str {
//!         "cut"
//!     }
//!
//!     fn description(&self) -> &str {
//!         "No effect at all"
//!     }
//!
//!     fn apply(&self, first: &Clip, second: &Clip, _duration: f64) -> Result<Clip> {
//!         Clip::concatenate(vec![first.clone(), second.clone()])
//!     }
//! }
//!
//! let mut registry = TransitionRegistry::new();
//! registry.register("cut".to_string(), || Box::new(HardCut));
//! ```

pub mod composition;
pub mod config;
pub mod error;
pub mod text;
pub mod transitions;
pub mod video;

// Re-export commonly used types for convenience
pub use crate::{
    composition::SlideshowEngine,
    config::Config,
    error::{Result, SlideshowError},
    transitions::{Transition, TransitionRegistry},
};
