//! # Transitions
//!
//! Ways of joining two clips into one.
//!
//! ## Built-in Transitions
//!
//! - **crossfade**: overlapping dissolve (the default)
//! - **slide**: first image rises in from the bottom
//! - **zoom**: keep pushing into the first image
//! - **spin**: rotate the first image
//!
//! ## Usage
//!
//! ```rust,no_run
//! use slideshow_compositor::transitions::TransitionRegistry;
//! use slideshow_compositor::video::{Clip, Frame};
//!
//! let registry = TransitionRegistry::new();
//! let crossfade = registry.get_transition("crossfade").unwrap();
//!
//! let a = Clip::still(Frame::new_black(1280, 720), 2.0);
//! let b = Clip::still(Frame::new_filled(1280, 720, [255, 255, 255]), 2.0);
//! let joined = crossfade.apply(&a, &b, 1.0).unwrap();
//! assert_eq!(joined.duration(), 3.0);
//! ```

pub mod registry;
pub mod traits;

pub mod crossfade;
pub mod slide;
pub mod zoom;
pub mod spin;

pub use registry::TransitionRegistry;
pub use traits::{validate_pair, Transition};

pub use crossfade::Crossfade;
pub use slide::SlideUp;
pub use zoom::ZoomIn;
pub use spin::Spin;
