//! # Video Module
//!
//! Frames, timed clips, image loading and output encoding.

pub mod types;
pub mod clip;

// Encoding goes through the ffmpeg executable, no native linking
mod loader;
mod encoder;

pub use types::{Frame, VideoParams};
pub use clip::{Clip, FrameSource, Sequence};
pub use loader::ImageLoader;
pub use encoder::{VideoEncoder, EncodedVideo};
