use image::{imageops::FilterType, ImageBuffer, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, VideoError};

/// Represents a single video frame
///
/// A thin wrapper around an RGB image buffer. Every frame that reaches the
/// encoder is RGB8 at the output resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    buffer: RgbImage,
}

impl Frame {
    /// Create a new frame from an RGB image buffer
    pub fn new(buffer: RgbImage) -> Self {
        Self { buffer }
    }

    /// Create a new frame with the given dimensions filled with black
    pub fn new_black(width: u32, height: u32) -> Self {
        let buffer = ImageBuffer::new(width, height);
        Self { buffer }
    }

    /// Create a new frame with the given dimensions filled with the specified color
    pub fn new_filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let buffer = ImageBuffer::from_pixel(width, height, Rgb(color));
        Self { buffer }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// (width, height)
    pub fn resolution(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// Get a pixel at the given coordinates (returns RGB array)
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.buffer.get_pixel(x, y).0
    }

    /// Set a pixel at the given coordinates
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 3]) {
        self.buffer.put_pixel(x, y, Rgb(color));
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &RgbImage {
        &self.buffer
    }

    /// Get a mutable reference to the underlying image buffer
    pub fn as_image_mut(&mut self) -> &mut RgbImage {
        &mut self.buffer
    }

    /// Consume the frame and return its image buffer
    pub fn into_image(self) -> RgbImage {
        self.buffer
    }

    /// Raw interleaved RGB bytes, row-major
    pub fn as_rgb_bytes(&self) -> &[u8] {
        self.buffer.as_raw()
    }

    /// Create a frame from raw RGB bytes
    pub fn from_rgb_bytes(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        ImageBuffer::from_raw(width, height, data)
            .map(|buffer| Self { buffer })
    }

    /// Resize to exactly `width` x `height`, ignoring aspect ratio
    pub fn resized(&self, width: u32, height: u32) -> Frame {
        if self.resolution() == (width, height) {
            return self.clone();
        }
        Frame::new(image::imageops::resize(
            &self.buffer,
            width,
            height,
            FilterType::Lanczos3,
        ))
    }

    /// Linear mix of two frames: `alpha = 0.0` is `self`, `1.0` is `other`
    pub fn blend(&self, other: &Frame, alpha: f32) -> Result<Frame> {
        if self.resolution() != other.resolution() {
            return Err(VideoError::ResolutionMismatch {
                expected: self.resolution(),
                found: other.resolution(),
            }
            .into());
        }

        let alpha = alpha.clamp(0.0, 1.0);
        let data = self
            .buffer
            .as_raw()
            .iter()
            .zip(other.buffer.as_raw())
            .map(|(&a, &b)| (a as f32 * (1.0 - alpha) + b as f32 * alpha).round() as u8)
            .collect();

        Frame::from_rgb_bytes(self.width(), self.height(), data).ok_or_else(|| {
            VideoError::InvalidParameters {
                details: "blended buffer has the wrong length".to_string(),
            }
            .into()
        })
    }

    /// Save the frame as a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), image::ImageError> {
        self.buffer.save_with_format(path, image::ImageFormat::Png)
    }

    /// Save the frame as a JPEG file
    pub fn save_jpeg<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), image::ImageError> {
        self.buffer.save_with_format(path, image::ImageFormat::Jpeg)
    }
}

/// Video processing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoParams {
    /// Target frame rate for output
    pub fps: f64,

    /// Target resolution (width, height)
    pub resolution: (u32, u32),

    /// Video codec to use for output
    pub codec: String,

    /// Quality setting (0-100, higher is better)
    pub quality: u8,
}

impl Default for VideoParams {
    fn default() -> Self {
        Self {
            fps: 24.0,
            resolution: (1280, 720),
            codec: "libx264".to_string(),
            quality: 85,
        }
    }
}

impl VideoParams {
    /// Number of frames needed to cover `duration` seconds
    pub fn frame_count(&self, duration: f64) -> usize {
        (duration * self.fps).round().max(0.0) as usize
    }
}
