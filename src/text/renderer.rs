use std::path::Path;

use ab_glyph::{FontArc, PxScale};
use imageproc::drawing::{draw_text_mut, text_size};
use image::Rgb;
use tracing::debug;

use crate::error::{Result, TextError};
use crate::video::types::Frame;

/// Colors and canvas for a rendered text card
#[derive(Debug, Clone)]
pub struct TextStyle {
    pub font_size: f32,
    pub text_color: [u8; 3],
    pub background_color: [u8; 3],
    /// (width, height) of the output frame
    pub canvas: (u32, u32),
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 70.0,
            text_color: [255, 255, 255],
            background_color: [0, 0, 0],
            canvas: (1280, 720),
        }
    }
}

/// Draws centered single-line text with a TrueType/OpenType font
pub struct TextRenderer {
    font: FontArc,
}

impl TextRenderer {
    /// Load the font at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|_| TextError::FontNotFound {
            path: path.display().to_string(),
        })?;

        debug!("Loaded font {:?} ({} bytes)", path, bytes.len());
        Self::from_bytes(bytes).map_err(|_| {
            TextError::InvalidFont {
                path: path.display().to_string(),
            }
            .into()
        })
    }

    /// Build a renderer from in-memory font data
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let font = FontArc::try_from_vec(bytes).map_err(|_| TextError::InvalidFont {
            path: "<memory>".to_string(),
        })?;
        Ok(Self { font })
    }

    /// Pixel size of `text` laid out at `font_size`
    pub fn measure(&self, text: &str, font_size: f32) -> (u32, u32) {
        text_size(PxScale::from(font_size), &self.font, text)
    }

    /// Top-left corner that centers a `text_size` box on `canvas`
    ///
    /// Negative when the text is larger than the canvas; drawing clips.
    /// Odd overflows round towards the top-left.
    pub fn centered_origin(canvas: (u32, u32), text_size: (u32, u32)) -> (i32, i32) {
        let x = (canvas.0 as i64 - text_size.0 as i64).div_euclid(2);
        let y = (canvas.1 as i64 - text_size.1 as i64).div_euclid(2);
        (x as i32, y as i32)
    }

    /// Render `text` centered on a solid canvas
    ///
    /// The returned frame is always exactly `style.canvas` in size.
    pub fn render(&self, text: &str, style: &TextStyle) -> Result<Frame> {
        let (width, height) = style.canvas;
        if width == 0 || height == 0 {
            return Err(TextError::InvalidCanvas { width, height }.into());
        }

        let mut frame = Frame::new_filled(width, height, style.background_color);
        let size = self.measure(text, style.font_size);
        let (x, y) = Self::centered_origin(style.canvas, size);

        debug!("Rendering {:?} ({}x{}) at ({}, {})", text, size.0, size.1, x, y);
        draw_text_mut(
            frame.as_image_mut(),
            Rgb(style.text_color),
            x,
            y,
            PxScale::from(style.font_size),
            &self.font,
            text,
        );

        Ok(frame)
    }
}
