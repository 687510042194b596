use image::imageops::{self, FilterType};

use crate::{
    error::Result,
    transitions::traits::{validate_pair, Transition},
    video::{Clip, Frame, FrameSource},
};

/// Scale gained per transition duration
pub const ZOOM_RATE: f64 = 0.5;

/// Keep pushing into the first clip (`1 + 0.5 * t / d` about the center),
/// then cut
pub struct ZoomIn;

impl ZoomIn {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ZoomIn {
    fn default() -> Self {
        Self::new()
    }
}

impl Transition for ZoomIn {
    fn name(&self) -> &str {
        "zoom"
    }

    fn description(&self) -> &str {
        "Zoom into the center of the image before cutting to the next one"
    }

    fn apply(&self, first: &Clip, second: &Clip, duration: f64) -> Result<Clip> {
        validate_pair(first, second, duration, self.max_duration(first, second))?;

        let zooming = Clip::from_source(
            ZoomSource {
                clip: first.clone(),
                duration,
            },
            first.duration(),
        );
        Clip::concatenate(vec![zooming, second.clone()])
    }
}

struct ZoomSource {
    clip: Clip,
    duration: f64,
}

impl ZoomSource {
    fn scale_at(&self, t: f64) -> f64 {
        1.0 + ZOOM_RATE * t.max(0.0) / self.duration
    }
}

impl FrameSource for ZoomSource {
    fn frame_at(&self, t: f64) -> Result<Frame> {
        let frame = self.clip.frame_at(t)?;
        let scale = self.scale_at(t);

        let (width, height) = frame.resolution();
        let scaled_w = ((width as f64 * scale).round() as u32).max(width);
        let scaled_h = ((height as f64 * scale).round() as u32).max(height);
        if (scaled_w, scaled_h) == (width, height) {
            return Ok(frame);
        }

        let scaled = imageops::resize(frame.as_image(), scaled_w, scaled_h, FilterType::Triangle);
        let x = (scaled_w - width) / 2;
        let y = (scaled_h - height) / 2;
        Ok(Frame::new(imageops::crop_imm(&scaled, x, y, width, height).to_image()))
    }

    fn resolution(&self) -> (u32, u32) {
        self.clip.resolution()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Left half black, right half white
    fn split_frame() -> Frame {
        let mut frame = Frame::new_black(20, 10);
        for y in 0..10 {
            for x in 10..20 {
                frame.set_pixel(x, y, [255, 255, 255]);
            }
        }
        frame
    }

    /// Horizontal ramp, every column a different shade
    fn gradient_frame() -> Frame {
        let mut frame = Frame::new_black(40, 20);
        for y in 0..20 {
            for x in 0..40 {
                let v = (x * 6) as u8;
                frame.set_pixel(x, y, [v, v, v]);
            }
        }
        frame
    }

    #[test]
    fn test_zoom_keeps_resolution_and_duration() {
        let first = Clip::still(split_frame(), 2.0);
        let second = Clip::still(Frame::new_black(20, 10), 2.0);
        let clip = ZoomIn::new().apply(&first, &second, 1.0).unwrap();

        assert_eq!(clip.duration(), 4.0);
        for t in [0.0, 0.5, 1.0, 1.9, 2.5] {
            assert_eq!(clip.frame_at(t).unwrap().resolution(), (20, 10));
        }
    }

    #[test]
    fn test_zoom_starts_unscaled_and_crops_later() {
        let first = Clip::still(split_frame(), 2.0);
        let second = Clip::still(Frame::new_black(20, 10), 2.0);
        let clip = ZoomIn::new().apply(&first, &second, 1.0).unwrap();

        assert_eq!(clip.frame_at(0.0).unwrap(), split_frame());

        // At 1.5x the outermost columns are cropped away; edges stay pure
        let zoomed = clip.frame_at(1.0).unwrap();
        assert_eq!(zoomed.get_pixel(0, 5), [0, 0, 0]);
        assert_eq!(zoomed.get_pixel(19, 5), [255, 255, 255]);
        assert_ne!(zoomed, split_frame());
    }

    #[test]
    fn test_zoom_keeps_growing_past_transition_duration() {
        let source = ZoomSource {
            clip: Clip::still(gradient_frame(), 2.0),
            duration: 1.0,
        };
        assert_eq!(source.scale_at(0.0), 1.0);
        assert_eq!(source.scale_at(1.0), 1.5);
        assert_eq!(source.scale_at(2.0), 2.0);

        let first = Clip::still(gradient_frame(), 2.0);
        let second = Clip::still(Frame::new_black(40, 20), 2.0);
        let clip = ZoomIn::new().apply(&first, &second, 1.0).unwrap();

        let at_duration = clip.frame_at(1.0).unwrap();
        let later = clip.frame_at(1.9).unwrap();
        assert_ne!(at_duration, later);
        // Deeper zoom shows a narrower band of shades
        assert!(later.get_pixel(0, 10)[0] > at_duration.get_pixel(0, 10)[0]);
    }
}
