use image::imageops;

use crate::{
    error::Result,
    transitions::traits::{validate_pair, Transition},
    video::{Clip, Frame, FrameSource},
};

/// The first clip rises from below the frame over a black background,
/// reaching its resting place after the transition duration and carrying on
/// upwards until the hard cut to the second clip
pub struct SlideUp;

impl SlideUp {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SlideUp {
    fn default() -> Self {
        Self::new()
    }
}

impl Transition for SlideUp {
    fn name(&self) -> &str {
        "slide"
    }

    fn description(&self) -> &str {
        "Slide the image up from the bottom edge before cutting to the next one"
    }

    fn apply(&self, first: &Clip, second: &Clip, duration: f64) -> Result<Clip> {
        validate_pair(first, second, duration, self.max_duration(first, second))?;

        let sliding = Clip::from_source(
            SlideSource {
                clip: first.clone(),
                duration,
            },
            first.duration(),
        );
        Clip::concatenate(vec![sliding, second.clone()])
    }
}

struct SlideSource {
    clip: Clip,
    duration: f64,
}

impl SlideSource {
    /// Vertical offset of the image top: `h * (1 - t / d)`, not clamped
    fn offset_at(&self, t: f64, height: u32) -> i64 {
        (height as f64 * (1.0 - t / self.duration)).round() as i64
    }
}

impl FrameSource for SlideSource {
    fn frame_at(&self, t: f64) -> Result<Frame> {
        let frame = self.clip.frame_at(t)?;
        let (width, height) = frame.resolution();
        let offset = self.offset_at(t, height);
        if offset == 0 {
            return Ok(frame);
        }

        let mut canvas = Frame::new_black(width, height);
        imageops::overlay(canvas.as_image_mut(), frame.as_image(), 0, offset);
        Ok(canvas)
    }

    fn resolution(&self) -> (u32, u32) {
        self.clip.resolution()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(color: [u8; 3], duration: f64) -> Clip {
        Clip::still(Frame::new_filled(4, 10, color), duration)
    }

    #[test]
    fn test_slide_positions() {
        let clip = SlideUp::new()
            .apply(&solid([255, 0, 0], 2.0), &solid([0, 0, 255], 2.0), 1.0)
            .unwrap();
        assert_eq!(clip.duration(), 4.0);

        // Start: fully below the frame
        let start = clip.frame_at(0.0).unwrap();
        assert_eq!(start.get_pixel(0, 0), [0, 0, 0]);
        assert_eq!(start.get_pixel(0, 9), [0, 0, 0]);

        // Halfway: bottom half covered
        let half = clip.frame_at(0.5).unwrap();
        assert_eq!(half.get_pixel(0, 4), [0, 0, 0]);
        assert_eq!(half.get_pixel(0, 5), [255, 0, 0]);

        // In place at the transition duration
        let settled = clip.frame_at(1.0).unwrap();
        assert_eq!(settled.get_pixel(0, 0), [255, 0, 0]);
        assert_eq!(settled.get_pixel(0, 9), [255, 0, 0]);

        // Keeps moving: top half gone
        let leaving = clip.frame_at(1.5).unwrap();
        assert_eq!(leaving.get_pixel(0, 4), [255, 0, 0]);
        assert_eq!(leaving.get_pixel(0, 5), [0, 0, 0]);

        assert_eq!(clip.frame_at(3.0).unwrap().get_pixel(0, 0), [0, 0, 255]);
    }

    #[test]
    fn test_slide_is_vertical_only() {
        let clip = SlideUp::new()
            .apply(&solid([255, 0, 0], 2.0), &solid([0, 0, 255], 2.0), 1.0)
            .unwrap();

        let half = clip.frame_at(0.5).unwrap();
        for x in 0..4 {
            assert_eq!(half.get_pixel(x, 7), [255, 0, 0]);
        }
    }

    #[test]
    fn test_slide_rejects_duration_longer_than_clip() {
        let result = SlideUp::new().apply(&solid([0, 0, 0], 1.0), &solid([0, 0, 0], 1.0), 2.0);
        assert!(result.is_err());
    }
}
