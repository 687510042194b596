use std::f32::consts::TAU;

use image::Rgb;
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};

use crate::{
    error::Result,
    transitions::traits::{validate_pair, Transition},
    video::{Clip, Frame, FrameSource},
};

/// Rotate the first clip one full turn per `duration` seconds, then cut
pub struct Spin;

impl Spin {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Spin {
    fn default() -> Self {
        Self::new()
    }
}

impl Transition for Spin {
    fn name(&self) -> &str {
        "spin"
    }

    fn description(&self) -> &str {
        "Spin the image about its center before cutting to the next one"
    }

    fn apply(&self, first: &Clip, second: &Clip, duration: f64) -> Result<Clip> {
        validate_pair(first, second, duration, self.max_duration(first, second))?;

        let spinning = Clip::from_source(
            SpinSource {
                clip: first.clone(),
                period: duration,
            },
            first.duration(),
        );
        Clip::concatenate(vec![spinning, second.clone()])
    }
}

struct SpinSource {
    clip: Clip,
    /// Seconds per full turn
    period: f64,
}

impl SpinSource {
    fn angle_at(&self, t: f64) -> f32 {
        ((t / self.period) as f32 * TAU) % TAU
    }
}

impl FrameSource for SpinSource {
    fn frame_at(&self, t: f64) -> Result<Frame> {
        let frame = self.clip.frame_at(t)?;
        let theta = self.angle_at(t);
        if theta == 0.0 {
            return Ok(frame);
        }

        Ok(Frame::new(rotate_about_center(
            frame.as_image(),
            theta,
            Interpolation::Bilinear,
            Rgb([0, 0, 0]),
        )))
    }

    fn resolution(&self) -> (u32, u32) {
        self.clip.resolution()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spin_angles() {
        let source = SpinSource {
            clip: Clip::still(Frame::new_black(4, 4), 2.0),
            period: 1.0,
        };
        assert_eq!(source.angle_at(0.0), 0.0);
        assert!((source.angle_at(0.25) - TAU / 4.0).abs() < 1e-5);
        assert!(source.angle_at(1.0).abs() < 1e-4 || (source.angle_at(1.0) - TAU).abs() < 1e-4);
    }

    #[test]
    fn test_spin_rotates_corners_out() {
        let first = Clip::still(Frame::new_filled(40, 20, [255, 255, 255]), 2.0);
        let second = Clip::still(Frame::new_filled(40, 20, [9, 9, 9]), 1.0);
        let clip = Spin::new().apply(&first, &second, 1.0).unwrap();
        assert_eq!(clip.duration(), 3.0);

        assert_eq!(clip.frame_at(0.0).unwrap().get_pixel(0, 0), [255, 255, 255]);

        // A quarter turn of a wide image leaves the corners uncovered
        let quarter = clip.frame_at(0.25).unwrap();
        assert_eq!(quarter.resolution(), (40, 20));
        assert_eq!(quarter.get_pixel(0, 0), [0, 0, 0]);
        assert_eq!(quarter.get_pixel(20, 10), [255, 255, 255]);

        assert_eq!(clip.frame_at(2.5).unwrap().get_pixel(0, 0), [9, 9, 9]);
    }
}
