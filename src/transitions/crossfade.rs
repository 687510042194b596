use crate::{
    error::Result,
    transitions::traits::{progress, validate_pair, Transition},
    video::{Clip, Frame, FrameSource},
};

/// Overlapping dissolve: the tail of the first clip fades out while the head
/// of the second fades in
///
/// The result is `first + second - duration` seconds long.
pub struct Crossfade;

impl Crossfade {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Crossfade {
    fn default() -> Self {
        Self::new()
    }
}

impl Transition for Crossfade {
    fn name(&self) -> &str {
        "crossfade"
    }

    fn description(&self) -> &str {
        "Fade the outgoing image into the incoming one over an overlapping interval"
    }

    fn max_duration(&self, first: &Clip, second: &Clip) -> f64 {
        first.duration().min(second.duration())
    }

    fn apply(&self, first: &Clip, second: &Clip, duration: f64) -> Result<Clip> {
        validate_pair(first, second, duration, self.max_duration(first, second))?;

        let total = first.duration() + second.duration() - duration;
        Ok(Clip::from_source(
            CrossfadeSource {
                first: first.clone(),
                second: second.clone(),
                overlap: duration,
            },
            total,
        ))
    }
}

struct CrossfadeSource {
    first: Clip,
    second: Clip,
    overlap: f64,
}

impl CrossfadeSource {
    /// Time at which the second clip starts
    fn second_start(&self) -> f64 {
        self.first.duration() - self.overlap
    }
}

impl FrameSource for CrossfadeSource {
    fn frame_at(&self, t: f64) -> Result<Frame> {
        let start = self.second_start();
        if t < start {
            return self.first.frame_at(t);
        }
        if t >= self.first.duration() {
            return self.second.frame_at(t - start);
        }

        let outgoing = self.first.frame_at(t)?;
        let incoming = self.second.frame_at(t - start)?;
        outgoing.blend(&incoming, progress(t - start, self.overlap))
    }

    fn resolution(&self) -> (u32, u32) {
        self.first.resolution()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(color: [u8; 3], duration: f64) -> Clip {
        Clip::still(Frame::new_filled(8, 4, color), duration)
    }

    #[test]
    fn test_duration_overlaps() {
        let clip = Crossfade::new()
            .apply(&solid([0, 0, 0], 2.0), &solid([255, 255, 255], 2.0), 1.0)
            .unwrap();
        assert_eq!(clip.duration(), 3.0);
        assert_eq!(clip.resolution(), (8, 4));
    }

    #[test]
    fn test_frames_across_the_fade() {
        let clip = Crossfade::new()
            .apply(&solid([0, 0, 0], 2.0), &solid([200, 100, 0], 2.0), 1.0)
            .unwrap();

        assert_eq!(clip.frame_at(0.5).unwrap().get_pixel(0, 0), [0, 0, 0]);
        assert_eq!(clip.frame_at(1.0).unwrap().get_pixel(0, 0), [0, 0, 0]);
        assert_eq!(clip.frame_at(1.5).unwrap().get_pixel(0, 0), [100, 50, 0]);
        assert_eq!(clip.frame_at(2.0).unwrap().get_pixel(0, 0), [200, 100, 0]);
        assert_eq!(clip.frame_at(3.0).unwrap().get_pixel(0, 0), [200, 100, 0]);
    }

    #[test]
    fn test_full_overlap() {
        let clip = Crossfade::new()
            .apply(&solid([0, 0, 0], 1.0), &solid([100, 100, 100], 1.0), 1.0)
            .unwrap();
        assert_eq!(clip.duration(), 1.0);
        assert_eq!(clip.frame_at(0.5).unwrap().get_pixel(0, 0), [50, 50, 50]);
    }

    #[test]
    fn test_rejects_overlong_duration() {
        let result = Crossfade::new().apply(&solid([0, 0, 0], 2.0), &solid([0, 0, 0], 0.5), 1.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        let a = solid([0, 0, 0], 2.0);
        let b = solid([0, 0, 0], 2.0);
        assert!(Crossfade::new().apply(&a, &b, 0.0).is_err());
        assert!(Crossfade::new().apply(&a, &b, -1.0).is_err());
        assert!(Crossfade::new().apply(&a, &b, f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_resolution_mismatch() {
        let a = solid([0, 0, 0], 2.0);
        let b = Clip::still(Frame::new_black(4, 4), 2.0);
        assert!(Crossfade::new().apply(&a, &b, 1.0).is_err());
    }
}
