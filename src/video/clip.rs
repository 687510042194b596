use std::fmt;
use std::sync::Arc;

use crate::error::{CompositionError, Result, VideoError};
use crate::video::types::Frame;

/// Anything that can produce a frame for a point in time
///
/// Still images, transitions and concatenated sequences all implement this;
/// a [`Clip`] pairs a source with its duration.
pub trait FrameSource: Send + Sync {
    /// Frame shown `t` seconds into the clip. `t` is already clamped to
    /// `[0, duration]` by [`Clip::frame_at`].
    fn frame_at(&self, t: f64) -> Result<Frame>;

    /// (width, height) of every frame this source produces
    fn resolution(&self) -> (u32, u32);
}

/// A timed, shareable segment of the slideshow
///
/// Cloning a clip is cheap: the frame data sits behind an `Arc`, so a clip
/// can be used in two transition pairs without re-decoding the image.
#[derive(Clone)]
pub struct Clip {
    source: Arc<dyn FrameSource>,
    duration: f64,
}

impl fmt::Debug for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clip")
            .field("duration", &self.duration)
            .field("resolution", &self.resolution())
            .finish()
    }
}

impl Clip {
    /// Wrap an arbitrary frame source
    pub fn from_source<S: FrameSource + 'static>(source: S, duration: f64) -> Self {
        Self {
            source: Arc::new(source),
            duration: duration.max(0.0),
        }
    }

    /// A single frame held for `duration` seconds
    pub fn still(frame: Frame, duration: f64) -> Self {
        Self::from_source(StillSource { frame }, duration)
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn resolution(&self) -> (u32, u32) {
        self.source.resolution()
    }

    /// Same content with a different duration
    pub fn with_duration(&self, duration: f64) -> Self {
        Self {
            source: Arc::clone(&self.source),
            duration: duration.max(0.0),
        }
    }

    /// Frame shown at `t` seconds, clamped into the clip's time range
    pub fn frame_at(&self, t: f64) -> Result<Frame> {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, self.duration) };
        self.source.frame_at(t)
    }

    /// Play `clips` back to back
    ///
    /// All clips must share one resolution.
    pub fn concatenate(clips: Vec<Clip>) -> Result<Clip> {
        let sequence = Sequence::new(clips)?;
        let duration = sequence.duration();
        Ok(Self::from_source(sequence, duration))
    }
}

struct StillSource {
    frame: Frame,
}

impl FrameSource for StillSource {
    fn frame_at(&self, _t: f64) -> Result<Frame> {
        Ok(self.frame.clone())
    }

    fn resolution(&self) -> (u32, u32) {
        self.frame.resolution()
    }
}

/// Ordered clips played back to back
pub struct Sequence {
    clips: Vec<Clip>,
    /// Start time of each clip; same length as `clips`
    starts: Vec<f64>,
    duration: f64,
    resolution: (u32, u32),
}

impl Sequence {
    pub fn new(clips: Vec<Clip>) -> Result<Self> {
        let resolution = clips
            .first()
            .map(Clip::resolution)
            .ok_or(CompositionError::EmptySequence)?;

        let mut starts = Vec::with_capacity(clips.len());
        let mut elapsed = 0.0;
        for clip in &clips {
            if clip.resolution() != resolution {
                return Err(VideoError::ResolutionMismatch {
                    expected: resolution,
                    found: clip.resolution(),
                }
                .into());
            }
            starts.push(elapsed);
            elapsed += clip.duration();
        }

        Ok(Self {
            clips,
            starts,
            duration: elapsed,
            resolution,
        })
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Index of the clip playing at `t`
    fn index_at(&self, t: f64) -> usize {
        // Last clip whose start is <= t; a clip owns its end instant only if
        // it is the final one.
        let idx = self.starts.partition_point(|&start| start <= t);
        idx.saturating_sub(1).min(self.clips.len() - 1)
    }
}

impl FrameSource for Sequence {
    fn frame_at(&self, t: f64) -> Result<Frame> {
        let idx = self.index_at(t);
        self.clips[idx].frame_at(t - self.starts[idx])
    }

    fn resolution(&self) -> (u32, u32) {
        self.resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(color: [u8; 3], duration: f64) -> Clip {
        Clip::still(Frame::new_filled(8, 4, color), duration)
    }

    #[test]
    fn test_still_clip() {
        let clip = solid([1, 2, 3], 2.0);
        assert_eq!(clip.duration(), 2.0);
        assert_eq!(clip.resolution(), (8, 4));
        assert_eq!(clip.frame_at(1.3).unwrap().get_pixel(0, 0), [1, 2, 3]);
        // Out-of-range times clamp instead of failing
        assert!(clip.frame_at(-1.0).is_ok());
        assert!(clip.frame_at(99.0).is_ok());
    }

    #[test]
    fn test_concatenate_picks_clip_by_time() {
        let seq = Clip::concatenate(vec![
            solid([255, 0, 0], 1.0),
            solid([0, 255, 0], 2.0),
            solid([0, 0, 255], 1.0),
        ])
        .unwrap();

        assert_eq!(seq.duration(), 4.0);
        assert_eq!(seq.frame_at(0.5).unwrap().get_pixel(0, 0), [255, 0, 0]);
        assert_eq!(seq.frame_at(1.0).unwrap().get_pixel(0, 0), [0, 255, 0]);
        assert_eq!(seq.frame_at(2.99).unwrap().get_pixel(0, 0), [0, 255, 0]);
        assert_eq!(seq.frame_at(3.5).unwrap().get_pixel(0, 0), [0, 0, 255]);
        assert_eq!(seq.frame_at(4.0).unwrap().get_pixel(0, 0), [0, 0, 255]);
    }

    #[test]
    fn test_concatenate_rejects_mixed_resolutions() {
        let result = Clip::concatenate(vec![
            solid([0, 0, 0], 1.0),
            Clip::still(Frame::new_black(16, 9), 1.0),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_concatenate_empty_is_error() {
        assert!(Clip::concatenate(Vec::new()).is_err());
    }

    #[test]
    fn test_nested_sequences() {
        let inner = Clip::concatenate(vec![solid([1, 1, 1], 1.0), solid([2, 2, 2], 1.0)]).unwrap();
        let outer = Clip::concatenate(vec![solid([9, 9, 9], 3.0), inner]).unwrap();
        assert_eq!(outer.duration(), 5.0);
        assert_eq!(outer.frame_at(4.5).unwrap().get_pixel(0, 0), [2, 2, 2]);
    }
}
