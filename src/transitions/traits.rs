use crate::{
    error::{Result, TransitionError},
    video::Clip,
};

/// Core trait that all transitions must implement
pub trait Transition: Send + Sync {
    /// Returns the unique name of this transition
    fn name(&self) -> &str;

    /// Returns a human-readable description of this transition
    fn description(&self) -> &str;

    /// Join `first` and `second` into a single clip
    ///
    /// `duration` is the length of the effect in seconds. Implementations
    /// should call [`validate_pair`] before building anything.
    fn apply(&self, first: &Clip, second: &Clip, duration: f64) -> Result<Clip>;

    /// Longest effect this transition accepts for the given pair
    fn max_duration(&self, first: &Clip, _second: &Clip) -> f64 {
        first.duration()
    }
}

/// Shared checks: matching resolutions and `0 < duration <= limit`
pub fn validate_pair(first: &Clip, second: &Clip, duration: f64, limit: f64) -> Result<()> {
    if first.resolution() != second.resolution() {
        return Err(TransitionError::ResolutionMismatch {
            first: first.resolution(),
            second: second.resolution(),
        }
        .into());
    }

    if !duration.is_finite() || duration <= 0.0 || duration > limit {
        return Err(TransitionError::InvalidDuration { duration, limit }.into());
    }

    Ok(())
}

/// Fraction of a `duration`-long effect completed at time `t`, in `[0, 1]`
pub fn progress(t: f64, duration: f64) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (t / duration).clamp(0.0, 1.0) as f32
}
