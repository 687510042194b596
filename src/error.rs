use thiserror::Error;

/// Main error type for the Slideshow-Compositor library
#[derive(Error, Debug)]
pub enum SlideshowError {
    #[error("Video processing error: {0}")]
    Video(#[from] VideoError),

    #[error("Text rendering error: {0}")]
    Text(#[from] TextError),

    #[error("Transition error: {0}")]
    Transition(#[from] TransitionError),

    #[error("Composition error: {0}")]
    Composition(#[from] CompositionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Image decoding, clip and encoding errors
#[derive(Error, Debug)]
pub enum VideoError {
    #[error("Failed to load image file: {path} ({reason})")]
    LoadFailed { path: String, reason: String },

    #[error("Video encoding failed: {reason}")]
    EncodingFailed { reason: String },

    #[error("Encoder not available: {program}")]
    EncoderUnavailable { program: String },

    #[error("Resolution mismatch: expected {expected:?}, found {found:?}")]
    ResolutionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("Frame write failed: {reason}")]
    FrameWriteFailed { reason: String },

    #[error("Invalid video parameters: {details}")]
    InvalidParameters { details: String },
}

/// Text rendering errors
#[derive(Error, Debug)]
pub enum TextError {
    #[error("Font file not found: {path}")]
    FontNotFound { path: String },

    #[error("Invalid font data: {path}")]
    InvalidFont { path: String },

    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },
}

/// Transition errors
#[derive(Error, Debug)]
pub enum TransitionError {
    #[error("Transition not found: {name}")]
    NotFound { name: String },

    #[error("Invalid transition duration {duration}s (allowed: 0 < d <= {limit}s)")]
    InvalidDuration { duration: f64, limit: f64 },

    #[error("Clip resolutions differ: {first:?} vs {second:?}")]
    ResolutionMismatch {
        first: (u32, u32),
        second: (u32, u32),
    },
}

/// Pipeline errors
#[derive(Error, Debug)]
pub enum CompositionError {
    #[error("Image directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("No images found in directory: {path}")]
    NoImagesFound { path: String },

    #[error("No images could be loaded from directory: {path}")]
    NoClipsLoaded { path: String },

    #[error("Cannot build a video from an empty clip sequence")]
    EmptySequence,
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using SlideshowError
pub type Result<T> = std::result::Result<T, SlideshowError>;

impl SlideshowError {
    /// Whether the pipeline may skip the failing item and carry on
    ///
    /// A single bad image or a single failed transition does not stop the
    /// slideshow; everything else does.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Video(VideoError::LoadFailed { .. }) | Self::Transition(_)
        )
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Composition(CompositionError::NoImagesFound { path }) => {
                format!("No images found in the directory '{}'!", path)
            }
            Self::Composition(CompositionError::NoClipsLoaded { path }) => {
                format!("No images were loaded. Please check the image directory path '{}'.", path)
            }
            Self::Text(TextError::FontNotFound { path }) => {
                format!("Font file '{}' not found. Pass --font with a TrueType/OpenType file.", path)
            }
            Self::Video(VideoError::EncoderUnavailable { program }) => {
                format!("'{}' was not found. Please install FFmpeg and make sure it is on PATH.", program)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        let load: SlideshowError = VideoError::LoadFailed {
            path: "a.png".to_string(),
            reason: "truncated".to_string(),
        }
        .into();
        assert!(load.is_recoverable());

        let transition: SlideshowError = TransitionError::InvalidDuration {
            duration: 5.0,
            limit: 2.0,
        }
        .into();
        assert!(transition.is_recoverable());

        let encode: SlideshowError = VideoError::EncodingFailed {
            reason: "boom".to_string(),
        }
        .into();
        assert!(!encode.is_recoverable());
    }

    #[test]
    fn test_user_message_mentions_path() {
        let err: SlideshowError = CompositionError::NoImagesFound {
            path: "/tmp/nowhere".to_string(),
        }
        .into();
        assert!(err.user_message().contains("/tmp/nowhere"));
    }
}
