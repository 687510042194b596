use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    video::VideoParams,
};

/// Main configuration for the Slideshow-Compositor
///
/// Every field has a default, so an empty TOML file (or none at all) yields
/// the stock slideshow: 2s per image, 1s crossfades, a 3s title card,
/// 1280x720 H.264 at 24 fps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where images come from
    pub input: InputConfig,

    /// Video processing settings
    pub video: VideoConfig,

    /// Transition between consecutive images
    pub transition: TransitionConfig,

    /// Title card settings
    pub title: TitleConfig,

    /// Output file and debug artifacts
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.input.validate()?;
        self.video.validate()?;
        self.transition.validate(self.video.image_duration)?;
        self.title.validate()?;
        Ok(())
    }
}

fn invalid(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Image discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory scanned for images
    pub image_dir: PathBuf,

    /// Accepted file extensions, matched exactly against the file name suffix
    pub extensions: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("images"),
            extensions: vec!["png".to_string(), "jpg".to_string()],
        }
    }
}

impl InputConfig {
    fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() || self.extensions.iter().any(|e| e.is_empty()) {
            return Err(invalid("input.extensions", format!("{:?}", self.extensions)).into());
        }
        Ok(())
    }
}

/// Video processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Output encoding parameters
    pub params: VideoParams,

    /// How long each image stays on screen (seconds)
    pub image_duration: f64,

    /// Encoder executable
    pub ffmpeg_program: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            params: VideoParams::default(),
            image_duration: 2.0,
            ffmpeg_program: "ffmpeg".to_string(),
        }
    }
}

impl VideoConfig {
    fn validate(&self) -> Result<()> {
        let (width, height) = self.params.resolution;
        if width == 0 || height == 0 || width % 2 != 0 || height % 2 != 0 {
            // yuv420p needs even dimensions
            return Err(invalid("video.params.resolution", format!("{}x{}", width, height)).into());
        }

        if !positive(self.params.fps) {
            return Err(invalid("video.params.fps", self.params.fps).into());
        }

        if self.params.quality > 100 {
            return Err(invalid("video.params.quality", self.params.quality).into());
        }

        if self.params.codec.is_empty() {
            return Err(invalid("video.params.codec", "\"\"").into());
        }

        if !positive(self.image_duration) {
            return Err(invalid("video.image_duration", self.image_duration).into());
        }

        Ok(())
    }
}

/// Transition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Registered transition name (crossfade, slide, zoom, spin)
    pub name: String,

    /// Transition length in seconds
    pub duration: f64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            name: "crossfade".to_string(),
            duration: 1.0,
        }
    }
}

impl TransitionConfig {
    fn validate(&self, image_duration: f64) -> Result<()> {
        if !positive(self.duration) || self.duration > image_duration {
            return Err(invalid("transition.duration", self.duration).into());
        }
        Ok(())
    }
}

/// Title card configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    /// Render and prepend the title card
    pub enabled: bool,

    pub text: String,

    /// TrueType/OpenType font file
    pub font_path: PathBuf,

    /// Font size in pixels
    pub font_size: f32,

    pub text_color: [u8; 3],

    pub background_color: [u8; 3],

    /// Title card duration in seconds
    pub duration: f64,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            text: "Dear Client, welcome to Your Video!".to_string(),
            font_path: PathBuf::from("Fonts/four.ttf"),
            font_size: 70.0,
            text_color: [255, 255, 255],
            background_color: [0, 0, 0],
            duration: 3.0,
        }
    }
}

impl TitleConfig {
    fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(invalid("title.font_size", self.font_size).into());
        }

        if !positive(self.duration) {
            return Err(invalid("title.duration", self.duration).into());
        }

        Ok(())
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Encoded video path
    pub path: PathBuf,

    /// Write the first frame of every image clip as a JPEG for inspection
    pub debug_frames: bool,

    /// Directory receiving `image_frame_{i}.jpg`
    pub debug_frame_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("output_video.mp4"),
            debug_frames: true,
            debug_frame_dir: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_match_stock_slideshow() {
        let config = Config::default();
        assert_eq!(config.video.params.resolution, (1280, 720));
        assert_eq!(config.video.params.fps, 24.0);
        assert_eq!(config.video.params.codec, "libx264");
        assert_eq!(config.video.image_duration, 2.0);
        assert_eq!(config.transition.name, "crossfade");
        assert_eq!(config.transition.duration, 1.0);
        assert_eq!(config.title.duration, 3.0);
        assert_eq!(config.title.font_size, 70.0);
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let mut original_config = Config::default();
        original_config.transition.name = "spin".to_string();

        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(loaded_config.transition.name, "spin");
        assert_eq!(original_config.video.params.fps, loaded_config.video.params.fps);
        assert_eq!(original_config.title.text, loaded_config.title.text);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("partial.toml");
        std::fs::write(&file_path, "[video]\nimage_duration = 4.0\n").unwrap();

        let config = Config::from_file(&file_path).unwrap();
        assert_eq!(config.video.image_duration, 4.0);
        assert_eq!(config.video.params.resolution, (1280, 720));
        assert_eq!(config.input.extensions, vec!["png", "jpg"]);
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file("/definitely/not/here.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_odd_resolution_rejected() {
        let mut config = Config::default();
        config.video.params.resolution = (1281, 720);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_transition_longer_than_image_rejected() {
        let mut config = Config::default();
        config.transition.duration = 2.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_disabled_title_skips_validation() {
        let mut config = Config::default();
        config.title.enabled = false;
        config.title.font_size = 0.0;
        assert!(config.validate().is_ok());
    }
}
