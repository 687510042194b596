use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{CompositionError, Result, VideoError};
use crate::video::clip::Clip;
use crate::video::types::Frame;

/// Turns image files into normalized still clips
///
/// Every clip produced by the loader is RGB8 at the target resolution, so
/// the clips can be concatenated without further checks.
pub struct ImageLoader {
    extensions: Vec<String>,
    resolution: (u32, u32),
}

impl ImageLoader {
    pub fn new(extensions: Vec<String>, resolution: (u32, u32)) -> Self {
        Self {
            extensions,
            resolution,
        }
    }

    /// Whether the file name ends in one of the accepted extensions
    ///
    /// Matching is exact (`photo.JPG` is not a `jpg`).
    pub fn is_supported(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|ext| name.ends_with(&format!(".{}", ext.trim_start_matches('.'))))
    }

    /// List accepted image files in `dir`, sorted by file name
    pub fn list_images<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(CompositionError::DirectoryNotFound {
                path: dir.display().to_string(),
            }
            .into());
        }

        let mut images = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && self.is_supported(&path) {
                images.push(path);
            }
        }
        images.sort();

        info!("Found {} image files in {:?}", images.len(), dir);
        Ok(images)
    }

    /// Decode `path`, convert to RGB, force-resize and hold for `duration`
    pub fn load_clip<P: AsRef<Path>>(&self, path: P, duration: f64) -> Result<Clip> {
        let frame = self.load_frame(path)?;
        Ok(Clip::still(frame, duration))
    }

    /// Decode a single image into a frame at the target resolution
    pub fn load_frame<P: AsRef<Path>>(&self, path: P) -> Result<Frame> {
        let path = path.as_ref();
        debug!("Loading image: {:?}", path);

        let image = image::open(path).map_err(|e| VideoError::LoadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let rgb_image = match image {
            image::DynamicImage::ImageRgb8(img) => img,
            other => other.to_rgb8(),
        };

        let (width, height) = self.resolution;
        Ok(Frame::new(rgb_image).resized(width, height))
    }

    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::tempdir;

    fn loader() -> ImageLoader {
        ImageLoader::new(vec!["png".to_string(), "jpg".to_string()], (64, 36))
    }

    #[test]
    fn test_extension_filter() {
        let loader = loader();
        assert!(loader.is_supported(Path::new("a/01.png")));
        assert!(loader.is_supported(Path::new("holiday.jpg")));
        assert!(!loader.is_supported(Path::new("holiday.jpeg")));
        assert!(!loader.is_supported(Path::new("holiday.JPG")));
        assert!(!loader.is_supported(Path::new("notes.txt")));
        assert!(!loader.is_supported(Path::new("png")));
    }

    #[test]
    fn test_list_images_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        for name in ["b.png", "a.jpg", "c.txt", "d.gif"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.png")).unwrap();

        let images = loader().list_images(dir.path()).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().unwrap();
        let result = loader().list_images(dir.path().join("nope"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_clip_normalizes_size_and_mode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rgba.png");
        RgbaImage::from_pixel(10, 10, Rgba([200, 100, 50, 255]))
            .save(&path)
            .unwrap();

        let clip = loader().load_clip(&path, 2.0).unwrap();
        assert_eq!(clip.resolution(), (64, 36));
        assert_eq!(clip.duration(), 2.0);
    }

    #[test]
    fn test_load_jpeg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        RgbImage::from_pixel(20, 20, Rgb([0, 0, 255])).save(&path).unwrap();

        let frame = loader().load_frame(&path).unwrap();
        assert_eq!(frame.resolution(), (64, 36));
    }

    #[test]
    fn test_corrupt_file_is_load_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = loader().load_clip(&path, 2.0).unwrap_err();
        assert!(err.is_recoverable());
    }
}
