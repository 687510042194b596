use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::{CompositionError, Result},
    text::{TextRenderer, TextStyle},
    transitions::Transition,
    video::{Clip, EncodedVideo, ImageLoader, VideoEncoder},
};

/// Main engine that turns an image directory into a slideshow video
///
/// The engine follows a fixed pipeline:
/// 1. Discovery - List image files in the input directory
/// 2. Loading - Decode, normalize and time each image
/// 3. Transitions - Join adjacent images with the configured transition
/// 4. Inspection - Optionally dump the first frame of each image clip
/// 5. Title - Render the title card and put it in front
/// 6. Output - Encode the whole sequence
pub struct SlideshowEngine {
    config: Config,
    transition: Box<dyn Transition>,
}

impl SlideshowEngine {
    /// Create a new engine with the given configuration and transition
    pub fn new(config: Config, transition: Box<dyn Transition>) -> Self {
        Self { config, transition }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the whole pipeline and write the output video
    ///
    /// Missing/empty input, a missing font and encoder failures abort the
    /// run. A bad image or a failed transition only degrades the result.
    pub fn run(&self) -> Result<EncodedVideo> {
        info!("🎬 Starting slideshow composition");
        info!("   Images: {:?}", self.config.input.image_dir);
        info!("   Output: {:?}", self.config.output.path);
        info!("   Transition: {} ({:.1}s)", self.transition.name(), self.config.transition.duration);

        // Pipeline Step 1: Discovery
        let image_files = self.list_images()?;

        // Pipeline Step 2: Loading
        let clips = self.load_clips(&image_files)?;

        // Pipeline Step 3: Transitions
        let body = self.build_sequence(&clips)?;

        // Pipeline Step 4: Inspection frames
        if self.config.output.debug_frames {
            self.dump_debug_frames(&clips);
        }

        // Pipeline Step 5: Title card
        let video = if self.config.title.enabled {
            let title = self.render_title()?;
            Self::prepend_title(title, body)?
        } else {
            body
        };

        // Pipeline Step 6: Output
        let encoded = self.encode(&video)?;

        info!("🎉 Slideshow complete! Output saved to: {:?}", encoded.path);
        Ok(encoded)
    }

    // ==========================================
    // PIPELINE STEP 1: DISCOVERY
    // ==========================================

    /// List the image files to use, in file name order
    pub fn list_images(&self) -> Result<Vec<PathBuf>> {
        info!("📂 Step 1: Listing images...");

        let dir = &self.config.input.image_dir;
        let image_files = self.loader().list_images(dir)?;
        debug!("Image files found: {:?}", image_files);

        if image_files.is_empty() {
            warn!("No images found in the directory!");
            return Err(CompositionError::NoImagesFound {
                path: dir.display().to_string(),
            }
            .into());
        }

        Ok(image_files)
    }

    // ==========================================
    // PIPELINE STEP 2: LOADING
    // ==========================================

    /// Decode every file into a still clip, skipping the ones that fail
    pub fn load_clips(&self, image_files: &[PathBuf]) -> Result<Vec<Clip>> {
        info!("🖼️  Step 2: Loading {} images...", image_files.len());

        let loader = self.loader();
        let duration = self.config.video.image_duration;
        let mut clips = Vec::with_capacity(image_files.len());

        for path in image_files {
            match loader.load_clip(path, duration) {
                Ok(clip) => clips.push(clip),
                Err(e) if e.is_recoverable() => warn!("Error loading image {:?}: {}", path, e),
                Err(e) => return Err(e),
            }
        }

        if clips.is_empty() {
            return Err(CompositionError::NoClipsLoaded {
                path: self.config.input.image_dir.display().to_string(),
            }
            .into());
        }

        info!("   ✅ Loaded {} image clips", clips.len());
        Ok(clips)
    }

    // ==========================================
    // PIPELINE STEP 3: TRANSITIONS
    // ==========================================

    /// Segments to play, in order, before concatenation
    ///
    /// With two or more clips every adjacent pair becomes one transition
    /// segment and the last clip is appended on its own. A pair whose
    /// transition fails contributes both clips unchanged.
    pub fn build_segments(&self, clips: &[Clip]) -> Result<Vec<Clip>> {
        if clips.len() < 2 {
            info!("Not enough clips for transitions, using the available images as-is");
            return Ok(clips.to_vec());
        }

        let duration = self.config.transition.duration;
        let mut segments = Vec::with_capacity(clips.len() * 2);

        for (i, pair) in clips.windows(2).enumerate() {
            debug!("Applying {} between clip {} and clip {}", self.transition.name(), i, i + 1);
            match self.transition.apply(&pair[0], &pair[1], duration) {
                Ok(joined) => segments.push(joined),
                Err(e) if e.is_recoverable() => {
                    warn!("Error applying transition at index {}: {}", i, e);
                    segments.push(pair[0].clone());
                    segments.push(pair[1].clone());
                }
                Err(e) => return Err(e),
            }
        }

        if let Some(last) = clips.last() {
            segments.push(last.clone());
        }

        Ok(segments)
    }

    /// Join the loaded clips into one sequence
    pub fn build_sequence(&self, clips: &[Clip]) -> Result<Clip> {
        info!("🔀 Step 3: Building sequence with {} transitions...", self.transition.name());

        let segments = self.build_segments(clips)?;
        let sequence = Clip::concatenate(segments)?;

        info!("   ✅ Sequence duration: {:.1}s", sequence.duration());
        Ok(sequence)
    }

    // ==========================================
    // PIPELINE STEP 4: INSPECTION FRAMES
    // ==========================================

    /// Write the first frame of each clip as `image_frame_{i}.jpg`
    ///
    /// Returns how many files were written. Failures are logged only.
    pub fn dump_debug_frames(&self, clips: &[Clip]) -> usize {
        info!("🔍 Step 4: Saving inspection frames...");

        let dir = &self.config.output.debug_frame_dir;
        if let Err(e) = std::fs::create_dir_all(dir) {
            warn!("Cannot create debug frame directory {:?}: {}", dir, e);
            return 0;
        }

        let mut written = 0;
        for (i, clip) in clips.iter().enumerate() {
            let path = dir.join(format!("image_frame_{}.jpg", i));
            let saved = clip
                .frame_at(0.0)
                .map_err(|e| e.to_string())
                .and_then(|frame| frame.save_jpeg(&path).map_err(|e| e.to_string()));

            match saved {
                Ok(()) => {
                    debug!("Saved {:?} for inspection", path);
                    written += 1;
                }
                Err(e) => warn!("Failed to save {:?}: {}", path, e),
            }
        }

        written
    }

    // ==========================================
    // PIPELINE STEP 5: TITLE CARD
    // ==========================================

    /// Render the configured title text into a clip
    pub fn render_title(&self) -> Result<Clip> {
        info!("✏️  Step 5: Rendering title card...");

        let title = &self.config.title;
        let renderer = TextRenderer::from_file(&title.font_path)?;
        let style = TextStyle {
            font_size: title.font_size,
            text_color: title.text_color,
            background_color: title.background_color,
            canvas: self.config.video.params.resolution,
        };

        let frame = renderer.render(&title.text, &style)?;
        Ok(Clip::still(frame, title.duration))
    }

    /// Title first, then the slideshow
    pub fn prepend_title(title: Clip, body: Clip) -> Result<Clip> {
        Clip::concatenate(vec![title, body])
    }

    // ==========================================
    // PIPELINE STEP 6: OUTPUT
    // ==========================================

    /// Encode the final sequence to the configured output path
    pub fn encode(&self, video: &Clip) -> Result<EncodedVideo> {
        info!("🎞️  Step 6: Writing final video...");

        let encoder = VideoEncoder::with_program(
            self.config.video.params.clone(),
            self.config.video.ffmpeg_program.clone(),
        );

        let encoded = encoder
            .encode(video, &self.config.output.path)
            .map_err(|e| {
                warn!("Error during video writing: {}", e);
                e
            })?;

        info!("   ✅ Output generation complete:");
        info!("      File saved: {:?}", encoded.path);
        info!("      Duration: {:.1}s", encoded.duration);
        info!("      Frame count: {}", encoded.frame_count);
        info!("      File size: {:.1} MB", encoded.file_size as f64 / 1024.0 / 1024.0);

        Ok(encoded)
    }

    fn loader(&self) -> ImageLoader {
        ImageLoader::new(
            self.config.input.extensions.clone(),
            self.config.video.params.resolution,
        )
    }
}
