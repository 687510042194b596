use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};

use slideshow_compositor::{
    composition::SlideshowEngine,
    config::Config,
    transitions::TransitionRegistry,
};

#[derive(Parser)]
#[command(
    name = "slideshow-compositor",
    version,
    about = "Turn a directory of images into a slideshow video",
    long_about = "Slideshow-Compositor loads every PNG/JPEG in a directory, joins consecutive images with a transition, puts a title card in front and encodes the result with FFmpeg."
)]
struct Cli {
    /// Directory containing the images
    #[arg(short, long)]
    images: Option<PathBuf>,

    /// Font file used for the title card
    #[arg(short, long)]
    font: Option<PathBuf>,

    /// Output video file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Transition between images (crossfade, slide, zoom, spin)
    #[arg(short, long)]
    transition: Option<String>,

    /// Title card text
    #[arg(long)]
    title: Option<String>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not write image_frame_N.jpg inspection files
    #[arg(long)]
    no_debug_frames: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Command line flags win over the configuration file
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(images) = &self.images {
            config.input.image_dir = images.clone();
        }
        if let Some(font) = &self.font {
            config.title.font_path = font.clone();
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(transition) = &self.transition {
            config.transition.name = transition.clone();
        }
        if let Some(title) = &self.title {
            config.title.text = title.clone();
        }
        if self.no_debug_frames {
            config.output.debug_frames = false;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting Slideshow-Compositor v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    cli.apply_overrides(&mut config);
    config.validate()?;

    let registry = TransitionRegistry::new();
    let transition = registry.require(&config.transition.name)?;
    info!("Using {} transition", transition.name());

    let engine = SlideshowEngine::new(config, transition);
    match engine.run() {
        Ok(encoded) => {
            info!("Slideshow complete! Output saved to: {:?}", encoded.path);
            Ok(())
        }
        Err(e) => {
            error!("{}", e.user_message());
            Err(e.into())
        }
    }
}
