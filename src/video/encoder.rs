use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use tracing::{debug, info, warn};

use crate::error::{Result, SlideshowError, VideoError};
use crate::video::clip::Clip;
use crate::video::types::{Frame, VideoParams};

/// Represents an encoded video output
#[derive(Debug, Clone)]
pub struct EncodedVideo {
    pub path: PathBuf,
    pub duration: f64,
    pub frame_count: usize,
    pub file_size: u64,
}

/// Encodes clips by piping raw RGB frames into an external FFmpeg process
pub struct VideoEncoder {
    params: VideoParams,
    program: String,
}

impl VideoEncoder {
    pub fn new(params: VideoParams) -> Self {
        Self::with_program(params, "ffmpeg")
    }

    /// Use a specific encoder executable instead of `ffmpeg` from PATH
    pub fn with_program<S: Into<String>>(params: VideoParams, program: S) -> Self {
        Self {
            params,
            program: program.into(),
        }
    }

    pub fn params(&self) -> &VideoParams {
        &self.params
    }

    pub fn is_available(&self) -> bool {
        Self::check_program_available(&self.program)
    }

    pub fn check_ffmpeg_available() -> bool {
        Self::check_program_available("ffmpeg")
    }

    fn check_program_available(program: &str) -> bool {
        Command::new(program)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Sample `clip` at the configured frame rate and write it to `output_path`
    pub fn encode<P: AsRef<Path>>(&self, clip: &Clip, output_path: P) -> Result<EncodedVideo> {
        let output_path = output_path.as_ref();
        let frame_count = self.params.frame_count(clip.duration());

        if clip.resolution() != self.params.resolution {
            return Err(VideoError::ResolutionMismatch {
                expected: self.params.resolution,
                found: clip.resolution(),
            }
            .into());
        }

        if frame_count == 0 {
            return Err(VideoError::InvalidParameters {
                details: format!("clip of {:.3}s yields no frames at {} fps", clip.duration(), self.params.fps),
            }
            .into());
        }

        if !self.is_available() {
            return Err(VideoError::EncoderUnavailable {
                program: self.program.clone(),
            }
            .into());
        }

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        info!(
            "Encoding {} frames ({:.1}s) to {:?} with {} at {} fps",
            frame_count,
            clip.duration(),
            output_path,
            self.params.codec,
            self.params.fps
        );

        let mut session = EncodeSession::spawn(&self.program, &self.params, output_path)?;
        for i in 0..frame_count {
            let t = i as f64 / self.params.fps;
            let frame = clip.frame_at(t)?;
            session.write_frame(&frame)?;

            if i % 100 == 0 {
                debug!("Encoded frame {}/{}", i, frame_count);
            }
        }
        session.finish()?;

        let metadata = std::fs::metadata(output_path)?;
        Ok(EncodedVideo {
            path: output_path.to_path_buf(),
            duration: clip.duration(),
            frame_count,
            file_size: metadata.len(),
        })
    }

    fn build_command(program: &str, params: &VideoParams, output_path: &Path) -> Command {
        let (width, height) = params.resolution;
        let mut cmd = Command::new(program);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.args([
            "-y",
            "-loglevel", "error",
            "-f", "rawvideo",
            "-pix_fmt", "rgb24",
            "-s", &format!("{}x{}", width, height),
            "-r", &params.fps.to_string(),
            "-i", "pipe:0",
            "-an",
            "-c:v", &params.codec,
            "-pix_fmt", "yuv420p",
            "-crf", &quality_to_crf(params.quality).to_string(),
        ])
        .arg(output_path);
        cmd
    }
}

fn quality_to_crf(quality: u8) -> u8 {
    (51 - ((quality.min(100) as f32 / 100.0) * 51.0) as u8).clamp(0, 51)
}

/// A running FFmpeg child and its stdin
struct EncodeSession {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    resolution: (u32, u32),
}

impl EncodeSession {
    fn spawn(program: &str, params: &VideoParams, output_path: &Path) -> Result<Self> {
        let mut child = VideoEncoder::build_command(program, params, output_path)
            .spawn()
            .map_err(|e| VideoError::EncodingFailed {
                reason: format!("Failed to spawn {}: {}", program, e),
            })?;

        let stdin = child.stdin.take().ok_or_else(|| VideoError::EncodingFailed {
            reason: "Failed to open encoder stdin".to_string(),
        })?;

        Ok(Self {
            child: Some(child),
            stdin: Some(stdin),
            resolution: params.resolution,
        })
    }

    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        if frame.resolution() != self.resolution {
            return Err(VideoError::ResolutionMismatch {
                expected: self.resolution,
                found: frame.resolution(),
            }
            .into());
        }

        let stdin = self.stdin.as_mut().ok_or_else(|| VideoError::EncodingFailed {
            reason: "Encoder already finished".to_string(),
        })?;

        match stdin.write_all(frame.as_rgb_bytes()) {
            Ok(()) => Ok(()),
            Err(e) => Err(self.abort(e)),
        }
    }

    /// The encoder stopped reading; collect its stderr as the reason
    fn abort(&mut self, write_error: std::io::Error) -> SlideshowError {
        drop(self.stdin.take());

        let stderr = self
            .child
            .take()
            .and_then(|child| child.wait_with_output().ok())
            .map(|output| String::from_utf8_lossy(&output.stderr).trim().to_string())
            .unwrap_or_default();

        if stderr.is_empty() {
            VideoError::FrameWriteFailed {
                reason: write_error.to_string(),
            }
            .into()
        } else {
            VideoError::EncodingFailed {
                reason: format!("FFmpeg failed: {}", stderr),
            }
            .into()
        }
    }

    fn finish(mut self) -> Result<()> {
        // Closing stdin is what tells ffmpeg the stream is over
        drop(self.stdin.take());

        let child = self.child.take().ok_or_else(|| VideoError::EncodingFailed {
            reason: "Encoder already finished".to_string(),
        })?;

        let output = child.wait_with_output().map_err(|e| VideoError::EncodingFailed {
            reason: format!("Failed to wait for encoder: {}", e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VideoError::EncodingFailed {
                reason: format!("FFmpeg failed: {}", stderr.trim()),
            }
            .into());
        }

        Ok(())
    }
}

impl Drop for EncodeSession {
    fn drop(&mut self) {
        // Still holding the child means we bailed out mid-stream
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            warn!("Killing unfinished encoder process");
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
