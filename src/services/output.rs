//! Where filtered frames end up: a numbered display sequence and
//! timestamped screenshots.

use crate::error::RenderError;
use crate::models::ScreenshotConfig;
use crate::rendering::png_codec;
use chrono::{DateTime, Utc};
use retro_filter::PixelBuffer;
use std::path::{Path, PathBuf};

/// Encode a frame as an RGBA PNG
pub fn encode_frame(frame: &PixelBuffer) -> Result<Vec<u8>, RenderError> {
    png_codec::encode_rgba(frame.width() as u32, frame.height() as u32, frame.data())
}

/// `retrocam-2026-10-19T12-34-56-789Z.png`: an ISO-8601 UTC timestamp with
/// `:` and `.` swapped for `-`
pub fn screenshot_file_name(at: DateTime<Utc>) -> String {
    format!("retrocam-{}.png", at.format("%Y-%m-%dT%H-%M-%S-%3fZ"))
}

/// Writes every displayed frame as `frame-NNNNN.png`
#[derive(Debug, Clone)]
pub struct FrameWriter {
    dir: PathBuf,
}

impl FrameWriter {
    /// Create the output directory if needed
    pub fn create(dir: &Path) -> Result<Self, RenderError> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, index: u64) -> PathBuf {
        self.dir.join(format!("frame-{index:05}.png"))
    }

    /// Write frame `index`
    pub fn write(&self, index: u64, frame: &PixelBuffer) -> Result<PathBuf, RenderError> {
        let path = self.path_for(index);
        std::fs::write(&path, encode_frame(frame)?)?;
        tracing::trace!(path = %path.display(), "Wrote display frame");
        Ok(path)
    }
}

/// Saves screenshots of the filtered output
#[derive(Debug, Clone)]
pub struct ScreenshotWriter {
    dir: PathBuf,
    optimize: bool,
}

impl ScreenshotWriter {
    pub fn new(dir: impl Into<PathBuf>, optimize: bool) -> Self {
        Self {
            dir: dir.into(),
            optimize,
        }
    }

    pub fn from_config(config: &ScreenshotConfig) -> Self {
        Self::new(&config.dir, config.optimize)
    }

    /// Save `frame` stamped with the current time
    pub fn save(&self, frame: &PixelBuffer) -> Result<PathBuf, RenderError> {
        self.save_at(frame, Utc::now())
    }

    /// Save `frame` stamped with `at`
    pub fn save_at(&self, frame: &PixelBuffer, at: DateTime<Utc>) -> Result<PathBuf, RenderError> {
        std::fs::create_dir_all(&self.dir)?;

        let mut png = encode_frame(frame)?;
        if self.optimize {
            png = png_codec::optimize(png);
        }

        let path = self.dir.join(screenshot_file_name(at));
        std::fs::write(&path, &png)?;
        tracing::info!(path = %path.display(), bytes = png.len(), "Saved screenshot");
        Ok(path)
    }
}
