//! Frame sources for the session loop.
//!
//! A live camera is out of reach for a headless binary, so frames come from
//! a directory of PNG stills or from a synthetic test pattern.

use crate::error::CaptureError;
use crate::models::FrameSpec;
use crate::rendering::png_codec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use retro_filter::PixelBuffer;
use std::path::{Path, PathBuf};

/// Something that yields RGBA frames until it runs dry
pub trait CaptureSource {
    /// Dimensions of every frame this source yields
    fn frame_spec(&self) -> FrameSpec;

    /// Next frame, or `None` when the source is exhausted
    fn next_frame(&mut self) -> Result<Option<PixelBuffer>, CaptureError>;
}

impl<T: CaptureSource + ?Sized> CaptureSource for Box<T> {
    fn frame_spec(&self) -> FrameSpec {
        (**self).frame_spec()
    }

    fn next_frame(&mut self) -> Result<Option<PixelBuffer>, CaptureError> {
        (**self).next_frame()
    }
}

/// Read a PNG file into an RGBA pixel buffer
pub fn load_frame(path: &Path) -> Result<PixelBuffer, CaptureError> {
    let bytes = std::fs::read(path).map_err(|source| CaptureError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let image = png_codec::decode_rgba(&bytes).map_err(|message| CaptureError::Decode {
        path: path.to_path_buf(),
        message,
    })?;
    Ok(PixelBuffer::from_raw(
        image.width as usize,
        image.height as usize,
        image.data,
    )?)
}

/// Plays back `*.png` files from a directory in file name order
#[derive(Debug)]
pub struct PngSequenceSource {
    size: FrameSpec,
    paths: Vec<PathBuf>,
    cursor: usize,
}

impl PngSequenceSource {
    /// Collect the PNG files in `dir`
    pub fn open(dir: &Path, size: FrameSpec) -> Result<Self, CaptureError> {
        let entries = std::fs::read_dir(dir).map_err(|source| CaptureError::Read {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .filter(|p| {
                p.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
            })
            .collect();
        paths.sort();

        tracing::info!(dir = %dir.display(), frames = paths.len(), "Opened frame sequence");
        Ok(Self::from_paths(paths, size))
    }

    /// Play back an explicit list of files
    pub fn from_paths(paths: Vec<PathBuf>, size: FrameSpec) -> Self {
        Self {
            size,
            paths,
            cursor: 0,
        }
    }

    /// Frames not yet yielded
    pub fn remaining(&self) -> usize {
        self.paths.len() - self.cursor
    }
}

impl CaptureSource for PngSequenceSource {
    fn frame_spec(&self) -> FrameSpec {
        self.size
    }

    fn next_frame(&mut self) -> Result<Option<PixelBuffer>, CaptureError> {
        let Some(path) = self.paths.get(self.cursor) else {
            return Ok(None);
        };
        self.cursor += 1;

        let frame = load_frame(path)?;
        if frame.width() != self.size.width as usize || frame.height() != self.size.height as usize
        {
            return Err(CaptureError::DimensionMismatch {
                path: path.clone(),
                width: self.size.width,
                height: self.size.height,
                actual_width: frame.width() as u32,
                actual_height: frame.height() as u32,
            });
        }
        tracing::trace!(path = %path.display(), "Captured frame");
        Ok(Some(frame))
    }
}

/// Synthetic frames: a horizontal gradient that scrolls each frame, plus
/// seeded noise so the dithers have something to chew on
#[derive(Debug)]
pub struct TestPatternSource {
    size: FrameSpec,
    frames: usize,
    produced: usize,
    rng: StdRng,
}

impl TestPatternSource {
    /// Peak-to-peak noise amplitude
    pub const NOISE: i16 = 24;

    /// Pixels the gradient moves per frame
    pub const SCROLL: usize = 8;

    pub fn new(size: FrameSpec, frames: usize, seed: u64) -> Self {
        Self {
            size,
            frames,
            produced: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl CaptureSource for TestPatternSource {
    fn frame_spec(&self) -> FrameSpec {
        self.size
    }

    fn next_frame(&mut self) -> Result<Option<PixelBuffer>, CaptureError> {
        if self.produced >= self.frames {
            return Ok(None);
        }

        let width = self.size.width as usize;
        let height = self.size.height as usize;
        let span = width.saturating_sub(1).max(1);
        let shift = self.produced * Self::SCROLL;
        let rng = &mut self.rng;

        let frame = PixelBuffer::from_fn(width, height, |x, _y| {
            let base = (((x + shift) % width) * 255 / span) as i16;
            let noise = rng.gen_range(0..=Self::NOISE) - Self::NOISE / 2;
            let v = (base + noise).clamp(0, 255) as u8;
            [v, v, v, 255]
        });

        self.produced += 1;
        Ok(Some(frame))
    }
}
