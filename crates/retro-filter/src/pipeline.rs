//! Filter mode selection and per-frame dispatch.

use std::fmt;
use std::str::FromStr;

use crate::buffer::PixelBuffer;
use crate::dither::{dither_with_kernel, DiffusionOptions, Kernel, ATKINSON, FLOYD_STEINBERG};
use crate::error::FilterError;
use crate::render::{render_ascii, render_bitmap, TextRasterizer};

/// The four renderings, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// Atkinson error diffusion, duotone.
    #[default]
    Atkinson,
    /// Floyd-Steinberg error diffusion, duotone.
    FloydSteinberg,
    /// Glyph-per-block ASCII art.
    Ascii,
    /// Ink/accent block mosaic.
    Bitmap,
}

impl FilterMode {
    /// All modes in cycle order.
    pub const ALL: [FilterMode; 4] = [
        FilterMode::Atkinson,
        FilterMode::FloydSteinberg,
        FilterMode::Ascii,
        FilterMode::Bitmap,
    ];

    /// The mode after this one; Bitmap wraps back to Atkinson.
    pub fn next(self) -> Self {
        match self {
            FilterMode::Atkinson => FilterMode::FloydSteinberg,
            FilterMode::FloydSteinberg => FilterMode::Ascii,
            FilterMode::Ascii => FilterMode::Bitmap,
            FilterMode::Bitmap => FilterMode::Atkinson,
        }
    }

    /// Machine name, accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            FilterMode::Atkinson => "atkinson",
            FilterMode::FloydSteinberg => "floyd-steinberg",
            FilterMode::Ascii => "ascii",
            FilterMode::Bitmap => "bitmap",
        }
    }

    /// Human-readable label for status lines.
    pub fn label(self) -> &'static str {
        match self {
            FilterMode::Atkinson => "Atkinson",
            FilterMode::FloydSteinberg => "Floyd-Steinberg",
            FilterMode::Ascii => "ASCII",
            FilterMode::Bitmap => "Bitmap",
        }
    }

    /// Diffusion kernel for the dithering modes.
    pub fn kernel(self) -> Option<&'static Kernel> {
        match self {
            FilterMode::Atkinson => Some(&ATKINSON),
            FilterMode::FloydSteinberg => Some(&FLOYD_STEINBERG),
            FilterMode::Ascii | FilterMode::Bitmap => None,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FilterMode {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('_', "-");
        match norm.as_str() {
            "atkinson" => Ok(FilterMode::Atkinson),
            "floyd-steinberg" | "floydsteinberg" | "fs" => Ok(FilterMode::FloydSteinberg),
            "ascii" => Ok(FilterMode::Ascii),
            "bitmap" => Ok(FilterMode::Bitmap),
            _ => Err(FilterError::UnknownMode(s.to_string())),
        }
    }
}

/// Run one frame through `mode`, in place.
///
/// The dithering modes overwrite every pixel's RGB; ASCII overwrites the
/// whole frame; bitmap leaves partial edge blocks alone.
pub fn apply<R: TextRasterizer + ?Sized>(
    mode: FilterMode,
    buffer: &mut PixelBuffer,
    rasterizer: &mut R,
    options: &DiffusionOptions,
) {
    match mode {
        FilterMode::Atkinson | FilterMode::FloydSteinberg => {
            if let Some(kernel) = mode.kernel() {
                dither_with_kernel(buffer, kernel, options);
            }
        }
        FilterMode::Ascii => {
            render_ascii(buffer, rasterizer);
        }
        FilterMode::Bitmap => {
            render_bitmap(buffer);
        }
    }
}

/// [`apply`] on a raw RGBA slice.
///
/// The slice is validated against `width * height * 4` before anything is
/// written; on mismatch it is returned untouched with
/// [`FilterError::InvalidBufferSize`].
pub fn apply_raw<R: TextRasterizer + ?Sized>(
    mode: FilterMode,
    width: usize,
    height: usize,
    data: &mut [u8],
    rasterizer: &mut R,
    options: &DiffusionOptions,
) -> Result<(), FilterError> {
    let mut buffer = PixelBuffer::from_raw(width, height, data.to_vec())?;
    apply(mode, &mut buffer, rasterizer, options);
    data.copy_from_slice(buffer.data());
    Ok(())
}

/// Holds the selected mode and everything a frame needs besides pixels.
///
/// The mode is the only state carried from one frame to the next; changing
/// it affects the next [`process`](FilterPipeline::process) call.
///
/// # Example
///
/// ```
/// use retro_filter::{FilterMode, FilterPipeline, GlyphPatch, PixelBuffer, Rgb, TextRasterizer};
///
/// struct NoText;
/// impl TextRasterizer for NoText {
///     fn draw_glyph(&mut self, _: char, x: usize, y: usize, _: Rgb) -> GlyphPatch {
///         GlyphPatch::blank(x as i32, y as i32 - 8, 8, 8)
///     }
/// }
///
/// let mut pipeline = FilterPipeline::new(NoText);
/// assert_eq!(pipeline.cycle(), FilterMode::FloydSteinberg);
///
/// let mut frame = PixelBuffer::filled(8, 8, Rgb::new(50, 50, 50), 255);
/// pipeline.set_mode(FilterMode::Bitmap);
/// pipeline.process(&mut frame);
/// assert_eq!(frame.pixel(0, 0), [0, 255, 156, 255]);
/// ```
pub struct FilterPipeline<R> {
    mode: FilterMode,
    rasterizer: R,
    options: DiffusionOptions,
}

impl<R: TextRasterizer> FilterPipeline<R> {
    /// A pipeline starting in [`FilterMode::Atkinson`] with default options.
    pub fn new(rasterizer: R) -> Self {
        Self {
            mode: FilterMode::default(),
            rasterizer,
            options: DiffusionOptions::default(),
        }
    }

    /// Start in `mode` instead of the default.
    pub fn with_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the diffusion options.
    pub fn with_options(mut self, options: DiffusionOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    #[inline]
    pub fn options(&self) -> &DiffusionOptions {
        &self.options
    }

    pub fn set_mode(&mut self, mode: FilterMode) {
        if mode != self.mode {
            tracing::info!(from = %self.mode, to = %mode, "Filter mode changed");
        }
        self.mode = mode;
    }

    /// Advance to the next mode and return it.
    pub fn cycle(&mut self) -> FilterMode {
        let next = self.mode.next();
        tracing::info!("Filter: {}", next.label());
        self.mode = next;
        next
    }

    /// Filter one frame in place with the current mode.
    pub fn process(&mut self, buffer: &mut PixelBuffer) {
        tracing::trace!(
            mode = self.mode.name(),
            width = buffer.width(),
            height = buffer.height(),
            "Processing frame"
        );
        apply(self.mode, buffer, &mut self.rasterizer, &self.options);
    }

    /// Access the rasterizer, e.g. to inspect a glyph cache.
    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }
}
