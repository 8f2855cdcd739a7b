//! Text rasterization seam used by the ASCII renderer.
//!
//! The core never loads fonts itself. Whoever drives the pipeline supplies a
//! [`TextRasterizer`]; the renderer only copies the RGB samples it returns.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::color::Rgb;

/// A small RGBA patch produced for one glyph.
///
/// `x`/`y` is the patch's top-left corner in frame coordinates. It may lie
/// partly outside the frame; the renderer clips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphPatch {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
    /// Row-major RGBA samples, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl GlyphPatch {
    /// An all-black opaque patch, the field glyphs are drawn onto.
    pub fn blank(x: i32, y: i32, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            pixels: [0, 0, 0, 255].repeat(width * height),
        }
    }
}

/// Draws single glyphs for the ASCII renderer.
///
/// Implementations must behave like a pure function of their arguments:
/// the same glyph, position and color always yield the same patch.
pub trait TextRasterizer {
    /// Rasterize `glyph` with its left edge at `x` and its baseline at
    /// `baseline_y`, in `color` on a black field.
    ///
    /// The returned patch should carry `width * height * 4` samples; a short
    /// patch is drawn only as far as its samples reach.
    fn draw_glyph(&mut self, glyph: char, x: usize, baseline_y: usize, color: Rgb) -> GlyphPatch;
}

impl<T: TextRasterizer + ?Sized> TextRasterizer for &mut T {
    fn draw_glyph(&mut self, glyph: char, x: usize, baseline_y: usize, color: Rgb) -> GlyphPatch {
        (**self).draw_glyph(glyph, x, baseline_y, color)
    }
}

impl<T: TextRasterizer + ?Sized> TextRasterizer for Box<T> {
    fn draw_glyph(&mut self, glyph: char, x: usize, baseline_y: usize, color: Rgb) -> GlyphPatch {
        (**self).draw_glyph(glyph, x, baseline_y, color)
    }
}

/// Copy the RGB samples of `patch` into `buffer`, clipped to the frame.
///
/// The frame's alpha channel is not written. Patch pixels beyond the end of
/// a short `pixels` vector are skipped.
pub fn blit_rgb(buffer: &mut PixelBuffer, patch: &GlyphPatch) {
    let (width, height) = (buffer.width() as i64, buffer.height() as i64);
    for py in 0..patch.height {
        let fy = i64::from(patch.y) + py as i64;
        if fy < 0 || fy >= height {
            continue;
        }
        for px in 0..patch.width {
            let fx = i64::from(patch.x) + px as i64;
            if fx < 0 || fx >= width {
                continue;
            }
            let src = (py * patch.width + px) * CHANNELS;
            let Some(rgb) = patch.pixels.get(src..src + 3) else {
                return;
            };
            let dst = buffer.offset(fx as usize, fy as usize);
            buffer.data_mut()[dst..dst + 3].copy_from_slice(rgb);
        }
    }
}
