//! Character-density ASCII renderer.

use crate::block::{quantize_blocks, BLOCK_SIZE};
use crate::buffer::PixelBuffer;
use crate::palette::ACCENT;

use super::rasterizer::{blit_rgb, TextRasterizer};

/// Glyphs from sparsest to densest.
pub const GLYPH_RAMP: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Ramp index for a block average in `0.0..=255.0`.
///
/// `min(floor(average / 256 * 10), 9)`
#[inline]
pub fn ramp_index(average: f64) -> usize {
    let idx = (average / 256.0 * GLYPH_RAMP.len() as f64).floor();
    (idx.max(0.0) as usize).min(GLYPH_RAMP.len() - 1)
}

/// Glyph for a block average.
#[inline]
pub fn glyph_for(average: f64) -> char {
    GLYPH_RAMP[ramp_index(average)]
}

/// Replace the frame with an ASCII rendering of itself.
///
/// Block averages are taken from the incoming pixels, then the frame is
/// cleared to opaque black and one glyph per full block is drawn in the
/// accent color with its baseline on the block's bottom edge. Partial
/// blocks at the right and bottom edges stay black.
///
/// Returns the number of glyphs drawn.
pub fn render_ascii<R: TextRasterizer + ?Sized>(buffer: &mut PixelBuffer, rasterizer: &mut R) -> usize {
    let blocks = quantize_blocks(buffer);

    for px in buffer.data_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&[0, 0, 0, 255]);
    }

    for block in &blocks {
        let glyph = glyph_for(block.average);
        let patch = rasterizer.draw_glyph(glyph, block.x, block.y + BLOCK_SIZE, ACCENT);
        blit_rgb(buffer, &patch);
    }

    blocks.len()
}
