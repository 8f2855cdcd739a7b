//! Test fixtures and constants.

use retro_filter::{GlyphPatch, PixelBuffer, Rgb, TextRasterizer};
use retrocam::rendering::png_codec;
use std::path::{Path, PathBuf};

/// Frame sizes used across tests
pub mod sizes {
    /// Small frame that divides evenly into 8x8 blocks
    pub const EVEN: (u32, u32) = (32, 24);

    /// Frame with 5px and 7px partial edge strips
    pub const RAGGED: (u32, u32) = (45, 31);
}

/// Rasterizer that draws a solid cell in the requested color, standing in
/// for font rendering so tests don't depend on installed fonts
pub struct SolidGlyphs;

impl TextRasterizer for SolidGlyphs {
    fn draw_glyph(&mut self, glyph: char, x: usize, baseline_y: usize, color: Rgb) -> GlyphPatch {
        let mut patch = GlyphPatch::blank(x as i32, baseline_y as i32 - 8, 8, 8);
        if glyph != ' ' {
            for px in patch.pixels.chunks_exact_mut(4) {
                px[..3].copy_from_slice(&color.to_array());
            }
        }
        patch
    }
}

/// Horizontal gray ramp, opaque
pub fn gray_ramp(width: u32, height: u32) -> PixelBuffer {
    let span = (width.max(2) - 1) as usize;
    PixelBuffer::from_fn(width as usize, height as usize, |x, _| {
        let v = (x * 255 / span) as u8;
        [v, v, v, 255]
    })
}

/// Uniform opaque gray
pub fn flat_gray(width: u32, height: u32, value: u8) -> PixelBuffer {
    PixelBuffer::filled(
        width as usize,
        height as usize,
        Rgb::new(value, value, value),
        255,
    )
}

/// Write `frame` as a PNG at `path`
pub fn write_frame(path: &Path, frame: &PixelBuffer) {
    let png = png_codec::encode_rgba(frame.width() as u32, frame.height() as u32, frame.data())
        .expect("encode fixture frame");
    std::fs::write(path, png).expect("write fixture frame");
}

/// Fill `dir` with `count` numbered ramp frames and return their paths
pub fn write_sequence(dir: &Path, count: usize, width: u32, height: u32) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let path = dir.join(format!("{i:04}.png"));
            write_frame(&path, &gray_ramp(width, height));
            path
        })
        .collect()
}
