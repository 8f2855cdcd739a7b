//! Block-based renderers: ASCII glyphs and the bitmap mosaic.

mod ascii;
mod bitmap;
mod rasterizer;

pub use ascii::{glyph_for, ramp_index, render_ascii, GLYPH_RAMP};
pub use bitmap::render_bitmap;
pub use rasterizer::{blit_rgb, GlyphPatch, TextRasterizer};
