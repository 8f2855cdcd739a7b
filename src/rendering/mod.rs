pub mod glyph_rasterizer;
pub mod png_codec;

pub use glyph_rasterizer::SvgGlyphRasterizer;
pub use png_codec::{decode_rgba, encode_rgba, RgbaImage};
