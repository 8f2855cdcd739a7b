//! retro-filter: duotone dithering and block renderers for live video frames
//!
//! Turns one RGBA8 frame into one of four stylized renderings using a fixed
//! black/green palette:
//!
//! - **Atkinson** and **Floyd-Steinberg** error diffusion, remapped to
//!   ink/accent per pixel
//! - **ASCII**: one glyph per 8x8 block, chosen from a density ramp
//! - **Bitmap**: one flat color per 8x8 block
//!
//! # Quick Start
//!
//! ```
//! use retro_filter::{apply, DiffusionOptions, FilterMode, GlyphPatch, PixelBuffer, Rgb, TextRasterizer};
//!
//! struct NoText;
//! impl TextRasterizer for NoText {
//!     fn draw_glyph(&mut self, _: char, x: usize, y: usize, _: Rgb) -> GlyphPatch {
//!         GlyphPatch::blank(x as i32, y as i32 - 8, 8, 8)
//!     }
//! }
//!
//! let mut frame = PixelBuffer::filled(16, 16, Rgb::new(90, 90, 90), 255);
//! apply(FilterMode::Atkinson, &mut frame, &mut NoText, &DiffusionOptions::new());
//!
//! for px in frame.data().chunks_exact(4) {
//!     assert!(px[..3] == [0, 0, 0] || px[..3] == [0, 255, 156]);
//! }
//! ```
//!
//! # Brightness Mapping
//!
//! Both duotone outputs are inverted: bright input becomes [`INK`] (black)
//! and dark input becomes [`ACCENT`] (green). This is the look being
//! reproduced, not a bug.
//!
//! # 8-bit Storage
//!
//! Diffused error is added directly into the frame's channel bytes. By
//! default a value that leaves `0..=255` wraps modulo 256, so a later pixel
//! may read a dark neighbor as bright. [`ChannelArithmetic::Saturating`]
//! clamps instead. The final colors only depend on the red channel of each
//! quantized pixel, but the choice does change which pixels quantize where.
//!
//! # Threading
//!
//! Everything here is synchronous and single-threaded. Error diffusion reads
//! values written earlier in the same scan, so a frame cannot be split
//! across threads.

pub mod block;
pub mod buffer;
pub mod color;
pub mod dither;
pub mod error;
pub mod palette;
pub mod pipeline;
pub mod render;

mod domain_tests;

pub use block::{block_grid, quantize_blocks, Block, BLOCK_SIZE};
pub use buffer::{PixelBuffer, CHANNELS};
pub use color::{luma, Rgb};
pub use dither::{
    dither_with_kernel, ChannelArithmetic, DiffusionOptions, ErrorSplit, Kernel, ATKINSON,
    FLOYD_STEINBERG,
};
pub use error::FilterError;
pub use palette::{duotone, remap_duotone, ACCENT, INK};
pub use pipeline::{apply, apply_raw, FilterMode, FilterPipeline};
pub use render::{
    glyph_for, render_ascii, render_bitmap, GlyphPatch, TextRasterizer, GLYPH_RAMP,
};
