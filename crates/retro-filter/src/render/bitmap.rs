//! Block mosaic renderer.

use crate::block::{quantize_blocks, BLOCK_SIZE};
use crate::buffer::PixelBuffer;
use crate::palette::{ACCENT, DUOTONE_THRESHOLD, INK};

/// Fill every full block with ink or accent according to its average.
///
/// Bright blocks (`average > 128`) become ink and dark ones accent. Pixels
/// in the partial strips along the right and bottom edges are not touched.
///
/// Returns the number of blocks filled.
pub fn render_bitmap(buffer: &mut PixelBuffer) -> usize {
    let blocks = quantize_blocks(buffer);
    for block in &blocks {
        let color = if block.average > f64::from(DUOTONE_THRESHOLD) {
            INK
        } else {
            ACCENT
        };
        for y in block.y..block.y + BLOCK_SIZE {
            for x in block.x..block.x + BLOCK_SIZE {
                buffer.set_rgb(x, y, color);
            }
        }
    }
    blocks.len()
}
