//! Block quantization shared by the ASCII and bitmap renderers.
//!
//! The frame is cut into non-overlapping [`BLOCK_SIZE`] x [`BLOCK_SIZE`]
//! squares starting at the top-left corner. Only blocks that fit entirely
//! inside the frame are produced; a trailing strip narrower than a block is
//! skipped, never padded.

use crate::buffer::PixelBuffer;

/// Edge length of a block in pixels.
pub const BLOCK_SIZE: usize = 8;

/// One full block and its mean brightness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    /// Left edge in pixels.
    pub x: usize,
    /// Top edge in pixels.
    pub y: usize,
    /// Mean of `(R + G + B) / 3` over the block's pixels, in `0.0..=255.0`.
    pub average: f64,
}

/// Number of full blocks across and down.
#[inline]
pub fn block_grid(width: usize, height: usize) -> (usize, usize) {
    (width / BLOCK_SIZE, height / BLOCK_SIZE)
}

/// Average every full block of `buffer`, in row-major block order.
///
/// Reads only; callers that mutate the frame afterwards still see the
/// averages of the original pixels.
pub fn quantize_blocks(buffer: &PixelBuffer) -> Vec<Block> {
    let (cols, rows) = block_grid(buffer.width(), buffer.height());
    let mut blocks = Vec::with_capacity(cols * rows);
    for by in 0..rows {
        for bx in 0..cols {
            let (x, y) = (bx * BLOCK_SIZE, by * BLOCK_SIZE);
            blocks.push(Block {
                x,
                y,
                average: block_average(buffer, x, y),
            });
        }
    }
    blocks
}

/// Mean brightness of the block whose top-left corner is `(x, y)`.
fn block_average(buffer: &PixelBuffer, x: usize, y: usize) -> f64 {
    let data = buffer.data();
    let mut sum = 0.0;
    for j in 0..BLOCK_SIZE {
        let row = buffer.offset(x, y + j);
        for px in data[row..row + BLOCK_SIZE * 4].chunks_exact(4) {
            sum += (f64::from(px[0]) + f64::from(px[1]) + f64::from(px[2])) / 3.0;
        }
    }
    sum / (BLOCK_SIZE * BLOCK_SIZE) as f64
}
