//! Error diffusion dithering to the duotone palette.
//!
//! One engine, [`dither_with_kernel`], handles every kernel. Atkinson and
//! Floyd-Steinberg differ only in the [`Kernel`] data they pass in.
//!
//! # Example
//!
//! ```
//! use retro_filter::{dither_with_kernel, DiffusionOptions, PixelBuffer, FLOYD_STEINBERG};
//!
//! let mut frame = PixelBuffer::from_raw(1, 1, vec![200, 200, 200, 255]).unwrap();
//! dither_with_kernel(&mut frame, &FLOYD_STEINBERG, &DiffusionOptions::new());
//! assert_eq!(frame.data(), &[0, 0, 0, 255]);
//! ```

mod kernel;
mod options;

pub use kernel::{ErrorSplit, Kernel, ATKINSON, FLOYD_STEINBERG};
pub use options::{ChannelArithmetic, DiffusionOptions};

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::color::luma;
use crate::palette::remap_duotone;

/// Gray level above which a pixel quantizes to white.
pub const QUANTIZE_THRESHOLD: i32 = 128;

/// Dither a frame in place and remap it to ink/accent.
///
/// Pixels are visited in strict row-major order. Each one is quantized to
/// 0 or 255 from its current (error-laden) luma, and the error is pushed to
/// the kernel's taps. Taps outside the frame are dropped. Once the scan is
/// done every pixel is exactly [`INK`](crate::INK) or
/// [`ACCENT`](crate::ACCENT); alpha is never touched.
pub fn dither_with_kernel(buffer: &mut PixelBuffer, kernel: &Kernel, options: &DiffusionOptions) {
    let (width, height) = (buffer.width(), buffer.height());
    let data = buffer.data_mut();

    for y in 0..height {
        for x in 0..width {
            diffuse_pixel(data, width, height, x, y, kernel, options);
        }
    }

    remap_duotone(buffer);
}

/// Quantize pixel `(x, y)` and distribute its error.
///
/// Returns the quantization error before kernel splitting.
pub(crate) fn diffuse_pixel(
    data: &mut [u8],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    kernel: &Kernel,
    options: &DiffusionOptions,
) -> i32 {
    let idx = (y * width + x) * CHANNELS;
    let gray = i32::from(luma(data[idx], data[idx + 1], data[idx + 2]));
    let quantized = if gray > QUANTIZE_THRESHOLD { 255 } else { 0 };
    data[idx..idx + 3].fill(quantized as u8);

    let error = gray - quantized;
    if error == 0 {
        return 0;
    }

    for &(dx, dy, weight) in kernel.entries {
        let nx = x as i64 + i64::from(dx);
        let ny = y as i64 + i64::from(dy);
        if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
            continue;
        }
        let delta = kernel.increment(error, weight);
        let target = (ny as usize * width + nx as usize) * CHANNELS;
        for channel in &mut data[target..target + 3] {
            *channel = options.arithmetic.store(*channel, delta);
        }
    }

    error
}
