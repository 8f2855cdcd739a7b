//! The fixed two-color palette and the duotone remap pass.
//!
//! Every mode except ASCII emits only [`INK`] and [`ACCENT`]. The mapping is
//! inverted on purpose: bright input becomes ink, dark input glows in the
//! accent color.

use crate::buffer::PixelBuffer;
use crate::color::Rgb;

/// Black ink.
pub const INK: Rgb = Rgb::new(0, 0, 0);

/// Phosphor green accent.
pub const ACCENT: Rgb = Rgb::new(0, 255, 156);

/// Threshold shared by the duotone remap and the bitmap renderer.
///
/// Values strictly above it map to [`INK`].
pub const DUOTONE_THRESHOLD: u8 = 128;

/// Pick the palette color for a brightness value.
///
/// ```
/// use retro_filter::{duotone, ACCENT, INK};
///
/// assert_eq!(duotone(200), INK);
/// assert_eq!(duotone(128), ACCENT);
/// ```
#[inline]
pub fn duotone(value: u8) -> Rgb {
    if value > DUOTONE_THRESHOLD {
        INK
    } else {
        ACCENT
    }
}

/// Remap a quantized buffer to ink/accent, one pixel at a time.
///
/// Reads only the red channel of each pixel (0 or 255 after dithering) and
/// overwrites R, G and B. Alpha is left alone.
pub fn remap_duotone(buffer: &mut PixelBuffer) {
    for px in buffer.data_mut().chunks_exact_mut(4) {
        let color = duotone(px[0]);
        px[0] = color.r;
        px[1] = color.g;
        px[2] = color.b;
    }
}
