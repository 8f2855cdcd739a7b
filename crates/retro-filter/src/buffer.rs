//! The RGBA frame buffer handed to every filter.

use crate::color::Rgb;
use crate::error::FilterError;

/// Bytes per pixel (RGBA8).
pub const CHANNELS: usize = 4;

/// A row-major RGBA8 frame.
///
/// The length of the sample data is always `width * height * 4`; this is
/// checked once at construction so the filters can index freely.
///
/// # Example
///
/// ```
/// use retro_filter::PixelBuffer;
///
/// let buffer = PixelBuffer::from_raw(2, 1, vec![0; 8]).unwrap();
/// assert_eq!(buffer.width(), 2);
///
/// assert!(PixelBuffer::from_raw(2, 2, vec![0; 8]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap existing RGBA samples.
    ///
    /// Fails with [`FilterError::InvalidBufferSize`] when `data.len()` is not
    /// `width * height * 4`.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, FilterError> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A frame where every pixel is `color` with the given alpha.
    pub fn filled(width: usize, height: usize, color: Rgb, alpha: u8) -> Self {
        let data = [color.r, color.g, color.b, alpha].repeat(width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Build a frame by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Give the samples back to the caller.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel `(x, y)`.
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * CHANNELS
    }

    /// RGBA of pixel `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Overwrite R, G and B of pixel `(x, y)`, keeping alpha.
    #[inline]
    pub fn set_rgb(&mut self, x: usize, y: usize, color: Rgb) {
        let i = self.offset(x, y);
        self.data[i] = color.r;
        self.data[i + 1] = color.g;
        self.data[i + 2] = color.b;
    }
}

/// Validate that a raw slice can hold a `width` x `height` RGBA frame.
///
/// Dimensions whose byte length overflows `usize` report `expected` as
/// `usize::MAX`.
pub(crate) fn check_len(width: usize, height: usize, actual: usize) -> Result<(), FilterError> {
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .unwrap_or(usize::MAX);
    if actual != expected {
        return Err(FilterError::InvalidBufferSize { expected, actual });
    }
    Ok(())
}
