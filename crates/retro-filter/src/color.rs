//! Colors and the shared luminance sampler.

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as `[r, g, b]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Lowercase `#rrggbb` form, as used in SVG fill attributes.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Perceived brightness of an 8-bit RGB triple.
///
/// Rec. 601 weights, rounded half up to the nearest integer:
///
/// ```text
/// luma = round(0.299 R + 0.587 G + 0.114 B)
/// ```
///
/// Every filter mode goes through this function so that "bright" means the
/// same thing in all of them.
///
/// # Example
///
/// ```
/// use retro_filter::luma;
///
/// assert_eq!(luma(0, 0, 0), 0);
/// assert_eq!(luma(255, 255, 255), 255);
/// assert_eq!(luma(255, 0, 0), 76);
/// ```
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    (weighted + 0.5).floor().min(255.0) as u8
}
