//! Diffusion options and 8-bit channel storage rules.

use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;

/// How diffused error is written back into an 8-bit channel.
///
/// Error is added straight into the frame's channel bytes, so a running
/// value can leave `0..=255`. Both variants describe a real byte-array
/// behavior; they differ only in what the next pixel reads back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelArithmetic {
    /// Truncate toward zero, then wrap modulo 256.
    ///
    /// A dark pixel pushed to -14 reads back as 242. This is the reference
    /// behavior and the default.
    #[default]
    Wrapping,

    /// Round half to even, then clamp to `0..=255`.
    ///
    /// Matches a clamped canvas byte array: -14 reads back as 0.
    Saturating,
}

impl ChannelArithmetic {
    /// Store `old + delta` into a channel byte.
    #[inline]
    pub fn store(self, old: u8, delta: f64) -> u8 {
        let value = f64::from(old) + delta;
        match self {
            ChannelArithmetic::Wrapping => (value.trunc() as i64).rem_euclid(256) as u8,
            ChannelArithmetic::Saturating => value.round_ties_even().clamp(0.0, 255.0) as u8,
        }
    }

    /// Stable configuration name.
    pub fn name(self) -> &'static str {
        match self {
            ChannelArithmetic::Wrapping => "wrapping",
            ChannelArithmetic::Saturating => "saturating",
        }
    }
}

impl fmt::Display for ChannelArithmetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChannelArithmetic {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wrapping" | "wrap" => Ok(ChannelArithmetic::Wrapping),
            "saturating" | "clamp" | "clamped" => Ok(ChannelArithmetic::Saturating),
            _ => Err(FilterError::UnknownArithmetic(s.to_string())),
        }
    }
}

/// Configuration for the error diffusion engine.
///
/// # Example
///
/// ```
/// use retro_filter::{ChannelArithmetic, DiffusionOptions};
///
/// let options = DiffusionOptions::new().arithmetic(ChannelArithmetic::Saturating);
/// assert_eq!(options.arithmetic, ChannelArithmetic::Saturating);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffusionOptions {
    /// Channel storage rule for diffused error.
    ///
    /// Default: [`ChannelArithmetic::Wrapping`]
    pub arithmetic: ChannelArithmetic,
}

impl DiffusionOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the channel storage rule.
    #[inline]
    pub fn arithmetic(mut self, arithmetic: ChannelArithmetic) -> Self {
        self.arithmetic = arithmetic;
        self
    }
}
