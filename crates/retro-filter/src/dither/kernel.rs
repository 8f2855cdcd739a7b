//! Error diffusion kernel definitions.
//!
//! Each kernel specifies which not-yet-visited neighbors receive a share of
//! a pixel's quantization error, and how that share is computed.

/// How a kernel turns the quantization error into per-tap increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSplit {
    /// Divide the error once with integer floor division, then add
    /// `share * weight` to each tap.
    ///
    /// `floor(-55 / 8) == -7`, not `-6`: the rounding is toward negative
    /// infinity.
    FloorDivided,

    /// Add the exact rational `error * weight / divisor` to each tap. The
    /// fractional part is resolved when the value is stored back into the
    /// 8-bit channel.
    Fractional,
}

/// An error diffusion kernel.
///
/// The total error propagated is `sum(weights) / divisor`. Floyd-Steinberg
/// propagates all of it; Atkinson propagates 6/8 and drops the rest, which is
/// what gives it its harder contrast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    /// (dx, dy, weight) entries, in the order they are applied.
    ///
    /// `dy` is never negative and `dx` is positive whenever `dy == 0`, so
    /// every tap lands on a pixel the row-major scan has not reached yet.
    pub entries: &'static [(i32, i32, u8)],

    /// Divisor shared by all weights.
    pub divisor: u8,

    /// Error splitting rule.
    pub split: ErrorSplit,
}

impl Kernel {
    /// Sum of all tap weights.
    pub fn weight_sum(&self) -> u32 {
        self.entries.iter().map(|&(_, _, w)| u32::from(w)).sum()
    }

    /// Increment a tap of weight `weight` receives for quantization error
    /// `error`.
    #[inline]
    pub fn increment(&self, error: i32, weight: u8) -> f64 {
        match self.split {
            ErrorSplit::FloorDivided => {
                let share = error.div_euclid(i32::from(self.divisor));
                f64::from(share * i32::from(weight))
            }
            ErrorSplit::Fractional => {
                f64::from(error) * f64::from(weight) / f64::from(self.divisor)
            }
        }
    }
}

/// Atkinson dithering kernel.
///
/// Six neighbors, each receiving `floor(error / 8)`. Two eighths of the error
/// are discarded.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),  // right
        (2, 0, 1),  // two right
        (-1, 1, 1), // bottom-left
        (0, 1, 1),  // bottom
        (1, 1, 1),  // bottom-right
        (0, 2, 1),  // two below
    ],
    divisor: 8,
    split: ErrorSplit::FloorDivided,
};

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
    split: ErrorSplit::Fractional,
};
