//! Error type for the retro-filter public API.

use thiserror::Error;

/// Errors returned by the filter pipeline.
///
/// The pixel algorithms themselves are total over well-shaped input, so the
/// only failures are rejected inputs: a buffer whose length does not match
/// its dimensions, or a mode name that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Buffer length is not `width * height * 4`.
    #[error("invalid buffer size: expected {expected} bytes, got {actual}")]
    InvalidBufferSize { expected: usize, actual: usize },

    /// Mode name did not match any [`FilterMode`](crate::FilterMode).
    #[error("unknown filter mode: {0}")]
    UnknownMode(String),

    /// Channel arithmetic name did not match any
    /// [`ChannelArithmetic`](crate::ChannelArithmetic).
    #[error("unknown channel arithmetic: {0}")]
    UnknownArithmetic(String),
}
