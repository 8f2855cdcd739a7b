//! Retrocam - retro webcam filters
//!
//! Headless driver around the `retro-filter` pixel pipeline: frame capture
//! from PNG sequences or test patterns, SVG glyph rendering for the ASCII
//! mode, and PNG display/screenshot output.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
