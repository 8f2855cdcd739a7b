use retro_filter::FilterError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid frame size: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid filter setting: {0}")]
    Filter(#[from] FilterError),
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Failed to read frame {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PNG decode error in {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("Frame {path} is {actual_width}x{actual_height}, session expects {width}x{height}")]
    DimensionMismatch {
        path: PathBuf,
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("Frame buffer error: {0}")]
    Buffer(#[from] FilterError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Invalid key script entry '{0}'")]
    KeyScript(String),
}
