pub mod config;
pub mod frame_spec;

pub use config::{AppConfig, AsciiConfig, ScreenshotConfig};
pub use frame_spec::FrameSpec;
