pub mod capture;
pub mod controls;
pub mod output;
pub mod session;

pub use capture::{load_frame, CaptureSource, PngSequenceSource, TestPatternSource};
pub use controls::{Command, KeyBinding, KeyScript};
pub use output::{encode_frame, screenshot_file_name, FrameWriter, ScreenshotWriter};
pub use session::{Session, SessionReport};
