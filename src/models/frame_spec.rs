use crate::error::RenderError;

/// Frame dimensions for a capture session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSpec {
    pub width: u32,
    pub height: u32,
}

impl FrameSpec {
    /// Reference webcam resolution: 640x480
    pub const REFERENCE: Self = Self {
        width: 640,
        height: 480,
    };

    /// Largest edge accepted for a frame
    pub const MAX_EDGE: u32 = 8192;

    /// Validate dimensions
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 || width > Self::MAX_EDGE || height > Self::MAX_EDGE {
            return Err(RenderError::UnsupportedDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Byte length of one RGBA8 frame
    pub fn buffer_len(&self) -> usize {
        self.width as usize * self.height as usize * retro_filter::CHANNELS
    }

    /// Number of full 8x8 blocks across and down
    pub fn block_grid(&self) -> (usize, usize) {
        retro_filter::block_grid(self.width as usize, self.height as usize)
    }
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self::REFERENCE
    }
}
