use crate::error::ConfigError;
use crate::models::FrameSpec;
use retro_filter::{ChannelArithmetic, DiffusionOptions, FilterMode};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration loaded from retrocam.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Frame width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Frame height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Initial filter mode (atkinson, floyd-steinberg, ascii, bitmap)
    #[serde(default = "default_mode")]
    pub mode: String,

    /// How diffused error is stored in 8-bit channels (wrapping, saturating)
    #[serde(default = "default_arithmetic")]
    pub channel_arithmetic: String,

    /// ASCII glyph rendering
    #[serde(default)]
    pub ascii: AsciiConfig,

    /// Screenshot export
    #[serde(default)]
    pub screenshot: ScreenshotConfig,
}

fn default_width() -> u32 {
    FrameSpec::REFERENCE.width
}

fn default_height() -> u32 {
    FrameSpec::REFERENCE.height
}

fn default_mode() -> String {
    FilterMode::default().name().to_string()
}

fn default_arithmetic() -> String {
    ChannelArithmetic::default().name().to_string()
}

/// Font settings for the ASCII glyph rasterizer
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AsciiConfig {
    /// Font family passed to the SVG renderer
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font size in pixels
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Extra directory of .ttf/.otf files, loaded before system fonts
    #[serde(default)]
    pub fonts_dir: Option<PathBuf>,
}

fn default_font_family() -> String {
    "monospace".to_string()
}

fn default_font_size() -> f32 {
    8.0
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_size: default_font_size(),
            fonts_dir: None,
        }
    }
}

/// Where and how screenshots are written
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScreenshotConfig {
    /// Output directory
    #[serde(default = "default_screenshot_dir")]
    pub dir: PathBuf,

    /// Re-compress with oxipng
    #[serde(default = "default_optimize")]
    pub optimize: bool,
}

fn default_screenshot_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_optimize() -> bool {
    true
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            dir: default_screenshot_dir(),
            optimize: default_optimize(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load configuration, falling back to defaults when the file is missing
    /// or invalid
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    width = config.width,
                    height = config.height,
                    mode = %config.mode,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Check every field that can't be expressed in the YAML schema
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.frame_spec()?;
        self.filter_mode()?;
        self.diffusion_options()?;
        Ok(())
    }

    /// Frame dimensions for the session
    pub fn frame_spec(&self) -> Result<FrameSpec, ConfigError> {
        FrameSpec::new(self.width, self.height).map_err(|_| ConfigError::InvalidDimensions {
            width: self.width,
            height: self.height,
        })
    }

    /// Initial filter mode
    pub fn filter_mode(&self) -> Result<FilterMode, ConfigError> {
        Ok(self.mode.parse()?)
    }

    /// Diffusion options for the dithering modes
    pub fn diffusion_options(&self) -> Result<DiffusionOptions, ConfigError> {
        let arithmetic: ChannelArithmetic = self.channel_arithmetic.parse()?;
        Ok(DiffusionOptions::new().arithmetic(arithmetic))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            mode: default_mode(),
            channel_arithmetic: default_arithmetic(),
            ascii: AsciiConfig::default(),
            screenshot: ScreenshotConfig::default(),
        }
    }
}
