//! Watermark error types.
//!
//! Every fallible operation in the crate returns [`WatermarkError`]. None of
//! these are retried: a bad font, a degenerate spacing or a failed buffer
//! reservation all mean no watermark can be produced.

use thiserror::Error;

/// Errors that can occur while building a watermark image.
#[derive(Error, Debug)]
pub enum WatermarkError {
    /// Invalid configuration (degenerate spacing, bad color, bad dimensions)
    #[error("Watermark configuration error: {0}")]
    Config(String),

    /// Glyph resource could not be loaded or parsed
    #[error("Failed to load font: {0}")]
    Font(String),

    /// Pixel buffer for a raster could not be reserved
    #[error("Failed to allocate {width}x{height} raster")]
    Allocation { width: u32, height: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

impl WatermarkError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn font(message: impl Into<String>) -> Self {
        Self::Font(message.into())
    }

    /// True for errors caused by the configuration rather than the environment.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Yaml(_) | Self::Font(_))
    }
}

pub type Result<T> = std::result::Result<T, WatermarkError>;
