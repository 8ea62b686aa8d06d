//! Watermark configuration.
//!
//! Configuration is loaded once from YAML and then passed by reference into
//! the synthesizer and resampler; nothing mutates it afterwards.
//!
//! # Configuration Example
//!
//! ```yaml
//! label: "CompanyName"
//! skew_angle: -15.0
//! rotation: 320.0
//! font_size: 20.0
//! space_count: 5
//! spacing_x: 250
//! spacing_y: 125
//! color: "#ffffff"
//! alpha: 7
//! font_path: ${WATERMARK_FONT}
//! ```
//!
//! `${VAR}` references are replaced with environment variable values before
//! the document is parsed.

use crate::error::{Result, WatermarkError};
use image::Rgba;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_label() -> String {
    "CompanyName".to_string()
}

fn default_rotation() -> f64 {
    320.0
}

fn default_font_size() -> f32 {
    20.0
}

fn default_space_count() -> usize {
    5
}

fn default_spacing_x() -> i64 {
    250
}

fn default_spacing_y() -> i64 {
    125
}

fn default_color() -> String {
    "#ffffff".to_string()
}

fn default_alpha() -> u8 {
    7
}

/// RGB color parsed from a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn with_alpha(self, alpha: u8) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, alpha])
    }

    /// Pack as a Windows `COLORREF` (`0x00BBGGRR`).
    pub fn to_colorref(self) -> u32 {
        u32::from(self.r) | (u32::from(self.g) << 8) | (u32::from(self.b) << 16)
    }
}

/// Parse `#RGB`, `#RRGGBB` or bare `RRGGBB` into a [`Color`].
pub fn parse_hex_color(hex: &str) -> Result<Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(WatermarkError::config(format!(
            "color '{}' contains non-hex characters",
            hex
        )));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| WatermarkError::config(format!("invalid hex digit in color '{}'", hex)))
    };

    match digits.len() {
        // Each digit doubled: 0xA -> 0xAA
        3 => Ok(Color::new(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        6 => Ok(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        len => Err(WatermarkError::config(format!(
            "color must be #RGB or #RRGGBB format, got {} digits",
            len
        ))),
    }
}

/// Rendering parameters for one watermark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatermarkConfig {
    /// Fixed text placed before the user identifier (default: "CompanyName")
    #[serde(default = "default_label")]
    pub label: String,

    /// Per-tile skew in degrees, negative leans right (default: 0)
    #[serde(default)]
    pub skew_angle: f64,

    /// Whole-image rotation in degrees, 0 to 360 (default: 320)
    #[serde(default = "default_rotation")]
    pub rotation: f64,

    /// Font size in points at 72 DPI (default: 20)
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Trailing spaces appended to each token (default: 5)
    #[serde(default = "default_space_count")]
    pub space_count: usize,

    /// Horizontal tile pitch in pixels before magnification (default: 250)
    #[serde(default = "default_spacing_x")]
    pub spacing_x: i64,

    /// Vertical tile pitch in pixels before magnification (default: 125)
    #[serde(default = "default_spacing_y")]
    pub spacing_y: i64,

    /// Output color as hex string (default: "#ffffff")
    #[serde(default = "default_color")]
    pub color: String,

    /// Output alpha, 0 is fully transparent (default: 7)
    #[serde(default = "default_alpha")]
    pub alpha: u8,

    /// TrueType/OpenType font file. The embedded font is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            label: default_label(),
            skew_angle: 0.0,
            rotation: default_rotation(),
            font_size: default_font_size(),
            space_count: default_space_count(),
            spacing_x: default_spacing_x(),
            spacing_y: default_spacing_y(),
            color: default_color(),
            alpha: default_alpha(),
            font_path: None,
        }
    }
}

impl WatermarkConfig {
    /// Parse YAML after substituting `${VAR}` environment references.
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self> {
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| WatermarkError::config(e.to_string()))?;

        for caps in re.captures_iter(yaml) {
            let var_name = &caps[1];
            std::env::var(var_name).map_err(|_| {
                WatermarkError::config(format!(
                    "Environment variable '{}' is referenced but not set",
                    var_name
                ))
            })?;
        }

        let substituted = re.replace_all(yaml, |caps: &regex::Captures<'_>| {
            std::env::var(&caps[1]).unwrap_or_default()
        });

        let config: Self = serde_yaml::from_str(&substituted)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_with_env(&yaml)
    }

    /// Reject values that would stall the tiling loop or cannot be drawn.
    pub fn validate(&self) -> Result<()> {
        if self.spacing_x <= 0 || self.spacing_y <= 0 {
            return Err(WatermarkError::config(format!(
                "spacing must be positive, got spacing_x={} spacing_y={}",
                self.spacing_x, self.spacing_y
            )));
        }

        if u32::try_from(self.spacing_x).is_err() || u32::try_from(self.spacing_y).is_err() {
            return Err(WatermarkError::config(format!(
                "spacing too large: spacing_x={} spacing_y={}",
                self.spacing_x, self.spacing_y
            )));
        }

        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(WatermarkError::config(format!(
                "font_size must be a positive finite value, got {}",
                self.font_size
            )));
        }

        if !self.skew_angle.is_finite() || !self.rotation.is_finite() {
            return Err(WatermarkError::config(format!(
                "angles must be finite, got skew_angle={} rotation={}",
                self.skew_angle, self.rotation
            )));
        }

        if !(0.0..=360.0).contains(&self.rotation) {
            tracing::warn!(
                rotation = self.rotation,
                "rotation outside 0-360 degrees, folding into range"
            );
        }

        parse_hex_color(&self.color)?;
        Ok(())
    }

    /// Parsed output color.
    pub fn output_color(&self) -> Result<Color> {
        parse_hex_color(&self.color)
    }
}
