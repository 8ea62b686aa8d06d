//! Screenmark: renders a tiled, rotated text watermark into a full-screen
//! RGBA raster for display as a transparent overlay.
//!
//! The pipeline has two stages:
//!
//! 1. [`synthesizer::synthesize`] tiles the text token across an oversized
//!    square canvas at the configured skew and spacing.
//! 2. [`resampler::resample`] rotates the canvas about its centre and crops it
//!    to the target size by inverse mapping.
//!
//! [`pipeline::render_watermark`] runs both and frees the canvas in between.
//!
//! ```ignore
//! use screenmark::{render_with_font, Execution, TargetSize, TextToken, WatermarkConfig};
//!
//! let config = WatermarkConfig::from_file("watermark.yaml")?;
//! let token = TextToken::compose(&config.label, "CORP\\alice", config.space_count);
//! let image = render_with_font(&config, &token, TargetSize::new(1920, 1080), Execution::Serial)?;
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod glyph;
pub mod identity;
pub mod logging;
pub mod overlay;
pub mod pipeline;
pub mod raster;
pub mod resampler;
pub mod synthesizer;

pub use config::{parse_hex_color, Color, WatermarkConfig};
pub use error::{Result, WatermarkError};
pub use glyph::{AbGlyphPainter, GlyphPainter, TileAnchor};
pub use identity::{current_username, extract_username, TextToken};
pub use overlay::{binarize, OverlayStyle};
pub use pipeline::{render_watermark, render_with_font, Execution, TargetSize};
pub use raster::RasterImage;
pub use resampler::{resample, resample_parallel};
pub use synthesizer::{canvas_side, synthesize, tile_anchors, tile_pitch};
