//! End-to-end watermark generation.
//!
//! Synthesize the oversized canvas, resample it to the target, then release
//! the canvas before returning so peak memory is held for as short a time as
//! possible.

use crate::config::WatermarkConfig;
use crate::error::Result;
use crate::glyph::{AbGlyphPainter, GlyphPainter};
use crate::identity::TextToken;
use crate::raster::RasterImage;
use crate::resampler::{resample, resample_parallel};
use crate::synthesizer::synthesize;
use std::time::Instant;

/// How the resampling loop is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    #[default]
    Serial,
    /// Row-sharded across the rayon thread pool.
    Parallel,
}

/// Target output size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Produce the final watermark raster with the supplied glyph painter.
pub fn render_watermark<P>(
    config: &WatermarkConfig,
    token: &TextToken,
    target: TargetSize,
    painter: &P,
    execution: Execution,
) -> Result<RasterImage>
where
    P: GlyphPainter + ?Sized,
{
    let started = Instant::now();
    let _span = tracing::info_span!(
        "render_watermark",
        width = target.width,
        height = target.height
    )
    .entered();

    let canvas = synthesize(config, token, target.width, target.height, painter)?;
    let synthesized_ms = started.elapsed().as_millis();

    let output = match execution {
        Execution::Serial => resample(&canvas, config.rotation, target.width, target.height),
        Execution::Parallel => {
            resample_parallel(&canvas, config.rotation, target.width, target.height)
        }
    };
    let canvas_side = canvas.width();
    drop(canvas);
    let output = output?;

    tracing::info!(
        width = output.width(),
        height = output.height(),
        canvas_side,
        rotation = config.rotation,
        visible_pixels = output.visible_pixel_count(),
        synthesize_ms = synthesized_ms as u64,
        total_ms = started.elapsed().as_millis() as u64,
        "watermark image generated"
    );

    Ok(output)
}

/// Load the configured (or built-in) font and produce the final watermark raster.
pub fn render_with_font(
    config: &WatermarkConfig,
    token: &TextToken,
    target: TargetSize,
    execution: Execution,
) -> Result<RasterImage> {
    config.validate()?;
    let painter = AbGlyphPainter::from_config(config)?;
    tracing::debug!(?painter, "font loaded");
    render_watermark(config, token, target, &painter, execution)
}
