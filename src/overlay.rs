//! What the display painter makes of the final raster.
//!
//! The painter does not alpha-blend: any pixel with nonzero alpha is painted
//! with the single configured color at the single configured alpha, and every
//! other pixel is left untouched. Anti-aliased glyph edges therefore collapse
//! to full presence.

use crate::config::{Color, WatermarkConfig};
use crate::error::Result;
use crate::raster::{RasterImage, CHANNELS};
use image::Rgba;

/// Output color and alpha applied to every present pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStyle {
    pub color: Color,
    pub alpha: u8,
}

impl OverlayStyle {
    pub fn new(color: Color, alpha: u8) -> Self {
        Self { color, alpha }
    }

    pub fn from_config(config: &WatermarkConfig) -> Result<Self> {
        Ok(Self::new(config.output_color()?, config.alpha))
    }

    /// Pixel value written for every present pixel.
    pub fn pixel(&self) -> Rgba<u8> {
        self.color.with_alpha(self.alpha)
    }

    /// Color packed as a Windows `COLORREF`, for GDI consumers.
    pub fn colorref(&self) -> u32 {
        self.color.to_colorref()
    }
}

/// True when the painter treats this pixel as watermark.
pub fn is_present(pixel: Rgba<u8>) -> bool {
    pixel[3] > 0
}

/// Coordinates the painter would set, in row-major order.
pub fn present_points(image: &RasterImage) -> Vec<(u32, u32)> {
    image
        .as_rgba_image()
        .enumerate_pixels()
        .filter(|(_, _, p)| is_present(**p))
        .map(|(x, y, _)| (x, y))
        .collect()
}

/// Apply the painter's all-or-nothing rule, producing the visible overlay.
pub fn binarize(image: &RasterImage, style: OverlayStyle) -> Result<RasterImage> {
    let mut overlay = RasterImage::new_transparent(image.width(), image.height())?;
    let paint = style.pixel().0;

    for (src, dst) in image
        .as_raw()
        .chunks_exact(CHANNELS)
        .zip(overlay.as_raw_mut().chunks_exact_mut(CHANNELS))
    {
        if src[3] > 0 {
            dst.copy_from_slice(&paint);
        }
    }

    Ok(overlay)
}
