//! Owned RGBA raster used for both the oversized canvas and the final image.
//!
//! Wraps an [`image::RgbaImage`] so that every raster starts fully
//! transparent, allocation failure is reported instead of aborting, and pixel
//! access goes through bounds-checked accessors.

use crate::error::{Result, WatermarkError};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Fully transparent pixel.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Number of bytes per pixel.
pub const CHANNELS: usize = 4;

/// A fixed-size RGBA pixel grid in row-major order.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    pixels: RgbaImage,
}

impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl RasterImage {
    /// Allocate a raster with every pixel set to alpha 0.
    ///
    /// The buffer is reserved with `try_reserve_exact`, so an oversized
    /// request surfaces as [`WatermarkError::Allocation`].
    pub fn new_transparent(width: u32, height: u32) -> Result<Self> {
        let allocation = WatermarkError::Allocation { width, height };
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS));
        let Some(len) = len else {
            return Err(allocation);
        };

        let mut buf = Vec::new();
        if buf.try_reserve_exact(len).is_err() {
            return Err(allocation);
        }
        buf.resize(len, 0);

        let pixels = RgbaImage::from_raw(width, height, buf).ok_or(allocation)?;
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Read a pixel, or `None` when `(x, y)` lies outside the raster.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        if x < self.width() && y < self.height() {
            Some(*self.pixels.get_pixel(x, y))
        } else {
            None
        }
    }

    /// Write a pixel. Returns `false` (and writes nothing) when out of bounds.
    pub fn set(&mut self, x: u32, y: u32, pixel: Rgba<u8>) -> bool {
        if x < self.width() && y < self.height() {
            self.pixels.put_pixel(x, y, pixel);
            true
        } else {
            false
        }
    }

    /// Signed-coordinate variant of [`RasterImage::set`] used by clipped drawing.
    pub fn set_signed(&mut self, x: i64, y: i64, pixel: Rgba<u8>) -> bool {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) => self.set(x, y, pixel),
            _ => false,
        }
    }

    /// Number of pixels with nonzero alpha.
    pub fn visible_pixel_count(&self) -> usize {
        self.pixels.pixels().filter(|p| p[3] > 0).count()
    }

    /// True when no pixel has been painted.
    pub fn is_fully_transparent(&self) -> bool {
        self.pixels.pixels().all(|p| p[3] == 0)
    }

    /// Row-major raw bytes, `width * 4` bytes per row.
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn as_rgba_image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Encode the raster as PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.pixels
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(WatermarkError::from)
    }
}
