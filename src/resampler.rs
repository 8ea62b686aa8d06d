//! Rotate-and-crop resampling of the oversized canvas down to the target size.
//!
//! Iterates destination pixels and maps each back into canvas space with the
//! inverse rotation about both centres, so every destination pixel is written
//! at most once and none inside the source footprint is skipped. Sampling
//! truncates to integer source coordinates; there is no interpolation.

use crate::error::{Result, WatermarkError};
use crate::geometry::{degrees_to_radians, normalize_degrees, Point2D};
use crate::raster::{RasterImage, CHANNELS};
use rayon::prelude::*;

/// Inverse rotation from destination pixels to canvas coordinates.
#[derive(Debug, Clone, Copy)]
struct InverseMapping {
    sin: f64,
    cos: f64,
    src_center: (f64, f64),
    dst_center: (f64, f64),
    src_width: u32,
    src_height: u32,
}

impl InverseMapping {
    fn new(canvas: &RasterImage, rotation_degrees: f64, width: u32, height: u32) -> Self {
        let rad = degrees_to_radians(normalize_degrees(rotation_degrees));
        let (sin, cos) = (-rad).sin_cos();
        Self {
            sin,
            cos,
            src_center: (
                f64::from(canvas.width()) / 2.0,
                f64::from(canvas.height()) / 2.0,
            ),
            dst_center: (f64::from(width) / 2.0, f64::from(height) / 2.0),
            src_width: canvas.width(),
            src_height: canvas.height(),
        }
    }

    /// Canvas pixel sampled by destination `(x, y)`, if it lies on the canvas.
    fn source_of(&self, x: u32, y: u32) -> Option<(u32, u32)> {
        let p = Point2D::new(
            f64::from(x) - self.dst_center.0,
            f64::from(y) - self.dst_center.1,
        )
        .rotate_by(self.sin, self.cos)
        .translate(self.src_center.0, self.src_center.1);

        if p.within(f64::from(self.src_width), f64::from(self.src_height)) {
            Some((p.x as u32, p.y as u32))
        } else {
            None
        }
    }

    /// Fill one destination row. Unmapped pixels keep their transparent value.
    fn fill_row(&self, canvas: &[u8], y: u32, row: &mut [u8]) {
        let src_stride = self.src_width as usize * CHANNELS;
        for (x, dst) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let Some((sx, sy)) = self.source_of(x as u32, y) else {
                continue;
            };
            let offset = sy as usize * src_stride + sx as usize * CHANNELS;
            dst.copy_from_slice(&canvas[offset..offset + CHANNELS]);
        }
    }
}

fn allocate_target(width: u32, height: u32) -> Result<RasterImage> {
    if width == 0 || height == 0 {
        return Err(WatermarkError::config(format!(
            "target dimensions must be nonzero, got {}x{}",
            width, height
        )));
    }
    RasterImage::new_transparent(width, height)
}

/// Rotate `canvas` by `rotation_degrees` about its centre and crop to `width x height`.
pub fn resample(
    canvas: &RasterImage,
    rotation_degrees: f64,
    width: u32,
    height: u32,
) -> Result<RasterImage> {
    let mut target = allocate_target(width, height)?;
    let mapping = InverseMapping::new(canvas, rotation_degrees, width, height);
    let row_bytes = width as usize * CHANNELS;
    let source = canvas.as_raw();

    for (y, row) in target.as_raw_mut().chunks_exact_mut(row_bytes).enumerate() {
        mapping.fill_row(source, y as u32, row);
    }

    Ok(target)
}

/// Row-sharded variant of [`resample`]; produces identical output.
///
/// Each rayon task owns a disjoint destination row and only reads the canvas.
pub fn resample_parallel(
    canvas: &RasterImage,
    rotation_degrees: f64,
    width: u32,
    height: u32,
) -> Result<RasterImage> {
    let mut target = allocate_target(width, height)?;
    let mapping = InverseMapping::new(canvas, rotation_degrees, width, height);
    let row_bytes = width as usize * CHANNELS;
    let source = canvas.as_raw();

    target
        .as_raw_mut()
        .par_chunks_exact_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| mapping.fill_row(source, y as u32, row));

    Ok(target)
}
