//! Canvas synthesis: tiles the text token across an oversized square canvas.
//!
//! The canvas side is the target diagonal plus a quarter, so any whole-image
//! rotation applied later still covers the target rectangle. Tile anchors run
//! over a padded grid (half a canvas before the origin to one and a half
//! after), are skewed about the origin, re-centred, and drawn only when the
//! result lands inside the canvas.

use crate::config::WatermarkConfig;
use crate::error::{Result, WatermarkError};
use crate::geometry::{degrees_to_radians, Point2D};
use crate::glyph::{GlyphPainter, TileAnchor};
use crate::identity::TextToken;
use crate::raster::RasterImage;
use image::Rgba;

/// Fill used for glyph draws. Only coverage matters downstream.
pub const GLYPH_FILL: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Side length of the square working canvas: `ceil(sqrt(w² + h²) * 5 / 4)`.
pub fn canvas_side(target_width: u32, target_height: u32) -> Result<u32> {
    if target_width == 0 || target_height == 0 {
        return Err(WatermarkError::config(format!(
            "target dimensions must be nonzero, got {}x{}",
            target_width, target_height
        )));
    }

    let w = u64::from(target_width);
    let h = u64::from(target_height);
    let diagonal = ((w * w + h * h) as f64).sqrt();
    let side = (diagonal * 5.0 / 4.0).ceil();

    if side > f64::from(u32::MAX) {
        return Err(WatermarkError::Allocation {
            width: target_width,
            height: target_height,
        });
    }
    Ok(side as u32)
}

/// Magnified tile pitch `(spacing_x * 4 / 3, spacing_y * 4 / 3)` in integer pixels.
///
/// Zero or negative spacing would never advance the tiling loop, so it is
/// rejected here before any canvas is allocated.
pub fn tile_pitch(config: &WatermarkConfig) -> Result<(u32, u32)> {
    let magnify = |spacing: i64, axis: &str| -> Result<u32> {
        if spacing <= 0 {
            return Err(WatermarkError::config(format!(
                "spacing_{} must be positive, got {}",
                axis, spacing
            )));
        }
        u32::try_from(spacing.saturating_mul(4) / 3).map_err(|_| {
            WatermarkError::config(format!("spacing_{} too large: {}", axis, spacing))
        })
    };

    Ok((
        magnify(config.spacing_x, "x")?,
        magnify(config.spacing_y, "y")?,
    ))
}

/// All anchors that land inside a `side x side` canvas, in row-major grid order.
pub fn tile_anchors(side: u32, pitch: (u32, u32), skew_degrees: f64) -> Vec<TileAnchor> {
    let (pitch_x, pitch_y) = pitch;
    if side == 0 || pitch_x == 0 || pitch_y == 0 {
        return Vec::new();
    }

    let side_i = i64::from(side);
    let start = -side_i / 2;
    let end = side_i * 3 / 2;
    let half = f64::from(side) / 2.0;
    let extent = f64::from(side);
    let (sin, cos) = degrees_to_radians(skew_degrees).sin_cos();

    let mut anchors = Vec::new();
    for y in (start..end).step_by(pitch_y as usize) {
        for x in (start..end).step_by(pitch_x as usize) {
            let p = Point2D::new(x as f64, y as f64)
                .rotate_by(sin, cos)
                .translate(half, half);
            if p.within(extent, extent) {
                let (ax, ay) = p.truncate();
                anchors.push(TileAnchor::new(ax, ay));
            }
        }
    }
    anchors
}

/// Build the oversized canvas with the token drawn at every in-bounds anchor.
pub fn synthesize<P>(
    config: &WatermarkConfig,
    token: &TextToken,
    target_width: u32,
    target_height: u32,
    painter: &P,
) -> Result<RasterImage>
where
    P: GlyphPainter + ?Sized,
{
    let pitch = tile_pitch(config)?;
    let side = canvas_side(target_width, target_height)?;
    let mut canvas = RasterImage::new_transparent(side, side)?;

    let anchors = tile_anchors(side, pitch, config.skew_angle);
    tracing::debug!(
        canvas_side = side,
        pitch_x = pitch.0,
        pitch_y = pitch.1,
        skew_angle = config.skew_angle,
        tiles = anchors.len(),
        "synthesizing watermark canvas"
    );

    for anchor in anchors {
        painter.draw_text(&mut canvas, token.as_str(), anchor, GLYPH_FILL);
    }

    Ok(canvas)
}
