//! Shared helpers for the integration tests.

use image::Rgba;
use screenmark::{GlyphPainter, RasterImage, TileAnchor};
use std::cell::RefCell;

/// Deterministic stand-in for a font: draws a solid block just above the
/// baseline, four pixels wide per character and eight pixels tall.
#[derive(Debug, Default)]
pub struct BlockPainter;

pub const BLOCK_HEIGHT: i64 = 8;
pub const BLOCK_ADVANCE: i64 = 4;

impl GlyphPainter for BlockPainter {
    fn draw_text(&self, canvas: &mut RasterImage, text: &str, anchor: TileAnchor, fill: Rgba<u8>) {
        let width = text.chars().count() as i64 * BLOCK_ADVANCE;
        for y in anchor.y - BLOCK_HEIGHT..anchor.y {
            for x in anchor.x..anchor.x + width {
                canvas.set_signed(x, y, fill);
            }
        }
    }
}

/// Records every anchor it is asked to draw at, drawing nothing.
#[derive(Debug, Default)]
pub struct RecordingPainter {
    pub calls: RefCell<Vec<(TileAnchor, String)>>,
}

impl GlyphPainter for RecordingPainter {
    fn draw_text(&self, _canvas: &mut RasterImage, text: &str, anchor: TileAnchor, _fill: Rgba<u8>) {
        self.calls.borrow_mut().push((anchor, text.to_string()));
    }
}

/// Opacity lookup returning `false` outside the image.
pub fn opaque_at(image: &RasterImage, x: i64, y: i64) -> bool {
    match (u32::try_from(x), u32::try_from(y)) {
        (Ok(x), Ok(y)) => image.get(x, y).map_or(false, |p| p[3] > 0),
        _ => false,
    }
}

/// True when any pixel in the 3x3 neighbourhood of `(x, y)` is opaque.
pub fn opaque_near(image: &RasterImage, x: i64, y: i64) -> bool {
    (-1..=1).any(|dy| (-1..=1).any(|dx| opaque_at(image, x + dx, y + dy)))
}
