//! Glyph rendering capability.
//!
//! The synthesizer only knows the [`GlyphPainter`] trait: "draw this string
//! with its baseline origin at this point, clipped to the canvas".
//! [`AbGlyphPainter`] is the production implementation on top of `ab_glyph`.

use crate::config::WatermarkConfig;
use crate::error::{Result, WatermarkError};
use crate::raster::RasterImage;
use ab_glyph::{point, Font, FontArc, FontRef, GlyphId, InvalidFont, PxScale, ScaleFont};
use image::Rgba;
use std::path::Path;
use std::sync::OnceLock;

/// Built-in font (DejaVu Sans), used when no `font_path` is configured.
const EMBEDDED_FONT_DATA: &[u8] = include_bytes!("fonts/DejaVuSans.ttf");

static EMBEDDED_FONT: OnceLock<std::result::Result<FontRef<'static>, InvalidFont>> =
    OnceLock::new();

/// Parse the built-in font on first use.
fn embedded_font() -> Result<FontRef<'static>> {
    EMBEDDED_FONT
        .get_or_init(|| FontRef::try_from_slice(EMBEDDED_FONT_DATA))
        .clone()
        .map_err(|e| WatermarkError::font(format!("embedded font: {}", e)))
}

/// Integer baseline origin of one tile, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileAnchor {
    pub x: i64,
    pub y: i64,
}

impl TileAnchor {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Draws text into a raster. Pixels outside the raster must be skipped.
#[cfg_attr(test, mockall::automock)]
pub trait GlyphPainter {
    fn draw_text(&self, canvas: &mut RasterImage, text: &str, anchor: TileAnchor, fill: Rgba<u8>);
}

/// `ab_glyph` backed painter holding a parsed font at a fixed size.
pub struct AbGlyphPainter {
    font: FontArc,
    scale: PxScale,
}

impl std::fmt::Debug for AbGlyphPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbGlyphPainter")
            .field("glyph_count", &self.font.glyph_count())
            .field("scale", &self.scale)
            .finish()
    }
}

impl AbGlyphPainter {
    /// Parse a TrueType/OpenType blob. Malformed data is a fatal font error.
    pub fn from_bytes(data: Vec<u8>, point_size: f32) -> Result<Self> {
        let font = FontArc::try_from_vec(data).map_err(|e| WatermarkError::font(e.to_string()))?;
        Ok(Self::with_font(font, point_size))
    }

    pub fn from_file<P: AsRef<Path>>(path: P, point_size: f32) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| WatermarkError::font(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(data, point_size)
    }

    /// Painter over the built-in font.
    pub fn embedded(point_size: f32) -> Result<Self> {
        Ok(Self::with_font(FontArc::new(embedded_font()?), point_size))
    }

    /// The configured `font_path`, else the built-in font.
    pub fn from_config(config: &WatermarkConfig) -> Result<Self> {
        match &config.font_path {
            Some(path) => {
                tracing::debug!(font_path = %path.display(), "loading font file");
                Self::from_file(path, config.font_size)
            }
            None => Self::embedded(config.font_size),
        }
    }

    fn with_font(font: FontArc, point_size: f32) -> Self {
        let scale = point_size_to_scale(&font, point_size);
        Self { font, scale }
    }

    pub fn scale(&self) -> PxScale {
        self.scale
    }
}

/// Pixel scale for a point size at 72 DPI, where one point is one pixel per em.
fn point_size_to_scale(font: &FontArc, point_size: f32) -> PxScale {
    match font.units_per_em() {
        Some(units_per_em) if units_per_em > 0.0 => {
            PxScale::from(point_size * font.height_unscaled() / units_per_em)
        }
        _ => PxScale::from(point_size),
    }
}

impl GlyphPainter for AbGlyphPainter {
    fn draw_text(&self, canvas: &mut RasterImage, text: &str, anchor: TileAnchor, fill: Rgba<u8>) {
        let scaled = self.font.as_scaled(self.scale);
        let baseline = anchor.y as f32;
        let mut caret = anchor.x as f32;
        let mut prev: Option<GlyphId> = None;

        for c in text.chars() {
            let glyph_id = scaled.glyph_id(c);
            if let Some(prev) = prev {
                caret += scaled.kern(prev, glyph_id);
            }

            let glyph = glyph_id.with_scale_and_position(self.scale, point(caret, baseline));
            caret += scaled.h_advance(glyph_id);
            prev = Some(glyph_id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = bounds.min.x as i64 + i64::from(px);
                let y = bounds.min.y as i64 + i64::from(py);
                blend_coverage(canvas, x, y, fill, coverage);
            });
        }
    }
}

/// Composite `fill` scaled by `coverage` over the existing pixel ("over" operator).
fn blend_coverage(canvas: &mut RasterImage, x: i64, y: i64, fill: Rgba<u8>, coverage: f32) {
    let (Ok(ux), Ok(uy)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    let Some(bottom) = canvas.get(ux, uy) else {
        return;
    };

    let top_alpha = (f32::from(fill[3]) / 255.0) * coverage.clamp(0.0, 1.0);
    if top_alpha <= 0.0 {
        return;
    }
    let bottom_alpha = f32::from(bottom[3]) / 255.0;
    let out_alpha = top_alpha + bottom_alpha * (1.0 - top_alpha);

    let blend = |t: u8, b: u8| -> u8 {
        let t = f32::from(t) / 255.0;
        let b = f32::from(b) / 255.0;
        let result = (t * top_alpha + b * bottom_alpha * (1.0 - top_alpha)) / out_alpha;
        (result * 255.0).round().clamp(0.0, 255.0) as u8
    };

    canvas.set(
        ux,
        uy,
        Rgba([
            blend(fill[0], bottom[0]),
            blend(fill[1], bottom[1]),
            blend(fill[2], bottom[2]),
            (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
        ]),
    );
}
