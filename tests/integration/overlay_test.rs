//! The display painter's view of a rendered watermark.

use super::test_harness::BlockPainter;
use image::Rgba;
use screenmark::overlay::present_points;
use screenmark::{
    binarize, render_watermark, Execution, OverlayStyle, RasterImage, TargetSize, TextToken,
    WatermarkConfig,
};

fn rendered() -> (WatermarkConfig, RasterImage) {
    let config = WatermarkConfig {
        spacing_x: 50,
        spacing_y: 40,
        rotation: 30.0,
        color: "#ff8800".to_string(),
        alpha: 90,
        ..WatermarkConfig::default()
    };
    let out = render_watermark(
        &config,
        &TextToken::from("wm"),
        TargetSize::new(160, 120),
        &BlockPainter,
        Execution::Serial,
    )
    .unwrap();
    (config, out)
}

#[test]
fn test_binarized_overlay_uses_single_color_and_alpha() {
    let (config, out) = rendered();
    let style = OverlayStyle::from_config(&config).unwrap();
    let overlay = binarize(&out, style).unwrap();

    let painted = Rgba([0xff, 0x88, 0x00, 90]);
    for y in 0..out.height() {
        for x in 0..out.width() {
            let src = out.get(x, y).unwrap();
            let dst = overlay.get(x, y).unwrap();
            if src[3] > 0 {
                assert_eq!(dst, painted);
            } else {
                assert_eq!(dst[3], 0);
            }
        }
    }
}

#[test]
fn test_present_points_match_visible_pixels() {
    let (_, out) = rendered();
    let points = present_points(&out);
    assert!(!points.is_empty());
    assert_eq!(points.len(), out.visible_pixel_count());
}

#[test]
fn test_overlay_png_written() {
    let (config, out) = rendered();
    let overlay = binarize(&out, OverlayStyle::from_config(&config).unwrap()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overlay.png");
    overlay.save_png(&path).unwrap();

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (160, 120));
    assert_eq!(&decoded, overlay.as_rgba_image());
}
