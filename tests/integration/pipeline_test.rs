//! End-to-end tests: synthesize a tiled canvas, resample it, inspect the result.

use super::test_harness::{opaque_at, opaque_near, BlockPainter, RecordingPainter};
use screenmark::{
    canvas_side, render_watermark, render_with_font, resample, synthesize, Execution,
    TargetSize, TextToken, WatermarkConfig, WatermarkError,
};

fn scenario_config(rotation: f64) -> WatermarkConfig {
    WatermarkConfig {
        skew_angle: 0.0,
        rotation,
        spacing_x: 100,
        spacing_y: 100,
        ..WatermarkConfig::default()
    }
}

fn token() -> TextToken {
    TextToken::compose("CompanyName", "CORP\\tester", 2)
}

#[test]
fn test_quarter_turn_rotates_opaque_set() {
    let target = TargetSize::new(200, 200);
    let baseline = render_watermark(
        &scenario_config(0.0),
        &token(),
        target,
        &BlockPainter,
        Execution::Serial,
    )
    .unwrap();
    let rotated = render_watermark(
        &scenario_config(90.0),
        &token(),
        target,
        &BlockPainter,
        Execution::Serial,
    )
    .unwrap();

    assert_eq!((rotated.width(), rotated.height()), (200, 200));
    assert!(baseline.visible_pixel_count() > 0);
    assert!(rotated.visible_pixel_count() > 0);

    // A quarter turn sends baseline (x', y') to rotated (200 - y', x')
    for y in 0..200i64 {
        for x in 1..200i64 {
            let (bx, by) = (y, 200 - x);
            if opaque_at(&rotated, x, y) {
                assert!(
                    opaque_near(&baseline, bx, by),
                    "rotated ({}, {}) has no baseline match near ({}, {})",
                    x,
                    y,
                    bx,
                    by
                );
            }
            if opaque_at(&baseline, bx, by) {
                assert!(
                    opaque_near(&rotated, x, y),
                    "baseline ({}, {}) has no rotated match near ({}, {})",
                    bx,
                    by,
                    x,
                    y
                );
            }
        }
    }
}

#[test]
fn test_identity_rotation_is_crop_of_canvas() {
    let config = scenario_config(0.0);
    let canvas = synthesize(&config, &token(), 200, 120, &BlockPainter).unwrap();
    let output = resample(&canvas, 0.0, 200, 120).unwrap();

    let ox = canvas.width() / 2 - 100;
    let oy = canvas.height() / 2 - 60;
    for y in 0..120 {
        for x in 0..200 {
            assert_eq!(output.get(x, y), canvas.get(x + ox, y + oy));
        }
    }
}

#[test]
fn test_full_turn_equals_no_turn() {
    let target = TargetSize::new(240, 160);
    let zero = render_watermark(
        &scenario_config(0.0),
        &token(),
        target,
        &BlockPainter,
        Execution::Serial,
    )
    .unwrap();
    let full = render_watermark(
        &scenario_config(360.0),
        &token(),
        target,
        &BlockPainter,
        Execution::Parallel,
    )
    .unwrap();
    assert_eq!(zero, full);
}

#[test]
fn test_full_hd_anchors_stay_on_canvas() {
    let painter = RecordingPainter::default();
    let config = WatermarkConfig {
        skew_angle: -25.0,
        ..WatermarkConfig::default()
    };

    let canvas = synthesize(&config, &token(), 1920, 1080, &painter).unwrap();
    assert_eq!(canvas.width(), 2754);
    assert_eq!(canvas_side(1920, 1080).unwrap(), 2754);
    assert!(canvas.is_fully_transparent());

    let calls = painter.calls.borrow();
    assert!(!calls.is_empty());
    for (anchor, text) in calls.iter() {
        assert!((0..2754).contains(&anchor.x), "{:?}", anchor);
        assert!((0..2754).contains(&anchor.y), "{:?}", anchor);
        assert_eq!(text, "CompanyName tester  ");
    }
}

#[test]
fn test_zero_spacing_never_draws() {
    let painter = RecordingPainter::default();
    for (sx, sy) in [(0, 100), (100, 0), (0, 0)] {
        let config = WatermarkConfig {
            spacing_x: sx,
            spacing_y: sy,
            ..WatermarkConfig::default()
        };
        let err = render_watermark(
            &config,
            &token(),
            TargetSize::new(200, 200),
            &painter,
            Execution::Serial,
        )
        .unwrap_err();
        assert!(matches!(err, WatermarkError::Config(_)));
    }
    assert!(painter.calls.borrow().is_empty());
}

#[test]
fn test_skewed_tiles_reach_every_output_region() {
    let config = WatermarkConfig {
        skew_angle: -30.0,
        rotation: 320.0,
        spacing_x: 60,
        spacing_y: 30,
        ..WatermarkConfig::default()
    };
    let out = render_watermark(
        &config,
        &token(),
        TargetSize::new(400, 300),
        &BlockPainter,
        Execution::Parallel,
    )
    .unwrap();

    // Every 100x100 quadrant block contains watermark pixels
    for by in 0..3u32 {
        for bx in 0..4u32 {
            let any = (by * 100..by * 100 + 100)
                .any(|y| (bx * 100..bx * 100 + 100).any(|x| out.get(x, y).unwrap()[3] > 0));
            assert!(any, "block ({}, {}) is empty", bx, by);
        }
    }
}

#[test]
fn test_builtin_font_end_to_end() {
    let config = WatermarkConfig::default();
    assert!(config.font_path.is_none());

    let out = render_with_font(
        &config,
        &token(),
        TargetSize::new(640, 360),
        Execution::Serial,
    )
    .unwrap();
    assert_eq!((out.width(), out.height()), (640, 360));
    assert!(out.visible_pixel_count() > 0);
}
