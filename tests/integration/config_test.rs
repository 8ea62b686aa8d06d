//! Configuration loading from disk through to rendering.

use super::test_harness::BlockPainter;
use screenmark::{render_watermark, Execution, TargetSize, TextToken, WatermarkConfig};
use std::fs;

#[test]
fn test_yaml_file_drives_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watermark.yaml");
    fs::write(
        &path,
        r##"
label: "Initech"
skew_angle: -10
rotation: 45
spacing_x: 90
spacing_y: 45
color: "#3366ff"
alpha: 32
"##,
    )
    .unwrap();

    let config = WatermarkConfig::from_file(&path).unwrap();
    assert_eq!(config.label, "Initech");
    assert_eq!(config.skew_angle, -10.0);
    assert_eq!(config.font_size, 20.0);

    let token = TextToken::compose(&config.label, "peter@initech.example", config.space_count);
    assert_eq!(token.as_str(), "Initech peter     ");

    let out = render_watermark(
        &config,
        &token,
        TargetSize::new(300, 200),
        &BlockPainter,
        Execution::Serial,
    )
    .unwrap();
    assert_eq!((out.width(), out.height()), (300, 200));
    assert!(out.visible_pixel_count() > 0);
}

#[test]
fn test_degenerate_spacing_file_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "spacing_x: 0\n").unwrap();

    let err = WatermarkConfig::from_file(&path).unwrap_err();
    assert!(err.is_config_error());
    assert!(err.to_string().contains("spacing"));
}

#[test]
fn test_env_font_path_substitution() {
    std::env::set_var("SCREENMARK_IT_FONT", "/opt/fonts/Mark.ttf");
    let config = WatermarkConfig::from_yaml_with_env("font_path: ${SCREENMARK_IT_FONT}\n").unwrap();
    assert_eq!(
        config.font_path,
        Some(std::path::PathBuf::from("/opt/fonts/Mark.ttf"))
    );
}
