//! Test cases for figure output
//!
//! Tests cover:
//! - SVG structure: title, axis labels, shapes
//! - PNG output written through the staging file
//! - Output format selection by extension

use placement_viz::render::svg::{render_svg, TITLE};
use placement_viz::render::{
    encode_figure, render_to_file, save_figure, OutputFormat, RenderConfig,
};
use placement_viz::{build_scene, PlacementReader, RenderError};
use std::fs;
use std::path::Path;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn sample_scene(show_nets: bool) -> placement_viz::Scene {
    let placement = PlacementReader::new()
        .read("tests/data/sample_placement.json")
        .unwrap();
    build_scene(&placement, show_nets)
}

#[test]
fn test_svg_contains_figure_elements() {
    let svg = render_svg(&sample_scene(true));

    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains(TITLE));
    assert!(svg.contains(">X</text>"));
    assert!(svg.contains(">Y</text>"));
    // fixed cell 0 is red, net box is dashed blue
    assert!(svg.contains("fill=\"#ff0000\" fill-opacity=\"0.8\""));
    assert!(svg.contains("stroke-dasharray"));
    assert_eq!(svg.matches("<circle").count(), 4);
    assert!(svg.contains("font-weight=\"bold\""));
}

#[test]
fn test_svg_without_nets_has_no_markers() {
    let svg = render_svg(&sample_scene(false));

    assert_eq!(svg.matches("<circle").count(), 0);
    assert!(!svg.contains("stroke-dasharray"));
}

#[test]
fn test_svg_is_deterministic() {
    assert_eq!(render_svg(&sample_scene(true)), render_svg(&sample_scene(true)));
}

#[test]
fn test_output_format_by_extension() {
    assert_eq!(
        OutputFormat::from_path(Path::new("out.png")).unwrap(),
        OutputFormat::Png
    );
    assert_eq!(
        OutputFormat::from_path(Path::new("out.SVG")).unwrap(),
        OutputFormat::Svg
    );
    assert_eq!(
        OutputFormat::from_path(Path::new("out")).unwrap(),
        OutputFormat::Png
    );
    assert!(matches!(
        OutputFormat::from_path(Path::new("out.gif")),
        Err(RenderError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_png_encoding() {
    let bytes = encode_figure(&sample_scene(true), OutputFormat::Png, 150.0).unwrap();
    assert_eq!(bytes[..8], PNG_SIGNATURE);
}

#[test]
fn test_render_to_file_writes_png() {
    let placement = PlacementReader::new()
        .read("tests/data/sample_placement.json")
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("placement.png");

    let config = RenderConfig {
        output: Some(path.clone()),
        ..RenderConfig::default()
    };
    let scene = render_to_file(&placement, &config).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes[..8], PNG_SIGNATURE);
    assert_eq!(scene.total_hpwl(), 20.0);
    // only the final artifact remains
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_render_to_file_without_output_is_an_error() {
    let placement = PlacementReader::new()
        .read("tests/data/sample_placement.json")
        .unwrap();

    let err = render_to_file(&placement, &RenderConfig::default()).unwrap_err();
    assert!(matches!(err, RenderError::NoOutput), "got {err:?}");
}

#[test]
fn test_save_svg() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("placement.svg");

    save_figure(&sample_scene(true), &path, 150.0).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains(TITLE));
}

#[test]
fn test_unsupported_format_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("placement.gif");

    let err = save_figure(&sample_scene(true), &path, 150.0).unwrap_err();
    assert!(matches!(err, RenderError::UnsupportedFormat { .. }));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_output_directory_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("placement.svg");

    let err = save_figure(&sample_scene(true), &path, 150.0).unwrap_err();
    assert!(matches!(err, RenderError::Io { .. }));
    assert!(!path.exists());
}

#[test]
fn test_invalid_dpi_is_rejected() {
    let err = encode_figure(&sample_scene(true), OutputFormat::Png, 0.0).unwrap_err();
    assert!(matches!(err, RenderError::Raster(_)));
}
