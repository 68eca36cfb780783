// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use log::debug;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;

use super::svg::FONT_FAMILY;
use crate::error::{RenderError, RenderResult};

/// Points per inch of the SVG figure.
const POINTS_PER_INCH: f32 = 72.0;

/// Rasterizes an SVG figure to PNG bytes at `dpi`.
pub fn render_png(svg: &str, dpi: f32) -> RenderResult<Vec<u8>> {
    if !(dpi.is_finite() && dpi > 0.0) {
        return Err(RenderError::Raster(format!(
            "DPI must be a positive number, got {dpi}"
        )));
    }
    let scale = dpi / POINTS_PER_INCH;

    let mut options = usvg::Options::default();
    options.font_family = FONT_FAMILY.to_string();
    options.fontdb_mut().load_system_fonts();

    let tree =
        usvg::Tree::from_str(svg, &options).map_err(|e| RenderError::Svg(e.to_string()))?;

    let size = tree.size().to_int_size();
    let width = (size.width() as f32 * scale).ceil();
    let height = (size.height() as f32 * scale).ceil();
    if width < 1.0 || height < 1.0 || width > u32::MAX as f32 || height > u32::MAX as f32 {
        return Err(RenderError::Raster(format!(
            "figure size {width}x{height} px is out of range"
        )));
    }
    let (width, height) = (width as u32, height as u32);
    debug!("[INFO] Raster size: {width}x{height} px at {dpi} DPI");

    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        RenderError::Raster(format!("failed to allocate {width}x{height} surface"))
    })?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| RenderError::Encode(e.to_string()))
}
