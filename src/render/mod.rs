// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RenderError, RenderResult};
use crate::placement::Placement;

pub mod palette;
pub mod raster;
pub mod scene;
pub mod svg;

pub use scene::{build_scene, Scene};

pub const DEFAULT_DPI: f32 = 150.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub show_nets: bool,
    /// Image path; `None` opens the interactive viewer instead.
    pub output: Option<PathBuf>,
    pub dpi: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            show_nets: true,
            output: None,
            dpi: DEFAULT_DPI,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// `.svg` selects SVG; `.png` or no extension selects PNG.
    pub fn from_path(path: &Path) -> RenderResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            None => Ok(OutputFormat::Png),
            Some(ext) if ext.eq_ignore_ascii_case("png") => Ok(OutputFormat::Png),
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Ok(OutputFormat::Svg),
            Some(ext) => Err(RenderError::UnsupportedFormat {
                extension: ext.to_string(),
            }),
        }
    }
}

/// Complete file contents of the figure in `format`.
pub fn encode_figure(scene: &Scene, format: OutputFormat, dpi: f32) -> RenderResult<Vec<u8>> {
    let svg = svg::render_svg(scene);
    match format {
        OutputFormat::Svg => Ok(svg.into_bytes()),
        OutputFormat::Png => raster::render_png(&svg, dpi),
    }
}

/// Writes the figure to `path`. The target is only touched once the whole
/// file has been encoded and written next to it.
pub fn save_figure(scene: &Scene, path: &Path, dpi: f32) -> RenderResult<()> {
    let format = OutputFormat::from_path(path)?;
    let bytes = encode_figure(scene, format, dpi)?;

    let staging = staging_path(path);
    let io_error = |source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Err(source) = fs::write(&staging, &bytes) {
        let _ = fs::remove_file(&staging);
        return Err(io_error(source));
    }
    if let Err(source) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(io_error(source));
    }

    info!(
        "[SAVE] Wrote {:?} figure ({} bytes) to {}",
        format,
        bytes.len(),
        path.display()
    );
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "figure".to_string());
    path.with_file_name(format!(".{name}.partial"))
}

/// Builds the scene for `placement` and writes it to `config.output`.
pub fn render_to_file(placement: &Placement, config: &RenderConfig) -> RenderResult<Scene> {
    let output = config.output.as_deref().ok_or(RenderError::NoOutput)?;
    let scene = build_scene(placement, config.show_nets);
    if config.show_nets {
        info!(
            "[INFO] Total HPWL: {:.2} over {} nets",
            scene.total_hpwl(),
            scene.nets.iter().filter(|net| net.bbox.is_some()).count()
        );
    }
    save_figure(&scene, output, config.dpi)?;
    Ok(scene)
}
