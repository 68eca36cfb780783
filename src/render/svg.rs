// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! SVG figure for a [`Scene`].
//!
//! Axis limits are fixed to the grid extent with a 1:1 aspect ratio. Sizes are
//! in points (1/72 inch) so the raster backend can scale by DPI directly.

use std::fmt::Write;

use super::palette::{Paint, BLACK, GRID_LINE, WHITE};
use super::scene::{Point, Primitive, Scene, Stroke};
use crate::placement::Grid;

pub const TITLE: &str = "Placement Visualization";
pub const FONT_FAMILY: &str = "DejaVu Sans";

const FIGURE_WIDTH: f64 = 864.0;
const FIGURE_HEIGHT: f64 = 720.0;
const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 36.0;
const MARGIN_BOTTOM: f64 = 48.0;

const TICK_LENGTH: f64 = 3.5;
const TICK_FONT_SIZE: f64 = 10.0;
const AXIS_LABEL_FONT_SIZE: f64 = 10.0;
const TITLE_FONT_SIZE: f64 = 12.0;
const GRID_ALPHA: f32 = 0.3;
const TARGET_TICKS: f64 = 8.0;

/// Extent drawn on an axis whose grid size is zero or negative.
pub const MIN_AXIS_EXTENT: f64 = 1.0;

/// Maps grid coordinates into the figure, tight around the axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    /// Points per grid unit.
    pub scale: f64,
    pub extent_x: f64,
    pub extent_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Figure {
    pub fn new(grid: &Grid) -> Self {
        let extent_x = axis_extent(grid.width);
        let extent_y = axis_extent(grid.height);

        let available_w = FIGURE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let available_h = FIGURE_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let scale = (available_w / extent_x).min(available_h / extent_y);

        Self {
            scale,
            extent_x,
            extent_y,
            width: MARGIN_LEFT + extent_x * scale + MARGIN_RIGHT,
            height: MARGIN_TOP + extent_y * scale + MARGIN_BOTTOM,
        }
    }

    pub fn plot_width(&self) -> f64 {
        self.extent_x * self.scale
    }

    pub fn plot_height(&self) -> f64 {
        self.extent_y * self.scale
    }

    /// Grid point to figure point; grid y grows upward, figure y downward.
    pub fn map(&self, point: Point) -> (f64, f64) {
        (
            MARGIN_LEFT + point.x * self.scale,
            MARGIN_TOP + (self.extent_y - point.y) * self.scale,
        )
    }
}

pub fn axis_extent(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        MIN_AXIS_EXTENT
    }
}

/// Tick positions from 0 to `extent` on a 1/2/2.5/5 x 10^k step.
pub fn ticks(extent: f64) -> Vec<f64> {
    let step = tick_step(extent);
    let count = (extent / step + 1e-9).floor() as usize;
    (0..=count).map(|i| i as f64 * step).collect()
}

fn tick_step(extent: f64) -> f64 {
    let raw = extent / TARGET_TICKS;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 2.5 {
        2.5
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

pub fn format_tick(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.3}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

pub fn render_svg(scene: &Scene) -> String {
    let figure = Figure::new(&scene.grid);
    let mut svg = String::new();

    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.2}\" height=\"{h:.2}\" viewBox=\"0 0 {w:.2} {h:.2}\" font-family=\"{FONT_FAMILY}\">\n",
        w = figure.width,
        h = figure.height,
    );
    let _ = writeln!(
        svg,
        "  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        WHITE.hex()
    );
    let _ = writeln!(
        svg,
        "  <defs><clipPath id=\"axes\"><rect x=\"{MARGIN_LEFT:.2}\" y=\"{MARGIN_TOP:.2}\" width=\"{:.2}\" height=\"{:.2}\"/></clipPath></defs>",
        figure.plot_width(),
        figure.plot_height()
    );

    push_grid_lines(&mut svg, &figure);

    for primitive in &scene.primitives {
        push_primitive(&mut svg, &figure, primitive);
    }

    push_axes(&mut svg, &figure);

    svg.push_str("</svg>\n");
    svg
}

fn push_grid_lines(svg: &mut String, figure: &Figure) {
    let (left, bottom) = figure.map(Point::new(0.0, 0.0));
    let (right, top) = figure.map(Point::new(figure.extent_x, figure.extent_y));
    let stroke = GRID_LINE.hex();

    for x in ticks(figure.extent_x) {
        let (sx, _) = figure.map(Point::new(x, 0.0));
        let _ = writeln!(
            svg,
            "  <line x1=\"{sx:.2}\" y1=\"{top:.2}\" x2=\"{sx:.2}\" y2=\"{bottom:.2}\" stroke=\"{stroke}\" stroke-opacity=\"{GRID_ALPHA}\" stroke-width=\"0.8\"/>"
        );
    }
    for y in ticks(figure.extent_y) {
        let (_, sy) = figure.map(Point::new(0.0, y));
        let _ = writeln!(
            svg,
            "  <line x1=\"{left:.2}\" y1=\"{sy:.2}\" x2=\"{right:.2}\" y2=\"{sy:.2}\" stroke=\"{stroke}\" stroke-opacity=\"{GRID_ALPHA}\" stroke-width=\"0.8\"/>"
        );
    }
}

fn fill_attrs(fill: Option<&Paint>) -> String {
    match fill {
        Some(paint) => format!(
            "fill=\"{}\" fill-opacity=\"{}\"",
            paint.color.hex(),
            paint.alpha
        ),
        None => "fill=\"none\"".to_string(),
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(
        "stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"{}\"",
        stroke.color.hex(),
        stroke.alpha,
        stroke.width
    );
    if stroke.dashed {
        let dash = 3.7 * stroke.width;
        let gap = 1.6 * stroke.width;
        let _ = write!(attrs, " stroke-dasharray=\"{dash:.2} {gap:.2}\"");
    }
    attrs
}

fn push_primitive(svg: &mut String, figure: &Figure, primitive: &Primitive) {
    match primitive {
        Primitive::Rect {
            origin,
            width,
            height,
            fill,
            stroke,
        } => {
            // Top-left corner in figure space is the grid top-left.
            let (x, y) = figure.map(Point::new(origin.x, origin.y + height));
            let _ = writeln!(
                svg,
                "  <rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{:.2}\" height=\"{:.2}\" {} {} clip-path=\"url(#axes)\"/>",
                width * figure.scale,
                height * figure.scale,
                fill_attrs(fill.as_ref()),
                stroke_attrs(stroke)
            );
        }
        Primitive::Circle {
            center,
            radius,
            fill,
        } => {
            let (cx, cy) = figure.map(*center);
            let _ = writeln!(
                svg,
                "  <circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{:.2}\" {} clip-path=\"url(#axes)\"/>",
                radius * figure.scale,
                fill_attrs(Some(fill))
            );
        }
        Primitive::Label {
            anchor,
            text,
            size,
            bold,
        } => {
            let (x, y) = figure.map(*anchor);
            let weight = if *bold { "bold" } else { "normal" };
            let _ = writeln!(
                svg,
                "  <text x=\"{x:.2}\" y=\"{y:.2}\" font-size=\"{size}\" font-weight=\"{weight}\" text-anchor=\"middle\" dominant-baseline=\"central\" fill=\"{}\">{}</text>",
                BLACK.hex(),
                escape_xml(text)
            );
        }
    }
}

fn push_axes(svg: &mut String, figure: &Figure) {
    let black = BLACK.hex();
    let (left, bottom) = figure.map(Point::new(0.0, 0.0));
    let (right, top) = figure.map(Point::new(figure.extent_x, figure.extent_y));

    let _ = writeln!(
        svg,
        "  <rect x=\"{left:.2}\" y=\"{top:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" stroke=\"{black}\" stroke-width=\"0.8\"/>",
        figure.plot_width(),
        figure.plot_height()
    );

    for x in ticks(figure.extent_x) {
        let (sx, _) = figure.map(Point::new(x, 0.0));
        let _ = writeln!(
            svg,
            "  <line x1=\"{sx:.2}\" y1=\"{bottom:.2}\" x2=\"{sx:.2}\" y2=\"{:.2}\" stroke=\"{black}\" stroke-width=\"0.8\"/>",
            bottom + TICK_LENGTH
        );
        let _ = writeln!(
            svg,
            "  <text x=\"{sx:.2}\" y=\"{:.2}\" font-size=\"{TICK_FONT_SIZE}\" text-anchor=\"middle\" fill=\"{black}\">{}</text>",
            bottom + TICK_LENGTH + TICK_FONT_SIZE + 2.0,
            format_tick(x)
        );
    }

    for y in ticks(figure.extent_y) {
        let (_, sy) = figure.map(Point::new(0.0, y));
        let _ = writeln!(
            svg,
            "  <line x1=\"{:.2}\" y1=\"{sy:.2}\" x2=\"{left:.2}\" y2=\"{sy:.2}\" stroke=\"{black}\" stroke-width=\"0.8\"/>",
            left - TICK_LENGTH
        );
        let _ = writeln!(
            svg,
            "  <text x=\"{:.2}\" y=\"{sy:.2}\" font-size=\"{TICK_FONT_SIZE}\" text-anchor=\"end\" dominant-baseline=\"central\" fill=\"{black}\">{}</text>",
            left - TICK_LENGTH - 2.0,
            format_tick(y)
        );
    }

    let center_x = (left + right) / 2.0;
    let center_y = (top + bottom) / 2.0;
    let _ = writeln!(
        svg,
        "  <text x=\"{center_x:.2}\" y=\"{:.2}\" font-size=\"{AXIS_LABEL_FONT_SIZE}\" text-anchor=\"middle\" fill=\"{black}\">X</text>",
        figure.height - 8.0
    );
    let label_x = 14.0;
    let _ = writeln!(
        svg,
        "  <text x=\"{label_x:.2}\" y=\"{center_y:.2}\" font-size=\"{AXIS_LABEL_FONT_SIZE}\" text-anchor=\"middle\" dominant-baseline=\"central\" transform=\"rotate(-90 {label_x:.2} {center_y:.2})\" fill=\"{black}\">Y</text>"
    );
    let _ = writeln!(
        svg,
        "  <text x=\"{center_x:.2}\" y=\"{:.2}\" font-size=\"{TITLE_FONT_SIZE}\" text-anchor=\"middle\" fill=\"{black}\">{TITLE}</text>",
        top - 12.0
    );
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
