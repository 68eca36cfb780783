// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Placement geometry and the drawing primitives derived from it.
//!
//! Building a [`Scene`] runs two passes over the placement. Pass 1 draws every
//! cell in input order and records its geometry in a [`CellIndex`]. Pass 2
//! resolves net pins through that index, computes each net's bounding box
//! (the HPWL envelope) and draws boxes and pin markers. Primitives are kept
//! in draw order, so nets always paint above cells.

use log::debug;
use std::collections::HashMap;

use super::palette::{cell_paint, Paint, Rgb, BLACK, NET_COLOR};
use crate::placement::{Grid, Identifier, Placement};

pub const CELL_EDGE_WIDTH: f32 = 1.5;
pub const LABEL_FONT_SIZE: f32 = 8.0;
pub const NET_BOX_WIDTH: f32 = 1.0;
pub const NET_BOX_ALPHA: f32 = 0.3;
pub const PIN_RADIUS: f64 = 0.5;
pub const PIN_ALPHA: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box over a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// `None` for an empty point set.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bbox = BoundingBox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for point in rest {
            bbox.min_x = bbox.min_x.min(point.x);
            bbox.min_y = bbox.min_y.min(point.y);
            bbox.max_x = bbox.max_x.max(point.x);
            bbox.max_y = bbox.max_y.max(point.y);
        }
        Some(bbox)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Half-perimeter wire length.
    pub fn hpwl(&self) -> f64 {
        self.width() + self.height()
    }

    /// Zero-width or zero-height boxes are not drawn.
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f32,
    pub alpha: f32,
    pub dashed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Rectangle anchored at its lower-left corner, in grid units.
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        fill: Option<Paint>,
        stroke: Stroke,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Paint,
    },
    /// Text centered on `anchor`; `size` is in points.
    Label {
        anchor: Point,
        text: String,
        size: f32,
        bold: bool,
    },
}

/// Geometry recorded for a drawn cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub fixed: bool,
}

impl CellGeometry {
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Cell identifier to drawn geometry. The first cell drawn with an id owns it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellIndex {
    cells: HashMap<Identifier, CellGeometry>,
}

impl CellIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when `id` was already present; the earlier entry is kept.
    pub fn insert(&mut self, id: &Identifier, geometry: CellGeometry) -> bool {
        if self.cells.contains_key(id) {
            return false;
        }
        self.cells.insert(id.clone(), geometry);
        true
    }

    pub fn get(&self, id: &Identifier) -> Option<&CellGeometry> {
        self.cells.get(id)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Resolved geometry of one net.
#[derive(Debug, Clone, PartialEq)]
pub struct NetGeometry {
    pub index: usize,
    pub name: String,
    /// Pins listed on the net, resolvable or not.
    pub pin_count: usize,
    /// Absolute positions of the pins whose cell exists, in pin order.
    pub pins: Vec<Point>,
    /// Present only when at least two pins resolved.
    pub bbox: Option<BoundingBox>,
}

impl NetGeometry {
    pub fn hpwl(&self) -> Option<f64> {
        self.bbox.map(|bbox| bbox.hpwl())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub grid: Grid,
    /// Primitives in draw order.
    pub primitives: Vec<Primitive>,
    pub cells: CellIndex,
    /// Empty when nets are hidden.
    pub nets: Vec<NetGeometry>,
}

impl Scene {
    pub fn total_hpwl(&self) -> f64 {
        total_hpwl(&self.nets)
    }
}

pub fn total_hpwl(nets: &[NetGeometry]) -> f64 {
    nets.iter().filter_map(NetGeometry::hpwl).sum()
}

/// Builds the full primitive list for `placement`.
pub fn build_scene(placement: &Placement, show_nets: bool) -> Scene {
    let mut primitives = Vec::with_capacity(placement.cells.len() * 2);
    let cells = draw_cells(placement, &mut primitives);

    let nets = if show_nets {
        let nets = measure_nets(placement, &cells);
        draw_nets(&nets, &mut primitives);
        nets
    } else {
        Vec::new()
    };

    Scene {
        grid: placement.grid,
        primitives,
        cells,
        nets,
    }
}

/// Indexes every cell without drawing anything.
pub fn index_cells(placement: &Placement) -> CellIndex {
    let mut index = CellIndex::new();
    for (i, cell) in placement.cells.iter().enumerate() {
        index.insert(&cell.id, cell_geometry(i, placement));
    }
    index
}

fn cell_geometry(i: usize, placement: &Placement) -> CellGeometry {
    let cell = &placement.cells[i];
    CellGeometry {
        index: i,
        x: cell.x,
        y: cell.y,
        w: cell.w,
        h: cell.h,
        fixed: cell.fixed,
    }
}

fn draw_cells(placement: &Placement, primitives: &mut Vec<Primitive>) -> CellIndex {
    let mut index = CellIndex::new();

    for (i, cell) in placement.cells.iter().enumerate() {
        let paint = cell_paint(i, cell.fixed);
        let geometry = cell_geometry(i, placement);

        primitives.push(Primitive::Rect {
            origin: Point::new(cell.x, cell.y),
            width: cell.w,
            height: cell.h,
            fill: Some(paint),
            stroke: Stroke {
                color: BLACK,
                width: CELL_EDGE_WIDTH,
                alpha: paint.alpha,
                dashed: false,
            },
        });
        primitives.push(Primitive::Label {
            anchor: geometry.center(),
            text: cell.id.to_string(),
            size: LABEL_FONT_SIZE,
            bold: true,
        });

        index.insert(&cell.id, geometry);
    }

    index
}

/// Resolves every net's pins against `cells` and computes its bounding box.
///
/// Pins naming a cell that does not exist contribute nothing.
pub fn measure_nets(placement: &Placement, cells: &CellIndex) -> Vec<NetGeometry> {
    let mut unresolved = 0usize;

    let nets: Vec<NetGeometry> = placement
        .nets
        .iter()
        .enumerate()
        .map(|(index, net)| {
            let pins: Vec<Point> = net
                .pins
                .iter()
                .filter_map(|pin| {
                    let cell = cells.get(&pin.cell_id);
                    if cell.is_none() {
                        unresolved += 1;
                    }
                    cell.map(|cell| Point::new(cell.x + pin.offset_x, cell.y + pin.offset_y))
                })
                .collect();
            let bbox = if pins.len() >= 2 {
                BoundingBox::from_points(&pins)
            } else {
                None
            };

            NetGeometry {
                index,
                name: net.display_name(index),
                pin_count: net.pins.len(),
                pins,
                bbox,
            }
        })
        .collect();

    debug!("[INFO] Unresolved pins: {unresolved}");
    nets
}

/// Draws the box and pin markers of every net.
///
/// A net listing fewer than two pins is skipped outright, even when its one
/// pin resolves. Otherwise every resolved pin gets a marker, and the dashed
/// box is drawn only for a non-degenerate bounding box.
fn draw_nets(nets: &[NetGeometry], primitives: &mut Vec<Primitive>) {
    for net in nets {
        // Single-pin nets have nothing to connect.
        if net.pin_count < 2 {
            continue;
        }

        if let Some(bbox) = net.bbox.filter(|bbox| !bbox.is_degenerate()) {
            primitives.push(Primitive::Rect {
                origin: bbox.origin(),
                width: bbox.width(),
                height: bbox.height(),
                fill: None,
                stroke: Stroke {
                    color: NET_COLOR,
                    width: NET_BOX_WIDTH,
                    alpha: NET_BOX_ALPHA,
                    dashed: true,
                },
            });
        }

        for pin in &net.pins {
            primitives.push(Primitive::Circle {
                center: *pin,
                radius: PIN_RADIUS,
                fill: Paint::new(NET_COLOR, PIN_ALPHA),
            });
        }
    }
}
