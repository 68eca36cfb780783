// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Placement Visualization Library
//!
//! This library loads a physical-design placement (grid, cells and multi-pin
//! nets) and renders it as an annotated figure: colored cell rectangles with
//! labels, and per-net HPWL bounding boxes with pin markers.

pub mod error;
pub mod export;
pub mod placement;
pub mod render;

// Re-export commonly used types
pub use error::{LoadError, RenderError};
pub use placement::{reader::PlacementReader, Cell, Grid, Identifier, Net, Pin, Placement};
pub use render::{build_scene, RenderConfig, Scene};
