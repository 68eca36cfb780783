// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use log::{debug, info, warn};
use serde_json::error::Category;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::Placement;
use crate::error::{LoadError, LoadResult};

pub struct PlacementReader;

impl PlacementReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read<P: AsRef<Path>>(&self, path: P) -> LoadResult<Placement> {
        let path = path.as_ref();
        info!("[LOAD] Loading placement file: {}", path.display());

        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                LoadError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        debug!("[FILE] Placement file size: {} bytes", content.len());

        self.parse_str(&content, path)
    }

    /// Parses an in-memory placement document. `origin` only labels errors.
    pub fn parse_str<P: AsRef<Path>>(&self, content: &str, origin: P) -> LoadResult<Placement> {
        let origin = origin.as_ref();

        let placement: Placement = serde_json::from_str(content).map_err(|source| {
            match source.classify() {
                Category::Syntax | Category::Eof => LoadError::Format {
                    path: origin.to_path_buf(),
                    source,
                },
                Category::Data | Category::Io => LoadError::Invalid {
                    path: origin.to_path_buf(),
                    message: source.to_string(),
                },
            }
        })?;

        placement
            .validate()
            .map_err(|message| LoadError::Invalid {
                path: origin.to_path_buf(),
                message,
            })?;

        for id in placement.duplicate_cell_ids() {
            warn!("[WARN] Duplicate cell id {id}: the first occurrence is used for pin lookup");
        }

        info!("[PASS] Placement parsed successfully!");
        info!(
            "[INFO] Grid: {} x {}",
            placement.grid.width, placement.grid.height
        );
        info!(
            "[INFO] Cells: {} ({} fixed)",
            placement.cells.len(),
            placement.fixed_cell_count()
        );
        info!(
            "[INFO] Nets: {} with {} pins",
            placement.nets.len(),
            placement.pin_count()
        );

        Ok(placement)
    }
}

impl Default for PlacementReader {
    fn default() -> Self {
        Self::new()
    }
}
