// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Error types for loading placements and writing figures

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a placement description
#[derive(Error, Debug)]
pub enum LoadError {
    /// The input file does not exist
    #[error("File {} not found", path.display())]
    NotFound { path: PathBuf },

    /// The input is not syntactically valid JSON
    #[error("Invalid JSON file: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON whose shape does not describe a placement
    #[error("{}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },

    /// Any other failure while reading the input
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while producing the output artifact
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to build figure: {0}")]
    Svg(String),

    #[error("Failed to rasterize figure: {0}")]
    Raster(String),

    #[error("Failed to encode PNG output: {0}")]
    Encode(String),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No output path configured")]
    NoOutput,

    #[error("Unsupported output format '{extension}' (expected .png or .svg)")]
    UnsupportedFormat { extension: String },

    #[error("Failed to open viewer window: {0}")]
    Display(String),
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;
pub type RenderResult<T> = std::result::Result<T, RenderError>;
