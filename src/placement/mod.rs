// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Cell or net identifier, either a JSON number or a JSON string.
///
/// Numbers compare by value, so `1` and `1.0` name the same cell, while
/// `1` and `"1"` are distinct identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged, from = "RawIdentifier")]
pub enum Identifier {
    Integer(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    /// Numbers with a fractional part, or integral values beyond `u64`.
    Real(f64),
    Text(String),
}

/// Shape of an identifier as it appears in the document, before numbers are
/// normalized.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdentifier {
    Integer(i64),
    Unsigned(u64),
    Real(f64),
    Text(String),
}

impl From<RawIdentifier> for Identifier {
    fn from(raw: RawIdentifier) -> Self {
        match raw {
            RawIdentifier::Integer(value) => Identifier::Integer(value),
            RawIdentifier::Unsigned(value) => Identifier::unsigned(value),
            RawIdentifier::Real(value) => Identifier::from(value),
            RawIdentifier::Text(value) => Identifier::Text(value),
        }
    }
}

// 2^63 and 2^64, exactly representable as f64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

impl From<f64> for Identifier {
    /// Integral values land in `Integer` or `Unsigned` so they match ids
    /// written without a fractional part.
    fn from(value: f64) -> Self {
        if value.fract() != 0.0 || !value.is_finite() {
            Identifier::Real(value)
        } else if (-I64_BOUND..I64_BOUND).contains(&value) {
            Identifier::Integer(value as i64)
        } else if (0.0..U64_BOUND).contains(&value) {
            Identifier::Unsigned(value as u64)
        } else {
            Identifier::Real(value)
        }
    }
}

impl Identifier {
    fn unsigned(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(value) => Identifier::Integer(value),
            Err(_) => Identifier::Unsigned(value),
        }
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Identifier::Integer(a), Identifier::Integer(b)) => a == b,
            (Identifier::Unsigned(a), Identifier::Unsigned(b)) => a == b,
            (Identifier::Real(a), Identifier::Real(b)) => a.to_bits() == b.to_bits(),
            (Identifier::Text(a), Identifier::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Identifier::Integer(value) => value.hash(state),
            Identifier::Unsigned(value) => value.hash(state),
            Identifier::Real(value) => value.to_bits().hash(state),
            Identifier::Text(value) => value.hash(state),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Integer(value) => write!(f, "{value}"),
            Identifier::Unsigned(value) => write!(f, "{value}"),
            Identifier::Real(value) => write!(f, "{value}"),
            Identifier::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Identifier::Integer(value)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub id: Identifier,
    pub x: f64, // lower-left corner
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default)]
    pub fixed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub cell_id: Identifier,
    pub offset_x: f64, // relative to the owning cell's lower-left corner
    pub offset_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Net {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Identifier>,
    pub pins: Vec<Pin>,
}

impl Net {
    /// Name used in reports: the net's own id, or its position in the net list.
    pub fn display_name(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => format!("net{index}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub grid: Grid,
    pub cells: Vec<Cell>,
    pub nets: Vec<Net>,
}

impl Placement {
    /// First cell carrying `id`, in input order.
    pub fn find_cell(&self, id: &Identifier) -> Option<&Cell> {
        self.cells.iter().find(|cell| &cell.id == id)
    }

    pub fn fixed_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.fixed).count()
    }

    pub fn pin_count(&self) -> usize {
        self.nets.iter().map(|net| net.pins.len()).sum()
    }

    /// Identifiers that occur more than once among the cells, each reported once.
    pub fn duplicate_cell_ids(&self) -> Vec<&Identifier> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for cell in &self.cells {
            if !seen.insert(&cell.id) && reported.insert(&cell.id) {
                duplicates.push(&cell.id);
            }
        }
        duplicates
    }

    /// Checks the shape rules the schema alone cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if !is_extent(self.grid.width) || !is_extent(self.grid.height) {
            return Err(format!(
                "grid extent must be non-negative, got {} x {}",
                self.grid.width, self.grid.height
            ));
        }

        for cell in &self.cells {
            if !cell.x.is_finite() || !cell.y.is_finite() {
                return Err(format!("cell {} has a non-finite position", cell.id));
            }
            if !is_extent(cell.w) || !is_extent(cell.h) {
                return Err(format!(
                    "cell {} has a negative size {} x {}",
                    cell.id, cell.w, cell.h
                ));
            }
        }

        for (index, net) in self.nets.iter().enumerate() {
            for pin in &net.pins {
                if !pin.offset_x.is_finite() || !pin.offset_y.is_finite() {
                    return Err(format!(
                        "net {} has a pin with a non-finite offset",
                        net.display_name(index)
                    ));
                }
            }
        }

        Ok(())
    }
}

fn is_extent(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

pub mod reader;
