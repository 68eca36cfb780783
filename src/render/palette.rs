// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Fixed colors used by the figure.
//!
//! Cells cycle through the 20-entry tab20 qualitative table by their
//! position in the cell list, so the same input always gets the same colors.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`, as used in SVG attributes.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

/// A color with straight (non-premultiplied) opacity in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Paint {
    pub color: Rgb,
    pub alpha: f32,
}

impl Paint {
    pub const fn new(color: Rgb, alpha: f32) -> Self {
        Self { color, alpha }
    }

    /// Alpha scaled to a byte, for backends taking 8-bit channels.
    pub fn alpha_u8(&self) -> u8 {
        (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

pub const PALETTE_SIZE: usize = 20;

const TAB20: [Rgb; PALETTE_SIZE] = [
    Rgb::new(0x1f, 0x77, 0xb4),
    Rgb::new(0xae, 0xc7, 0xe8),
    Rgb::new(0xff, 0x7f, 0x0e),
    Rgb::new(0xff, 0xbb, 0x78),
    Rgb::new(0x2c, 0xa0, 0x2c),
    Rgb::new(0x98, 0xdf, 0x8a),
    Rgb::new(0xd6, 0x27, 0x28),
    Rgb::new(0xff, 0x98, 0x96),
    Rgb::new(0x94, 0x67, 0xbd),
    Rgb::new(0xc5, 0xb0, 0xd5),
    Rgb::new(0x8c, 0x56, 0x4b),
    Rgb::new(0xc4, 0x9c, 0x94),
    Rgb::new(0xe3, 0x77, 0xc2),
    Rgb::new(0xf7, 0xb6, 0xd2),
    Rgb::new(0x7f, 0x7f, 0x7f),
    Rgb::new(0xc7, 0xc7, 0xc7),
    Rgb::new(0xbc, 0xbd, 0x22),
    Rgb::new(0xdb, 0xdb, 0x8d),
    Rgb::new(0x17, 0xbe, 0xcf),
    Rgb::new(0x9e, 0xda, 0xe5),
];

pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
pub const GRID_LINE: Rgb = Rgb::new(0xb0, 0xb0, 0xb0);
pub const FIXED_COLOR: Rgb = Rgb::new(0xff, 0x00, 0x00);
pub const NET_COLOR: Rgb = Rgb::new(0x00, 0x00, 0xff);

pub const MOVABLE_ALPHA: f32 = 0.5;
pub const FIXED_ALPHA: f32 = 0.8;

/// Palette entry for the cell at `index` in the cell list (wraps every 20).
pub fn palette(index: usize) -> Rgb {
    TAB20[index % PALETTE_SIZE]
}

/// Fill of a cell: fixed cells always use the distinguished fixed color.
pub fn cell_paint(index: usize, fixed: bool) -> Paint {
    if fixed {
        Paint::new(FIXED_COLOR, FIXED_ALPHA)
    } else {
        Paint::new(palette(index), MOVABLE_ALPHA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_wraps() {
        assert_eq!(palette(0), palette(20));
        assert_eq!(palette(3), palette(43));
        assert_ne!(palette(0), palette(1));
    }

    #[test]
    fn test_fixed_override() {
        for index in 0..45 {
            let paint = cell_paint(index, true);
            assert_eq!(paint.color, FIXED_COLOR);
            assert_eq!(paint.alpha, FIXED_ALPHA);
        }
        assert_eq!(cell_paint(2, false), Paint::new(palette(2), MOVABLE_ALPHA));
    }

    #[test]
    fn test_hex() {
        assert_eq!(palette(0).hex(), "#1f77b4");
        assert_eq!(FIXED_COLOR.to_string(), "#ff0000");
        assert_eq!(Paint::new(BLACK, 0.5).alpha_u8(), 128);
    }
}
