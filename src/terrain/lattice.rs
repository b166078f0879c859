//! Coarse lattice geometry.
//!
//! The pixel canvas is divided into square rooms separated by one pixel of
//! wall. This module owns every coordinate formula that maps a coarse cell
//! `(row, col)` onto pixels, so the rasterizer and the analysis agree on
//! where rooms and bridges live.

use crate::config::{TerrainConfig, MIN_DIMENSION};

/// An axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Derived geometry for one generation call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lattice {
    /// Canvas width after clamping
    pub width: usize,
    /// Canvas height after clamping
    pub height: usize,
    /// Edge length of a room
    pub room_size: usize,
    /// Room plus one pixel of wall
    pub step: usize,
    pub rows: usize,
    pub cols: usize,
    /// Left margin that centres the lattice footprint
    pub offset_x: usize,
    /// Top margin that centres the lattice footprint
    pub offset_y: usize,
}

impl Lattice {
    pub fn from_config(config: &TerrainConfig) -> Self {
        Self::new(config.actual_width(), config.actual_height(), config.room_size())
    }

    /// Build the geometry for a canvas and room size.
    ///
    /// Dimensions below the minimum are raised to it, and a zero room size is
    /// treated as one so `step` never degenerates.
    pub fn new(width: usize, height: usize, room_size: usize) -> Self {
        let width = width.max(MIN_DIMENSION);
        let height = height.max(MIN_DIMENSION);
        let room_size = room_size.max(1);
        let step = room_size + 1;

        let cols = (width - 1) / step;
        let rows = (height - 1) / step;

        // The footprint always fits: cols * step <= width - 1.
        let offset_x = (width - (cols * step + 1)) / 2;
        let offset_y = (height - (rows * step + 1)) / 2;

        Self {
            width,
            height,
            room_size,
            step,
            rows,
            cols,
            offset_x,
            offset_y,
        }
    }

    /// True when no room fits on one of the axes.
    pub fn is_degenerate(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Pixel block covered by the room of coarse cell `(row, col)`.
    pub fn room_rect(&self, row: usize, col: usize) -> PixelRect {
        PixelRect {
            x: self.offset_x + col * self.step + 1,
            y: self.offset_y + row * self.step + 1,
            width: self.room_size,
            height: self.room_size,
        }
    }

    /// Wall column between `(row, left_col)` and `(row, left_col + 1)`,
    /// opened over the full room height.
    pub fn horizontal_bridge_rect(&self, row: usize, left_col: usize) -> PixelRect {
        PixelRect {
            x: self.offset_x + left_col * self.step + self.room_size + 1,
            y: self.offset_y + row * self.step + 1,
            width: 1,
            height: self.room_size,
        }
    }

    /// Wall row between `(top_row, col)` and `(top_row + 1, col)`,
    /// opened over the full room width.
    pub fn vertical_bridge_rect(&self, top_row: usize, col: usize) -> PixelRect {
        PixelRect {
            x: self.offset_x + col * self.step + 1,
            y: self.offset_y + top_row * self.step + self.room_size + 1,
            width: self.room_size,
            height: 1,
        }
    }

    /// Outer bounds of the lattice including its 1-pixel wall frame.
    pub fn footprint(&self) -> PixelRect {
        PixelRect {
            x: self.offset_x,
            y: self.offset_y,
            width: self.cols * self.step + 1,
            height: self.rows * self.step + 1,
        }
    }
}
