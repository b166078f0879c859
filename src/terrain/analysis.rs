//! Topology statistics for a generated terrain.
//!
//! Counts connected regions of each cell kind with a 4-connected flood fill.
//! Path connectivity is guaranteed by construction; wall connectivity is only
//! measured here.

use std::collections::VecDeque;
use std::fmt;

use super::{Cell, GenerationResult};
use crate::tilemap::Tilemap;

/// Inclusive pixel bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TopologyReport {
    pub width: usize,
    pub height: usize,
    pub room_size: usize,
    pub rooms: usize,
    pub bridges: usize,
    pub path_pixels: usize,
    pub wall_pixels: usize,
    pub path_components: usize,
    pub wall_components: usize,
    /// Bounding box of all path pixels, `None` for an all-wall grid
    pub path_bounds: Option<Bounds>,
}

impl TopologyReport {
    /// Independent cycles in the room graph; zero for a tree.
    pub fn cycle_rank(&self) -> usize {
        if self.rooms == 0 {
            return 0;
        }
        (self.bridges + 1).saturating_sub(self.rooms)
    }

    pub fn wall_ratio(&self) -> f64 {
        let total = self.path_pixels + self.wall_pixels;
        if total == 0 {
            return 0.0;
        }
        self.wall_pixels as f64 / total as f64
    }

    pub fn path_is_connected(&self) -> bool {
        self.path_components == 1
    }
}

impl fmt::Display for TopologyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Resolution: {} x {}", self.width, self.height)?;
        writeln!(f, "Room size: {} px ({} rooms, {} bridges)", self.room_size, self.rooms, self.bridges)?;
        writeln!(
            f,
            "Path: {} px in {} region(s), {}",
            self.path_pixels,
            self.path_components,
            if self.path_is_connected() { "connected" } else { "disconnected" }
        )?;
        match self.path_bounds {
            Some(b) => writeln!(f, "Path bounds: ({}, {}) - ({}, {})", b.min_x, b.min_y, b.max_x, b.max_y)?,
            None => writeln!(f, "Path bounds: none")?,
        }
        writeln!(
            f,
            "Wall: {} px in {} region(s), {:.1}% coverage",
            self.wall_pixels,
            self.wall_components,
            self.wall_ratio() * 100.0
        )?;
        write!(f, "Cycle rank: {}", self.cycle_rank())
    }
}

pub fn analyze(result: &GenerationResult) -> TopologyReport {
    let grid = &result.grid;
    let lattice = result.lattice();

    let path_pixels = grid.values().iter().filter(|c| c.is_path()).count();
    let wall_pixels = grid.values().len() - path_pixels;

    TopologyReport {
        width: result.width,
        height: result.height,
        room_size: lattice.room_size,
        rooms: lattice.cell_count(),
        bridges: result.edge_count(),
        path_pixels,
        wall_pixels,
        path_components: count_components(grid, Cell::Path),
        wall_components: count_components(grid, Cell::Wall),
        path_bounds: bounds_of(grid, Cell::Path),
    }
}

/// Number of 4-connected regions made of `kind`.
pub fn count_components(grid: &Tilemap<Cell>, kind: Cell) -> usize {
    let mut seen = Tilemap::new_with(grid.width, grid.height, false);
    let mut queue = VecDeque::new();
    let mut components = 0;

    for (x, y, &cell) in grid.iter() {
        if cell != kind || *seen.get(x, y) {
            continue;
        }
        components += 1;
        seen.set(x, y, true);
        queue.push_back((x, y));

        while let Some((cx, cy)) = queue.pop_front() {
            for (nx, ny) in grid.neighbors(cx, cy) {
                if *grid.get(nx, ny) == kind && !*seen.get(nx, ny) {
                    seen.set(nx, ny, true);
                    queue.push_back((nx, ny));
                }
            }
        }
    }

    components
}

fn bounds_of(grid: &Tilemap<Cell>, kind: Cell) -> Option<Bounds> {
    grid.iter()
        .filter(|&(_, _, &cell)| cell == kind)
        .fold(None, |acc, (x, y, _)| {
            Some(match acc {
                None => Bounds { min_x: x, min_y: y, max_x: x, max_y: y },
                Some(b) => Bounds {
                    min_x: b.min_x.min(x),
                    min_y: b.min_y.min(y),
                    max_x: b.max_x.max(x),
                    max_y: b.max_y.max(y),
                },
            })
        })
}
