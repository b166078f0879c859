//! Rasterization of rooms and bridges onto the pixel grid.

use super::lattice::{Lattice, PixelRect};
use super::spanning::{EdgeAxis, SpanningTree};
use super::Cell;
use crate::tilemap::Tilemap;

/// Paint a fresh all-wall grid with one room per lattice cell and one bridge
/// per tree edge. Everything is clipped to the canvas.
pub fn rasterize(lattice: &Lattice, tree: &SpanningTree) -> Tilemap<Cell> {
    let mut grid = Tilemap::new_with(lattice.width, lattice.height, Cell::Wall);

    for row in 0..lattice.rows {
        for col in 0..lattice.cols {
            paint(&mut grid, lattice.room_rect(row, col));
        }
    }

    for edge in &tree.edges {
        let rect = match edge.axis() {
            EdgeAxis::Horizontal { row, left_col } => lattice.horizontal_bridge_rect(row, left_col),
            EdgeAxis::Vertical { top_row, col } => lattice.vertical_bridge_rect(top_row, col),
        };
        paint(&mut grid, rect);
    }

    grid
}

fn paint(grid: &mut Tilemap<Cell>, rect: PixelRect) {
    grid.fill_rect(rect.x, rect.y, rect.width, rect.height, Cell::Path);
}
