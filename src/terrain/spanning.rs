//! Randomized spanning tree over the coarse lattice.
//!
//! Iterative depth-first search: from the cell on top of the stack pick a
//! random unvisited neighbour and descend, otherwise backtrack. Every cell of
//! a `rows x cols` lattice is reached exactly once, giving `rows * cols - 1`
//! edges and no cycles.

use rand::Rng;

/// Neighbour enumeration order as `(d_row, d_col)`: right, down, left, up.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// One accepted connection between two adjacent coarse cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpanningEdge {
    pub from: (usize, usize),
    pub to: (usize, usize),
}

/// Orientation of an edge on the pixel canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeAxis {
    /// Both cells share a row; the bridge crosses a wall column.
    Horizontal { row: usize, left_col: usize },
    /// Both cells share a column; the bridge crosses a wall row.
    Vertical { top_row: usize, col: usize },
}

impl SpanningEdge {
    pub fn axis(&self) -> EdgeAxis {
        let (r1, c1) = self.from;
        let (r2, c2) = self.to;
        if r1 == r2 {
            EdgeAxis::Horizontal { row: r1, left_col: c1.min(c2) }
        } else {
            EdgeAxis::Vertical { top_row: r1.min(r2), col: c1 }
        }
    }
}

/// Edges in the order the search accepted them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpanningTree {
    pub rows: usize,
    pub cols: usize,
    pub edges: Vec<SpanningEdge>,
}

impl SpanningTree {
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Build a spanning tree over a `rows x cols` lattice rooted at `(0, 0)`.
///
/// An empty lattice yields an empty tree.
pub fn build_spanning_tree<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> SpanningTree {
    let mut tree = SpanningTree {
        rows,
        cols,
        edges: Vec::with_capacity((rows * cols).saturating_sub(1)),
    };
    if rows == 0 || cols == 0 {
        return tree;
    }

    let mut visited = vec![false; rows * cols];
    let mut stack: Vec<(usize, usize)> = Vec::with_capacity(rows * cols);
    let mut candidates: Vec<(usize, usize)> = Vec::with_capacity(DIRECTIONS.len());

    stack.push((0, 0));
    visited[0] = true;

    while let Some(&(r, c)) = stack.last() {
        candidates.clear();
        for &(dr, dc) in &DIRECTIONS {
            let (Some(nr), Some(nc)) = (r.checked_add_signed(dr), c.checked_add_signed(dc)) else {
                continue;
            };
            if nr < rows && nc < cols && !visited[nr * cols + nc] {
                candidates.push((nr, nc));
            }
        }

        if candidates.is_empty() {
            stack.pop();
            continue;
        }

        let (nr, nc) = candidates[rng.gen_range(0..candidates.len())];
        visited[nr * cols + nc] = true;
        tree.edges.push(SpanningEdge { from: (r, c), to: (nr, nc) });
        stack.push((nr, nc));
    }

    tree
}
