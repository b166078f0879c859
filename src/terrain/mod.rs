//! Maze terrain generation.
//!
//! Turns a [`TerrainConfig`] into a binary wall/path grid in three stages:
//!
//! 1. [`lattice`]: derive room size, coarse rows/cols and centring offsets
//! 2. [`spanning`]: grow a random spanning tree over the coarse cells
//! 3. [`raster`]: paint one room per cell and one bridge per tree edge
//!
//! Every path pixel ends up in a single 4-connected region. Generation is
//! synchronous and pure apart from the injected random source.
//!
//! # Usage
//!
//! ```
//! use topology_terrain::config::TerrainConfig;
//! use topology_terrain::terrain::generate_seeded;
//!
//! let result = generate_seeded(&TerrainConfig::new(129, 129, 50), 42);
//! assert_eq!((result.width, result.height), (129, 129));
//! ```

pub mod analysis;
pub mod lattice;
pub mod raster;
pub mod spanning;

pub use analysis::{analyze, TopologyReport};
pub use lattice::{Lattice, PixelRect};
pub use spanning::{build_spanning_tree, SpanningEdge, SpanningTree};

use log::{debug, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::TerrainConfig;
use crate::tilemap::Tilemap;

/// State of one pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Wall,
    Path,
}

impl Cell {
    pub fn is_path(self) -> bool {
        self == Cell::Path
    }
}

/// A finished terrain. Never mutated after [`generate`] returns it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationResult {
    pub grid: Tilemap<Cell>,
    pub width: usize,
    pub height: usize,
    lattice: Lattice,
    edge_count: usize,
}

impl GenerationResult {
    /// Geometry the grid was rasterized from.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Number of spanning edges, which equals the number of bridges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        *self.grid.get(x, y)
    }
}

/// Generate a terrain for `config` using `rng` for the spanning tree.
pub fn generate<R: Rng + ?Sized>(config: &TerrainConfig, rng: &mut R) -> GenerationResult {
    generate_in_lattice(Lattice::from_config(config), rng)
}

/// Generate a terrain with a ChaCha8 stream seeded from `seed`.
pub fn generate_seeded(config: &TerrainConfig, seed: u64) -> GenerationResult {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate(config, &mut rng)
}

/// Generate directly from precomputed geometry.
///
/// Lets callers pick a room size outside the density mapping, including
/// sizes too large for the canvas, which produce an all-wall grid.
pub fn generate_in_lattice<R: Rng + ?Sized>(lattice: Lattice, rng: &mut R) -> GenerationResult {
    debug!(
        "Lattice {}x{} rooms of {}px on {}x{} canvas (offset {}, {})",
        lattice.cols, lattice.rows, lattice.room_size, lattice.width, lattice.height,
        lattice.offset_x, lattice.offset_y
    );
    if lattice.is_degenerate() {
        warn!(
            "Room size {} leaves no room on a {}x{} canvas; terrain is solid wall",
            lattice.room_size, lattice.width, lattice.height
        );
    }

    let tree = build_spanning_tree(lattice.rows, lattice.cols, rng);
    let grid = raster::rasterize(&lattice, &tree);

    GenerationResult {
        width: lattice.width,
        height: lattice.height,
        grid,
        lattice,
        edge_count: tree.edge_count(),
    }
}
