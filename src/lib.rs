//! Topology terrain library
//!
//! Generates maze-like wall/path bitmaps whose open areas form a single
//! connected region, and provides the renderers, exporters and lore client
//! used by the binaries.

pub mod ascii;
pub mod config;
pub mod error;
pub mod export;
pub mod lore;
pub mod terrain;
pub mod tilemap;
pub mod viewer;
