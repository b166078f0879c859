//! Terrain configuration and the density-to-geometry mapping.
//!
//! Configuration values are never rejected. Width and height are floored at
//! [`MIN_DIMENSION`] and density is clamped into `0..=100` when geometry is
//! derived, so every configuration maps to a valid lattice.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::lore::LlmConfig;

/// Smallest canvas edge, in pixels.
pub const MIN_DIMENSION: usize = 20;
/// Room edge at density 0.
pub const MAX_ROOM_SIZE: usize = 12;
/// Room edge floor, reached at density 100.
pub const MIN_ROOM_SIZE: usize = 4;
/// Highest density value.
pub const MAX_DENSITY: u32 = 100;

/// Display zoom range offered by the viewer.
pub const MIN_ZOOM: usize = 1;
pub const MAX_ZOOM: usize = 16;

/// Requested terrain dimensions and wall density.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Output width in pixels
    pub width: usize,
    /// Output height in pixels
    pub height: usize,
    /// Wall density, 0 (large rooms) to 100 (small rooms)
    pub density: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 129,
            height: 129,
            density: 50,
        }
    }
}

impl TerrainConfig {
    pub fn new(width: usize, height: usize, density: u32) -> Self {
        Self { width, height, density }
    }

    /// Canvas width after applying the minimum.
    pub fn actual_width(&self) -> usize {
        self.width.max(MIN_DIMENSION)
    }

    /// Canvas height after applying the minimum.
    pub fn actual_height(&self) -> usize {
        self.height.max(MIN_DIMENSION)
    }

    pub fn clamped_density(&self) -> u32 {
        self.density.min(MAX_DENSITY)
    }

    /// Edge length of one room in pixels.
    pub fn room_size(&self) -> usize {
        room_size_for_density(self.density)
    }

    /// Copy with density moved by `delta`, staying inside `0..=100`.
    pub fn with_density_delta(&self, delta: i32) -> Self {
        let density = (self.clamped_density() as i32 + delta).clamp(0, MAX_DENSITY as i32) as u32;
        Self { density, ..*self }
    }
}

/// `max(4, floor(12 - density/100 * 8))`, evaluated in integers.
///
/// `12 - d*8/100` is never negative for `d <= 100`, so flooring the integer
/// quotient matches flooring the real value.
pub fn room_size_for_density(density: u32) -> usize {
    let density = density.min(MAX_DENSITY) as usize;
    let shrink = (density * (MAX_ROOM_SIZE - MIN_ROOM_SIZE) + 99) / 100;
    (MAX_ROOM_SIZE - shrink).max(MIN_ROOM_SIZE)
}

/// Everything a run can be configured with from a file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainFile {
    pub terrain: TerrainConfig,
    /// Seed for reproducible output; random when absent
    pub seed: Option<u64>,
    /// Viewer magnification
    pub zoom: usize,
    pub lore: LlmConfig,
}

impl Default for TerrainFile {
    fn default() -> Self {
        Self {
            terrain: TerrainConfig::default(),
            seed: None,
            zoom: 4,
            lore: LlmConfig::default(),
        }
    }
}

impl TerrainFile {
    pub fn from_json(text: &str, path: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_json(&text, &display)
    }

    pub fn clamped_zoom(&self) -> usize {
        self.zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference formula computed in floating point.
    fn room_size_float(density: u32) -> usize {
        let raw = (12.0 - (density as f64 / 100.0) * 8.0).floor();
        (raw as usize).max(4)
    }

    #[test]
    fn test_room_size_endpoints() {
        assert_eq!(room_size_for_density(0), 12);
        assert_eq!(room_size_for_density(50), 8);
        assert_eq!(room_size_for_density(100), 4);
    }

    #[test]
    fn test_room_size_matches_formula_and_is_monotonic() {
        let mut previous = usize::MAX;
        for density in 0..=100 {
            let size = room_size_for_density(density);
            assert_eq!(size, room_size_float(density), "density {}", density);
            assert!(size <= previous, "room size grew at density {}", density);
            assert!((MIN_ROOM_SIZE..=MAX_ROOM_SIZE).contains(&size));
            previous = size;
        }
    }

    #[test]
    fn test_out_of_range_density_is_clamped() {
        assert_eq!(room_size_for_density(250), 4);
        let config = TerrainConfig::new(10, 10, 400);
        assert_eq!(config.clamped_density(), 100);
        assert_eq!(config.with_density_delta(-5).density, 95);
        assert_eq!(TerrainConfig::new(10, 10, 2).with_density_delta(-5).density, 0);
    }

    #[test]
    fn test_dimensions_are_floored() {
        let config = TerrainConfig::new(5, 0, 50);
        assert_eq!(config.actual_width(), 20);
        assert_eq!(config.actual_height(), 20);
        assert_eq!(TerrainConfig::new(300, 21, 0).actual_width(), 300);
    }

    #[test]
    fn test_terrain_file_partial_json_uses_defaults() {
        let file = TerrainFile::from_json(
            r#"{ "terrain": { "width": 200 }, "seed": 7, "zoom": 40 }"#,
            "inline",
        )
        .unwrap();

        assert_eq!(file.terrain.width, 200);
        assert_eq!(file.terrain.height, 129);
        assert_eq!(file.terrain.density, 50);
        assert_eq!(file.seed, Some(7));
        assert_eq!(file.clamped_zoom(), 16);
        assert_eq!(file.lore.temperature, LlmConfig::default().temperature);
    }

    #[test]
    fn test_terrain_file_reports_bad_json() {
        let err = TerrainFile::from_json("{ not json", "broken.json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_terrain_file_missing_path() {
        let err = TerrainFile::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
