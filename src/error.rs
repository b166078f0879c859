//! Error types for the fallible edges of the crate.
//!
//! Terrain generation itself is total; only file I/O, image encoding,
//! the display window and the lore service can fail.

use thiserror::Error;

/// Errors loading a terrain configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors encoding or writing an exported raster.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the interactive display surface.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("window error: {0}")]
    Window(#[from] minifb::Error),
    #[error("async runtime unavailable: {0}")]
    Runtime(#[source] std::io::Error),
}
