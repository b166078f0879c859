use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
use log::info;

use crate::error::ExportError;
use crate::terrain::{Cell, GenerationResult};

pub const WALL_COLOR: [u8; 3] = [0, 0, 0];
pub const PATH_COLOR: [u8; 3] = [255, 255, 255];

pub fn cell_color(cell: Cell) -> [u8; 3] {
    match cell {
        Cell::Wall => WALL_COLOR,
        Cell::Path => PATH_COLOR,
    }
}

/// Render the terrain 1:1, one image pixel per grid cell.
pub fn render_image(result: &GenerationResult) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::new(result.width as u32, result.height as u32);

    for (x, y, &cell) in result.grid.iter() {
        img.put_pixel(x as u32, y as u32, Rgb(cell_color(cell)));
    }

    img
}

/// Encode the terrain as PNG bytes in memory.
pub fn encode_png(result: &GenerationResult) -> Result<Vec<u8>, ExportError> {
    let img = render_image(result);
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// `topology-terrain-<width>x<height>.png`
pub fn export_file_name(result: &GenerationResult) -> String {
    format!("topology-terrain-{}x{}.png", result.width, result.height)
}

/// Write the terrain PNG into `dir` and return the full path.
pub fn export_png(result: &GenerationResult, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let path = dir.join(export_file_name(result));
    fs::write(&path, encode_png(result)?)?;

    info!("Exported {}x{} terrain to {}", result.width, result.height, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainConfig;
    use crate::terrain::generate_seeded;

    #[test]
    fn test_render_image_matches_grid() {
        let result = generate_seeded(&TerrainConfig::new(57, 33, 40), 9);
        let img = render_image(&result);

        assert_eq!(img.dimensions(), (57, 33));
        for (x, y, &cell) in result.grid.iter() {
            assert_eq!(img.get_pixel(x as u32, y as u32).0, cell_color(cell));
        }
        assert!(img.pixels().all(|p| p.0 == WALL_COLOR || p.0 == PATH_COLOR));
    }

    #[test]
    fn test_png_round_trip_keeps_pixels() {
        let result = generate_seeded(&TerrainConfig::new(129, 129, 50), 42);
        let bytes = encode_png(&result).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .unwrap()
            .to_rgb8();
        assert_eq!(decoded, render_image(&result));
    }

    #[test]
    fn test_export_file_name() {
        let result = generate_seeded(&TerrainConfig::new(200, 80, 50), 1);
        assert_eq!(export_file_name(&result), "topology-terrain-200x80.png");
    }

    #[test]
    fn test_export_png_writes_file() {
        let dir = std::env::temp_dir().join(format!("topology-terrain-test-{}", std::process::id()));
        let result = generate_seeded(&TerrainConfig::new(30, 40, 100), 2);

        let path = export_png(&result, &dir).unwrap();
        assert!(path.ends_with("topology-terrain-30x40.png"));
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (30, 40));

        fs::remove_dir_all(&dir).unwrap();
    }
}
