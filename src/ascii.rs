//! ASCII preview of a terrain for terminals without a display.

use crate::terrain::GenerationResult;

pub const WALL_CHAR: char = '#';
pub const PATH_CHAR: char = ' ';

/// Integer downsampling factor so the preview fits in `max_columns`.
pub fn downsample_factor(width: usize, max_columns: usize) -> usize {
    let max_columns = max_columns.max(1);
    width.div_ceil(max_columns).max(1)
}

/// Render the grid as text, one line per row.
///
/// Terrains wider than `max_columns` are shrunk by an integer factor on both
/// axes. A block that contains any path pixel is drawn as path so 1-pixel
/// bridges remain visible.
pub fn render_ascii(result: &GenerationResult, max_columns: usize) -> String {
    let factor = downsample_factor(result.width, max_columns);
    let out_w = result.width.div_ceil(factor);
    let out_h = result.height.div_ceil(factor);

    let mut text = String::with_capacity((out_w + 1) * out_h);
    for by in 0..out_h {
        for bx in 0..out_w {
            let mut y_range = by * factor..((by + 1) * factor).min(result.height);
            let open = y_range.any(|y| {
                let row = result.grid.row(y);
                row[bx * factor..((bx + 1) * factor).min(result.width)]
                    .iter()
                    .any(|c| c.is_path())
            });
            text.push(if open { PATH_CHAR } else { WALL_CHAR });
        }
        text.push('\n');
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainConfig;
    use crate::terrain::generate_seeded;

    #[test]
    fn test_full_resolution_preview() {
        let result = generate_seeded(&TerrainConfig::new(20, 20, 100), 4);
        let text = render_ascii(&result, 80);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 20);
        assert!(lines.iter().all(|l| l.chars().count() == 20));
        for (x, y, &cell) in result.grid.iter() {
            let ch = lines[y].chars().nth(x).unwrap();
            assert_eq!(ch == PATH_CHAR, cell.is_path());
        }
    }

    #[test]
    fn test_downsampled_preview_fits() {
        let result = generate_seeded(&TerrainConfig::new(250, 60, 50), 4);
        assert_eq!(downsample_factor(250, 80), 4);

        let text = render_ascii(&result, 80);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 15);
        assert!(lines.iter().all(|l| l.chars().count() <= 80));
        assert!(text.contains(PATH_CHAR));
        assert!(text.contains(WALL_CHAR));
    }

    #[test]
    fn test_factor_never_zero() {
        assert_eq!(downsample_factor(10, 0), 10);
        assert_eq!(downsample_factor(0, 80), 1);
    }
}
