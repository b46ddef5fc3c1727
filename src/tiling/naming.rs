use std::fmt;

use crate::tiling::planner::TileGrid;

/// Marker inserted into output file names of region (tile) renders.
pub const RENDER_REGION_FIELD_NAME: &str = "_region_";

/// Output-name suffix for one tile: `_region_{Y}x{X}_{NY}x{NX}`.
pub fn region_suffix(tile_number_x: u32, tile_number_y: u32, grid: TileGrid) -> String {
    format!(
        "{RENDER_REGION_FIELD_NAME}{tile_number_y}x{tile_number_x}_{}x{}",
        grid.num_y_tiles, grid.num_x_tiles
    )
}

/// Decomposed file name of a rendered tile image.
///
/// Shape: `{prefix}_region_{Y}x{X}_{NY}x{NX}[-{frame}].{extension}`, where the frame number is
/// appended by the renderer for animation output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileImageName {
    /// Output file-name prefix chosen at submission.
    pub prefix: String,
    /// 1-based tile column.
    pub tile_number_x: u32,
    /// 1-based tile row.
    pub tile_number_y: u32,
    /// Grid the tile belongs to.
    pub grid: TileGrid,
    /// Frame number, when present.
    pub frame: Option<i64>,
    /// File extension without the dot.
    pub extension: String,
}

impl TileImageName {
    /// Parse a bare file name; returns `None` for anything that is not a tile image.
    pub fn parse(file_name: &str) -> Option<Self> {
        let (stem, extension) = file_name.rsplit_once('.')?;
        let (head, frame) = match stem.rsplit_once('-') {
            Some((head, digits))
                if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) =>
            {
                (head, Some(digits.parse::<i64>().ok()?))
            }
            _ => (stem, None),
        };

        let at = head.rfind(RENDER_REGION_FIELD_NAME)?;
        let prefix = &head[..at];
        let coords = &head[at + RENDER_REGION_FIELD_NAME.len()..];
        let (tile, grid) = coords.split_once('_')?;
        let (tile_y, tile_x) = parse_pair(tile)?;
        let (num_y, num_x) = parse_pair(grid)?;
        let grid = TileGrid::new(num_x, num_y).ok()?;
        if tile_x == 0 || tile_x > num_x || tile_y == 0 || tile_y > num_y {
            return None;
        }

        Some(Self {
            prefix: prefix.to_string(),
            tile_number_x: tile_x,
            tile_number_y: tile_y,
            grid,
            frame,
            extension: extension.to_string(),
        })
    }
}

impl fmt::Display for TileImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.prefix,
            region_suffix(self.tile_number_x, self.tile_number_y, self.grid)
        )?;
        if let Some(frame) = self.frame {
            write!(f, "-{frame:05}")?;
        }
        write!(f, ".{}", self.extension)
    }
}

fn parse_pair(s: &str) -> Option<(u32, u32)> {
    let (a, b) = s.split_once('x')?;
    Some((a.parse().ok()?, b.parse().ok()?))
}

#[cfg(test)]
#[path = "../../tests/unit/tiling/naming.rs"]
mod tests;
