use crate::foundation::{
    core::ImageSize,
    error::{VredError, VredResult},
};

/// Tiling configuration for one render task: the grid, the cell to render, and the full image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TileSpec {
    /// Number of tile columns.
    pub num_x_tiles: u32,
    /// Number of tile rows.
    pub num_y_tiles: u32,
    /// 1-based column of the tile to render.
    pub tile_number_x: u32,
    /// 1-based row of the tile to render.
    pub tile_number_y: u32,
    /// Full image width in pixels.
    pub image_width: u32,
    /// Full image height in pixels.
    pub image_height: u32,
}

impl TileSpec {
    /// Check the grid/tile/image preconditions of [`compute_pixel_bounds`].
    pub fn validate(&self) -> VredResult<()> {
        if self.num_x_tiles == 0 || self.num_y_tiles == 0 {
            return Err(VredError::tiling(format!(
                "tile counts must be > 0, got {}x{}",
                self.num_x_tiles, self.num_y_tiles
            )));
        }
        if self.image_width == 0 || self.image_height == 0 {
            return Err(VredError::tiling(format!(
                "image dimensions must be > 0, got {}x{}",
                self.image_width, self.image_height
            )));
        }
        if !(1..=self.num_x_tiles).contains(&self.tile_number_x) {
            return Err(VredError::tiling(format!(
                "tile number x {} outside 1..={}",
                self.tile_number_x, self.num_x_tiles
            )));
        }
        if !(1..=self.num_y_tiles).contains(&self.tile_number_y) {
            return Err(VredError::tiling(format!(
                "tile number y {} outside 1..={}",
                self.tile_number_y, self.num_y_tiles
            )));
        }
        Ok(())
    }
}

/// Inclusive 0-based pixel rectangle of a tile; rows count from the top of the image.
///
/// A tile of a grid finer than the image can be empty (`right == left - 1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PixelBounds {
    /// First column.
    pub left: i64,
    /// Last column.
    pub right: i64,
    /// First row.
    pub bottom: i64,
    /// Last row.
    pub top: i64,
}

impl PixelBounds {
    /// Number of columns covered.
    pub fn width(&self) -> u32 {
        u32::try_from(self.right - self.left + 1).unwrap_or(0)
    }

    /// Number of rows covered.
    pub fn height(&self) -> u32 {
        u32::try_from(self.top - self.bottom + 1).unwrap_or(0)
    }

    /// True when the tile covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Pixel rectangle of the tile described by `spec`.
///
/// The image is split into `num_x_tiles` columns of `image_width / num_x_tiles` pixels (and
/// likewise for rows); the division remainder goes entirely to the last column and last row.
pub fn compute_pixel_bounds(spec: &TileSpec) -> VredResult<PixelBounds> {
    spec.validate()?;

    let (nx, ny) = (i64::from(spec.num_x_tiles), i64::from(spec.num_y_tiles));
    let (tx, ty) = (i64::from(spec.tile_number_x), i64::from(spec.tile_number_y));
    let (w, h) = (i64::from(spec.image_width), i64::from(spec.image_height));

    let (delta_x, width_remainder) = (w.div_euclid(nx), w.rem_euclid(nx));
    let (delta_y, height_remainder) = (h.div_euclid(ny), h.rem_euclid(ny));

    let mut bounds = PixelBounds {
        left: delta_x * (tx - 1),
        right: delta_x * tx - 1,
        bottom: delta_y * (ty - 1),
        top: delta_y * ty - 1,
    };
    if tx == nx {
        bounds.right += width_remainder;
    }
    if ty == ny {
        bounds.top += height_remainder;
    }
    Ok(bounds)
}

/// Convert pixel bounds into the ray-tracing region rectangle, normalized to `[0, 1]`.
///
/// The ray-tracing region is addressed bottom-up, so the vertical axis is flipped:
/// `y0 = 1 - top / height`, `y1 = 1 - bottom / height`. The horizontal axis is a plain
/// division by the width.
pub fn to_normalized_raytracing_region(
    bounds: &PixelBounds,
    image_width: u32,
    image_height: u32,
) -> VredResult<kurbo::Rect> {
    if image_width == 0 || image_height == 0 {
        return Err(VredError::tiling(format!(
            "cannot normalize a region against a {image_width}x{image_height} image"
        )));
    }
    let (w, h) = (f64::from(image_width), f64::from(image_height));
    Ok(kurbo::Rect::new(
        bounds.left as f64 / w,
        1.0 - bounds.top as f64 / h,
        bounds.right as f64 / w,
        1.0 - bounds.bottom as f64 / h,
    ))
}

/// A tile grid over a fixed image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TileGrid {
    /// Number of tile columns.
    pub num_x_tiles: u32,
    /// Number of tile rows.
    pub num_y_tiles: u32,
}

impl TileGrid {
    /// Build a grid, rejecting zero counts.
    pub fn new(num_x_tiles: u32, num_y_tiles: u32) -> VredResult<Self> {
        if num_x_tiles == 0 || num_y_tiles == 0 {
            return Err(VredError::tiling(format!(
                "tile counts must be > 0, got {num_x_tiles}x{num_y_tiles}"
            )));
        }
        Ok(Self {
            num_x_tiles,
            num_y_tiles,
        })
    }

    /// Total number of tiles.
    pub fn tile_count(&self) -> u64 {
        u64::from(self.num_x_tiles) * u64::from(self.num_y_tiles)
    }

    /// Spec of the tile at 1-based `(tile_number_x, tile_number_y)`.
    pub fn tile(&self, tile_number_x: u32, tile_number_y: u32, size: ImageSize) -> TileSpec {
        TileSpec {
            num_x_tiles: self.num_x_tiles,
            num_y_tiles: self.num_y_tiles,
            tile_number_x,
            tile_number_y,
            image_width: size.width,
            image_height: size.height,
        }
    }

    /// Every tile of the grid, row by row from the top-left.
    pub fn tiles(&self, size: ImageSize) -> impl Iterator<Item = TileSpec> + '_ {
        (1..=self.num_y_tiles)
            .flat_map(move |y| (1..=self.num_x_tiles).map(move |x| self.tile(x, y, size)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tiling/planner.rs"]
mod tests;
