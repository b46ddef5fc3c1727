use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use rayon::prelude::*;

use crate::{
    foundation::{
        core::{FrameRange, ImageSize},
        error::{VredError, VredResult},
    },
    tiling::{naming::TileImageName, planner::TileGrid, planner::compute_pixel_bounds},
};

/// One rendered tile and its grid position.
#[derive(Clone, Debug)]
pub struct TileImage {
    /// 1-based tile column.
    pub tile_number_x: u32,
    /// 1-based tile row.
    pub tile_number_y: u32,
    /// Rendered pixels: either the full frame or exactly the tile's region.
    pub image: image::RgbaImage,
}

/// Options for [`assemble_directory`].
#[derive(Clone, Debug, Default)]
pub struct AssembleOptions {
    /// Only assemble these frames; every frame found when `None`.
    pub frames: Option<FrameRange>,
    /// Worker threads; rayon's default when `None`.
    pub threads: Option<usize>,
}

/// Compose the tiles of one frame into a full image.
///
/// Each tile contributes only the pixels of its own bounds, so full-frame tile renders (black
/// outside their region) and region-sized crops can be mixed. Every grid cell must be present
/// exactly once.
pub fn assemble_frame(
    tiles: &[TileImage],
    grid: TileGrid,
    size: ImageSize,
) -> VredResult<image::RgbaImage> {
    let mut out = image::RgbaImage::new(size.width, size.height);
    let mut seen = BTreeSet::new();

    for tile in tiles {
        let spec = grid.tile(tile.tile_number_x, tile.tile_number_y, size);
        let bounds = compute_pixel_bounds(&spec)?;
        if !seen.insert((tile.tile_number_y, tile.tile_number_x)) {
            return Err(VredError::tiling(format!(
                "duplicate tile {}x{}",
                tile.tile_number_y, tile.tile_number_x
            )));
        }
        if bounds.is_empty() {
            continue;
        }

        let (bw, bh) = (bounds.width(), bounds.height());
        let (left, bottom) = (bounds.left as u32, bounds.bottom as u32);
        let (ox, oy) = match tile.image.dimensions() {
            (w, h) if (w, h) == (size.width, size.height) => (left, bottom),
            (w, h) if (w, h) == (bw, bh) => (0, 0),
            (w, h) => {
                return Err(VredError::tiling(format!(
                    "tile {}x{} is {w}x{h}; expected {}x{} or {bw}x{bh}",
                    tile.tile_number_y, tile.tile_number_x, size.width, size.height
                )));
            }
        };
        for y in 0..bh {
            for x in 0..bw {
                out.put_pixel(left + x, bottom + y, *tile.image.get_pixel(ox + x, oy + y));
            }
        }
    }

    if seen.len() as u64 != grid.tile_count() {
        // Row-major scan; the first gap is at most `seen.len()` cells in.
        let (row, col) = (1..=grid.num_y_tiles)
            .flat_map(|y| (1..=grid.num_x_tiles).map(move |x| (y, x)))
            .find(|cell| !seen.contains(cell))
            .unwrap_or((grid.num_y_tiles, grid.num_x_tiles));
        return Err(VredError::tiling(format!(
            "missing tile {row}x{col} of {}x{}",
            grid.num_y_tiles, grid.num_x_tiles
        )));
    }
    Ok(out)
}

/// Assemble every frame whose tiles are found in `tiles_dir`, writing PNGs into `out_dir`.
///
/// Tile files are recognised by their `_region_` names; files for other grids are ignored.
/// Frames are assembled in parallel. Outputs are named `{prefix}-{frame:05}.png`, or
/// `{prefix}.png` for stills. Returns the written paths sorted by prefix, then frame.
#[tracing::instrument(
    skip_all,
    fields(tiles_dir = %tiles_dir.display(), out_dir = %out_dir.display())
)]
pub fn assemble_directory(
    tiles_dir: &Path,
    out_dir: &Path,
    grid: TileGrid,
    size: ImageSize,
    opts: &AssembleOptions,
) -> VredResult<Vec<PathBuf>> {
    let mut groups: BTreeMap<(String, Option<i64>), Vec<(TileImageName, PathBuf)>> =
        BTreeMap::new();
    let entries = fs::read_dir(tiles_dir)
        .with_context(|| format!("read tile dir '{}'", tiles_dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read tile dir '{}'", tiles_dir.display()))?;
        let path = entry.path();
        let Some(name) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(TileImageName::parse)
        else {
            continue;
        };
        if name.grid != grid {
            continue;
        }
        if let Some(frames) = &opts.frames
            && !name.frame.is_some_and(|f| frames.iter().any(|x| x == f))
        {
            continue;
        }
        groups
            .entry((name.prefix.clone(), name.frame))
            .or_default()
            .push((name, path));
    }

    if let Some(frames) = &opts.frames {
        for f in frames {
            if !groups.keys().any(|(_, frame)| *frame == Some(f)) {
                return Err(VredError::tiling(format!("no tiles found for frame {f}")));
            }
        }
    }
    if groups.is_empty() {
        return Err(VredError::tiling(format!(
            "no {}x{} tiles found in '{}'",
            grid.num_y_tiles,
            grid.num_x_tiles,
            tiles_dir.display()
        )));
    }

    fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

    let pool = build_thread_pool(opts.threads)?;
    let groups: Vec<_> = groups.into_iter().collect();
    let written = pool.install(|| {
        groups
            .par_iter()
            .map(|((prefix, frame), files)| -> VredResult<PathBuf> {
                let tiles = files
                    .iter()
                    .map(|(name, path)| load_tile(name, path))
                    .collect::<VredResult<Vec<_>>>()?;
                let img = assemble_frame(&tiles, grid, size)?;
                let file_name = match frame {
                    Some(f) => format!("{prefix}-{f:05}.png"),
                    None => format!("{prefix}.png"),
                };
                let out = out_dir.join(file_name);
                img.save_with_format(&out, image::ImageFormat::Png)
                    .with_context(|| format!("write '{}'", out.display()))?;
                tracing::debug!(out = %out.display(), tiles = tiles.len(), "assembled frame");
                Ok(out)
            })
            .collect::<Vec<_>>()
    });

    let written = written.into_iter().collect::<VredResult<Vec<_>>>()?;
    tracing::info!(frames = written.len(), "tile assembly done");
    Ok(written)
}

fn load_tile(name: &TileImageName, path: &Path) -> VredResult<TileImage> {
    let image = image::open(path)
        .with_context(|| format!("decode tile '{}'", path.display()))?
        .to_rgba8();
    Ok(TileImage {
        tile_number_x: name.tile_number_x,
        tile_number_y: name.tile_number_y,
        image,
    })
}

fn build_thread_pool(threads: Option<usize>) -> VredResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(VredError::validation("'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| VredError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/tiles.rs"]
mod tests;
