//! Atlas grid partitioning
//!
//! Turns image dimensions plus a grid specification into the per-tile source
//! rectangles, in row-major scan order. Auto detection tries a fixed list of
//! square grids and keeps the first one that divides the image cleanly into
//! reasonably sized tiles.

use serde::{Deserialize, Serialize};

use crate::io::configuration::{
    AUTO_GRID_CANDIDATES, AUTO_GRID_FALLBACK, AUTO_GRID_MAX_TILE, AUTO_GRID_MIN_TILE,
    MAX_GRID_DIVISIONS,
};
use crate::io::error::{Result, invalid_grid};

/// How an atlas image should be divided into tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GridSpec {
    /// Caller-chosen column and row counts
    Custom {
        /// Number of tile columns
        cols: u32,
        /// Number of tile rows
        rows: u32,
    },
    /// Named layout picked from a preset list, carried as explicit counts
    Preset {
        /// Number of tile columns
        cols: u32,
        /// Number of tile rows
        rows: u32,
    },
    /// Detect the layout from the image dimensions
    Auto,
}

/// Resolved grid: counts plus the pixel size of one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayout {
    /// Number of tile columns
    pub cols: u32,
    /// Number of tile rows
    pub rows: u32,
    /// Width of one tile in source pixels
    pub tile_width: u32,
    /// Height of one tile in source pixels
    pub tile_height: u32,
}

impl GridLayout {
    /// Total number of partition cells
    pub const fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

/// Axis-aligned source rectangle inside the atlas image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRect {
    /// Left edge in pixels
    pub x: u32,
    /// Top edge in pixels
    pub y: u32,
    /// Width in pixels
    #[serde(rename = "w")]
    pub width: u32,
    /// Height in pixels
    #[serde(rename = "h")]
    pub height: u32,
}

impl SourceRect {
    /// Check whether the rectangle lies entirely inside an image
    pub const fn fits_within(&self, image_width: u32, image_height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x as u64 + self.width as u64 <= image_width as u64
            && self.y as u64 + self.height as u64 <= image_height as u64
    }
}

/// One partition cell with its grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    /// Row index in the atlas grid
    pub row: u32,
    /// Column index in the atlas grid
    pub col: u32,
    /// Source pixels covered by the cell
    pub rect: SourceRect,
}

impl GridSpec {
    /// Parse a CLI-style grid string: `auto` or `<cols>x<rows>`
    ///
    /// # Errors
    ///
    /// Returns `InvalidGrid` when the string is neither form
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }

        let (cols, rows) = trimmed
            .split_once(['x', 'X'])
            .ok_or_else(|| invalid_grid(&format!("expected 'auto' or '<cols>x<rows>', got '{text}'")))?;
        let cols = cols
            .trim()
            .parse::<u32>()
            .map_err(|e| invalid_grid(&format!("bad column count '{cols}': {e}")))?;
        let rows = rows
            .trim()
            .parse::<u32>()
            .map_err(|e| invalid_grid(&format!("bad row count '{rows}': {e}")))?;

        Ok(Self::Custom { cols, rows })
    }
}

/// Resolve a grid specification against concrete image dimensions
///
/// # Errors
///
/// Returns `InvalidGrid` if the image is empty, the counts are zero or too
/// large, or the resulting tiles would be zero pixels wide
pub fn resolve_grid(image_width: u32, image_height: u32, spec: GridSpec) -> Result<GridLayout> {
    if image_width == 0 || image_height == 0 {
        return Err(invalid_grid(&format!(
            "image has no pixels ({image_width}x{image_height})"
        )));
    }

    match spec {
        GridSpec::Auto => Ok(detect_optimal_grid(image_width, image_height)),
        GridSpec::Custom { cols, rows } | GridSpec::Preset { cols, rows } => {
            if cols == 0 || rows == 0 || cols > MAX_GRID_DIVISIONS || rows > MAX_GRID_DIVISIONS {
                return Err(invalid_grid(&format!(
                    "{cols}x{rows} grid must have between 1 and {MAX_GRID_DIVISIONS} columns and rows"
                )));
            }

            let tile_width = image_width / cols;
            let tile_height = image_height / rows;
            if tile_width == 0 || tile_height == 0 {
                return Err(invalid_grid(&format!(
                    "{cols}x{rows} grid is finer than the {image_width}x{image_height} image"
                )));
            }

            Ok(GridLayout {
                cols,
                rows,
                tile_width,
                tile_height,
            })
        }
    }
}

/// Pick the first common square grid that divides the image exactly
///
/// Falls back to a 4x4 grid with floor division when no candidate both
/// divides cleanly and yields tiles within the accepted size range.
pub fn detect_optimal_grid(image_width: u32, image_height: u32) -> GridLayout {
    let accepted = |side: u32| (AUTO_GRID_MIN_TILE..=AUTO_GRID_MAX_TILE).contains(&side);

    AUTO_GRID_CANDIDATES
        .iter()
        .find_map(|&divisions| {
            let tile_width = image_width / divisions;
            let tile_height = image_height / divisions;
            let exact = image_width % divisions == 0 && image_height % divisions == 0;
            (exact && accepted(tile_width) && accepted(tile_height)).then_some(GridLayout {
                cols: divisions,
                rows: divisions,
                tile_width,
                tile_height,
            })
        })
        .unwrap_or(GridLayout {
            cols: AUTO_GRID_FALLBACK,
            rows: AUTO_GRID_FALLBACK,
            tile_width: image_width / AUTO_GRID_FALLBACK,
            tile_height: image_height / AUTO_GRID_FALLBACK,
        })
}

/// Enumerate partition cells in row-major order
pub fn partition(layout: &GridLayout) -> Vec<GridCell> {
    let mut cells = Vec::with_capacity(layout.cell_count());
    for row in 0..layout.rows {
        for col in 0..layout.cols {
            cells.push(GridCell {
                row,
                col,
                rect: SourceRect {
                    x: col * layout.tile_width,
                    y: row * layout.tile_height,
                    width: layout.tile_width,
                    height: layout.tile_height,
                },
            });
        }
    }
    cells
}
