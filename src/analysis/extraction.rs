//! Tile extraction pipeline
//!
//! Decodes an atlas image, partitions it, then cuts, resizes, filters and
//! classifies every region. Regions are independent and processed on the
//! rayon pool; the result keeps row-major scan order. A region that cannot be
//! cut or encoded is skipped with a warning, a region without meaningful
//! content is dropped silently.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::analysis::classifier::classify_tile_by_features;
use crate::analysis::features::{extract_features, is_meaningful};
use crate::io::error::{ComposerError, Result};
use crate::io::image::{ImageDecoder, ImageDimensions, PixelBuffer, png_data_url};
use crate::spatial::partition::{GridCell, GridLayout, GridSpec, partition, resolve_grid};
use crate::spatial::tiles::Tile;

/// Everything extraction learned about one atlas image
#[derive(Debug, Clone)]
pub struct ExtractedTiles {
    /// Dimensions of the decoded image
    pub dimensions: ImageDimensions,
    /// Grid the image was partitioned with
    pub layout: GridLayout,
    /// Kept tiles in scan order
    pub tiles: Vec<Tile>,
    /// Number of regions inspected
    pub regions: usize,
    /// Original image re-encoded as PNG
    pub image_png: Vec<u8>,
}

/// Identifier of the tile cut from a grid position
pub fn tile_id(atlas_id: &str, row: u32, col: u32) -> String {
    format!("{atlas_id}_tile_{row}_{col}")
}

fn process_cell<D: ImageDecoder>(
    decoder: &D,
    image: &PixelBuffer,
    cell: &GridCell,
    tile_size: u32,
    atlas_id: &str,
) -> Option<Tile> {
    let pixels = match decoder.extract_region(image, &cell.rect, tile_size) {
        Ok(pixels) => pixels,
        Err(e) => {
            warn!(row = cell.row, col = cell.col, error = %e, "skipping region");
            return None;
        }
    };

    if !is_meaningful(&pixels) {
        debug!(row = cell.row, col = cell.col, "dropping region without meaningful content");
        return None;
    }

    let features = extract_features(&pixels);
    let classification = classify_tile_by_features(&features);

    let png = match decoder.encode_png(&pixels) {
        Ok(png) => png,
        Err(e) => {
            warn!(row = cell.row, col = cell.col, error = %e, "skipping unencodable region");
            return None;
        }
    };

    Some(Tile {
        id: tile_id(atlas_id, cell.row, cell.col),
        row: cell.row,
        col: cell.col,
        source_rect: cell.rect,
        classification: classification.tile_type,
        confidence: classification.confidence,
        image_data: png_data_url(&png),
        pixels,
    })
}

/// Slice, filter and classify the tiles of an encoded atlas image
///
/// # Errors
///
/// Returns an error if:
/// - The image bytes cannot be decoded
/// - The grid specification cannot partition the image
/// - No region contains meaningful content
/// - The original image cannot be re-encoded
pub fn extract_tiles<D: ImageDecoder + Sync>(
    decoder: &D,
    bytes: &[u8],
    grid: GridSpec,
    tile_size: u32,
    atlas_id: &str,
) -> Result<ExtractedTiles> {
    let image = decoder.decode(bytes)?;
    let dimensions = ImageDimensions {
        width: image.width(),
        height: image.height(),
    };
    let layout = resolve_grid(dimensions.width, dimensions.height, grid)?;
    let cells = partition(&layout);

    let tiles: Vec<Tile> = cells
        .par_iter()
        .filter_map(|cell| process_cell(decoder, &image, cell, tile_size, atlas_id))
        .collect();

    if tiles.is_empty() {
        return Err(ComposerError::NoMeaningfulTiles {
            regions: cells.len(),
        });
    }

    info!(
        atlas = atlas_id,
        cols = layout.cols,
        rows = layout.rows,
        kept = tiles.len(),
        regions = cells.len(),
        "extracted tiles"
    );

    let image_png = decoder.encode_png(&image)?;

    Ok(ExtractedTiles {
        dimensions,
        layout,
        tiles,
        regions: cells.len(),
        image_png,
    })
}
