//! Composition constants and runtime configuration defaults

use crate::io::error::{ComposerError, Result, invalid_parameter};

// Map size limits, rejected eagerly rather than guarded by a deadline
/// Smallest accepted map width or height in cells
pub const MIN_MAP_DIMENSION: usize = 5;
/// Largest accepted map width or height in cells
pub const MAX_MAP_DIMENSION: usize = 200;

/// Smallest accepted output tile size in pixels
pub const MIN_TILE_SIZE: u32 = 8;
/// Largest accepted output tile size in pixels
pub const MAX_TILE_SIZE: u32 = 128;

// Auto grid detection
/// Smallest tile edge accepted by auto grid detection
pub const AUTO_GRID_MIN_TILE: u32 = 8;
/// Largest tile edge accepted by auto grid detection
pub const AUTO_GRID_MAX_TILE: u32 = 128;
/// Square grids tried by auto detection, in priority order
pub const AUTO_GRID_CANDIDATES: [u32; 7] = [16, 8, 4, 2, 32, 12, 6];
/// Grid used when no candidate divides the image cleanly
pub const AUTO_GRID_FALLBACK: u32 = 4;
/// Largest accepted explicit column or row count
pub const MAX_GRID_DIVISIONS: u32 = 256;

// Pixel feature thresholds on a 0-255 scale
/// Brightness delta between consecutive pixels that counts as an edge
pub const EDGE_BRIGHTNESS_DELTA: f64 = 30.0;
/// Mean alpha a tile must exceed to be kept
pub const MEANINGFUL_MIN_ALPHA: f64 = 50.0;
/// Mean distance from mid-gray a tile must exceed to be kept
pub const MEANINGFUL_MIN_CONTRAST: f64 = 5.0;

// Classifier confidence
/// Confidence every classification starts from
pub const BASE_CONFIDENCE: f64 = 0.5;
/// Lower clamp for computed confidence
pub const MIN_CONFIDENCE: f64 = 0.1;
/// Upper clamp for computed confidence
pub const MAX_CONFIDENCE: f64 = 1.0;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default map width in cells
pub const DEFAULT_MAP_WIDTH: usize = 20;
/// Default map height in cells
pub const DEFAULT_MAP_HEIGHT: usize = 20;
/// Default output tile size in pixels
pub const DEFAULT_TILE_SIZE: u32 = 32;

// Preview rendering
/// Largest preview canvas in pixels; cells shrink below the tile size to fit
pub const MAX_PREVIEW_PIXELS: u64 = 4096 * 4096;

// Output settings
/// Suffix added to generated map documents
pub const MAP_SUFFIX: &str = "_map";
/// Suffix added to atlas documents
pub const ATLAS_SUFFIX: &str = "_atlas";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Number of pipeline stages reported per file
pub const PIPELINE_STAGES: usize = 3;

/// Bounds every generation and extraction request is validated against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationLimits {
    /// Smallest accepted map width or height
    pub min_dimension: usize,
    /// Largest accepted map width or height
    pub max_dimension: usize,
    /// Smallest accepted tile size
    pub min_tile_size: u32,
    /// Largest accepted tile size
    pub max_tile_size: u32,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            min_dimension: MIN_MAP_DIMENSION,
            max_dimension: MAX_MAP_DIMENSION,
            min_tile_size: MIN_TILE_SIZE,
            max_tile_size: MAX_TILE_SIZE,
        }
    }
}

impl GenerationLimits {
    /// Check that a map size lies within the configured bounds
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if either side is zero or out of bounds
    pub fn check_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if self.accepts_dimension(width) && self.accepts_dimension(height) {
            Ok(())
        } else {
            Err(ComposerError::InvalidDimensions {
                width,
                height,
                min: self.min_dimension,
                max: self.max_dimension,
            })
        }
    }

    const fn accepts_dimension(&self, side: usize) -> bool {
        side > 0 && side >= self.min_dimension && side <= self.max_dimension
    }

    /// Check that a tile size lies within the configured bounds
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming `tile_size` when out of bounds
    pub fn check_tile_size(&self, tile_size: u32) -> Result<()> {
        if tile_size >= self.min_tile_size && tile_size <= self.max_tile_size {
            Ok(())
        } else {
            Err(invalid_parameter(
                "tile_size",
                &tile_size,
                &format!(
                    "must be within [{}, {}]",
                    self.min_tile_size, self.max_tile_size
                ),
            ))
        }
    }
}
