//! Error taxonomy for extraction, composition and store operations

use std::fmt;
use std::path::PathBuf;

/// Broad category of a failure, used by outer layers to pick a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input shape or range, reported back with the offending field
    Validation,
    /// Lookup of an unknown atlas, map or tile id
    NotFound,
    /// Decode, extraction or composition failure with internal detail
    Processing,
}

impl ErrorKind {
    /// Status code an HTTP boundary would surface for this category
    pub const fn status_code(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::NotFound => 404,
            Self::Processing => 500,
        }
    }
}

/// Main error type for all tile extraction and map composition operations
#[derive(Debug)]
pub enum ComposerError {
    /// Image bytes could not be decoded
    ImageDecode {
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Pixel buffer could not be encoded as PNG
    ImageEncode {
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// Request parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Requested map dimensions are outside the configured bounds
    InvalidDimensions {
        /// Requested width in cells
        width: usize,
        /// Requested height in cells
        height: usize,
        /// Smallest accepted dimension
        min: usize,
        /// Largest accepted dimension
        max: usize,
    },

    /// Grid specification cannot partition the image
    InvalidGrid {
        /// Description of what's wrong with the grid
        reason: String,
    },

    /// No atlas stored under the given id
    AtlasNotFound {
        /// The requested atlas id
        id: String,
    },

    /// No map stored under the given id
    MapNotFound {
        /// The requested map id
        id: String,
    },

    /// Atlas exists but holds no tile with the given id
    TileNotFound {
        /// Atlas that was searched
        atlas_id: String,
        /// The requested tile id
        tile_id: String,
    },

    /// Partition rectangle reaches outside the decoded image
    RegionOutOfBounds {
        /// Rectangle as (x, y, width, height)
        region: (u32, u32, u32, u32),
        /// Image dimensions as (width, height)
        image: (u32, u32),
    },

    /// Every region failed the meaningful-content test
    NoMeaningfulTiles {
        /// Number of regions that were inspected
        regions: usize,
    },

    /// No tile of any classification is available while floors are required
    EmptyTilePool {
        /// Environment the map was being composed for
        environment: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Document could not be serialized
    Serialization {
        /// Underlying JSON error
        source: serde_json::Error,
    },
}

impl ComposerError {
    /// Category of this error for boundary reporting
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter { .. }
            | Self::InvalidDimensions { .. }
            | Self::InvalidGrid { .. } => ErrorKind::Validation,
            Self::AtlasNotFound { .. } | Self::MapNotFound { .. } | Self::TileNotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::ImageDecode { .. }
            | Self::ImageEncode { .. }
            | Self::RegionOutOfBounds { .. }
            | Self::NoMeaningfulTiles { .. }
            | Self::EmptyTilePool { .. }
            | Self::FileSystem { .. }
            | Self::Serialization { .. } => ErrorKind::Processing,
        }
    }
}

impl fmt::Display for ComposerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageDecode { source } => write!(f, "Failed to decode image: {source}"),
            Self::ImageEncode { source } => write!(f, "Failed to encode image: {source}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidDimensions {
                width,
                height,
                min,
                max,
            } => {
                write!(
                    f,
                    "Invalid map dimensions {width}x{height}: each side must be within [{min}, {max}]"
                )
            }
            Self::InvalidGrid { reason } => write!(f, "Invalid grid: {reason}"),
            Self::AtlasNotFound { id } => write!(f, "Atlas '{id}' not found"),
            Self::MapNotFound { id } => write!(f, "Map '{id}' not found"),
            Self::TileNotFound { atlas_id, tile_id } => {
                write!(f, "Tile '{tile_id}' not found in atlas '{atlas_id}'")
            }
            Self::RegionOutOfBounds { region, image } => {
                write!(
                    f,
                    "Region {}x{} at ({}, {}) exceeds image bounds {}x{}",
                    region.2, region.3, region.0, region.1, image.0, image.1
                )
            }
            Self::NoMeaningfulTiles { regions } => {
                write!(f, "None of the {regions} regions contained meaningful tiles")
            }
            Self::EmptyTilePool { environment } => {
                write!(f, "No tiles available to compose a {environment} map")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Serialization { source } => write!(f, "Serialization failed: {source}"),
        }
    }
}

impl std::error::Error for ComposerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageDecode { source } | Self::ImageEncode { source } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Serialization { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for composer results
pub type Result<T> = std::result::Result<T, ComposerError>;

impl From<serde_json::Error> for ComposerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization { source: err }
    }
}

impl From<std::io::Error> for ComposerError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ComposerError {
    ComposerError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid grid error
pub fn invalid_grid(reason: &impl ToString) -> ComposerError {
    ComposerError::InvalidGrid {
        reason: reason.to_string(),
    }
}
