//! Tileset slicing, heuristic tile classification and procedural map composition
//!
//! The system cuts an atlas image into tiles, classifies each as floor, wall or
//! decoration from its pixel statistics, and composes grid maps for dungeon,
//! nature, city and abstract environments either from a position-seeded value
//! stream or from per-environment structural layouts.

#![forbid(unsafe_code)]

/// Composition disciplines, environment strategies and the service facade
pub mod algorithm;
/// Tile extraction, feature analysis and classification
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Deterministic noise and seeded random selection
pub mod math;
/// Grids, tiles and maps
pub mod spatial;

pub use io::error::{ComposerError, Result};
