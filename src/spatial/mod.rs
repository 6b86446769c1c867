//! Spatial data structures for atlases and maps
//!
//! This module contains spatial-related functionality including:
//! - Grid specifications and atlas partitioning
//! - Tiles, atlases and layer pools
//! - Map cells and layer grids

/// Map cells, environments and layer grids
pub mod grid;
/// Grid specifications and atlas partitioning
pub mod partition;
/// Tiles, atlases and tile pools
pub mod tiles;

pub use grid::{GeneratedMap, LayerGrid};
