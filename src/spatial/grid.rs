//! Generated map model and the working layer grid
//!
//! Structural strategies first decide a layer for every cell on a
//! [`LayerGrid`], then tiles are drawn for each layer. The finished
//! [`GeneratedMap`] stores cells row by row, so `cells[y][x]` is the cell at
//! position `(x, y)`.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::io::error::{ComposerError, invalid_parameter};
use crate::spatial::tiles::TileType;

/// Named map style, each with its own composition rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Rooms and corridors inside solid rock
    Dungeon,
    /// Organic terrain with scattered features
    Nature,
    /// Street grid with walled blocks
    City,
    /// Generic sinusoidal pattern
    #[value(alias = "default", alias = "generic")]
    #[serde(alias = "default", alias = "generic")]
    Abstract,
    /// Pick one of the others from the available tile pools
    Auto,
}

impl Environment {
    /// Lowercase name used in documents and on the command line
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dungeon => "dungeon",
            Self::Nature => "nature",
            Self::City => "city",
            Self::Abstract => "abstract",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ComposerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dungeon" => Ok(Self::Dungeon),
            "nature" => Ok(Self::Nature),
            "city" => Ok(Self::City),
            "abstract" | "default" | "generic" => Ok(Self::Abstract),
            "auto" => Ok(Self::Auto),
            _ => Err(invalid_parameter(
                "environment_type",
                &s,
                &"expected dungeon, nature, city, abstract or auto",
            )),
        }
    }
}

/// One cell of a generated map
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapCell {
    /// Column of the cell
    pub x: usize,
    /// Row of the cell
    pub y: usize,
    /// Drawn tile, absent only for floor cells when floors are disabled
    pub tile_id: Option<String>,
    /// Role the cell plays
    pub layer: TileType,
}

/// A composed map, immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMap {
    /// Store identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Width in cells
    pub width: usize,
    /// Height in cells
    pub height: usize,
    /// Edge length of one cell in pixels
    pub tile_size: u32,
    /// Cells in row-major order, `cells[y][x]`
    pub cells: Vec<Vec<MapCell>>,
    /// Environment the map was composed for, after auto resolution
    pub environment_type: Environment,
    /// Atlas the tile ids come from, if any
    pub atlas_id: Option<String>,
    /// Seed the composition ran with
    pub seed: u64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl GeneratedMap {
    /// Cell at a grid position
    pub fn cell(&self, x: usize, y: usize) -> Option<&MapCell> {
        self.cells.get(y).and_then(|row| row.get(x))
    }

    /// Check the shape invariant: `height` rows of `width` cells at their own positions
    pub fn is_well_formed(&self) -> bool {
        self.cells.len() == self.height
            && self.cells.iter().enumerate().all(|(y, row)| {
                row.len() == self.width
                    && row
                        .iter()
                        .enumerate()
                        .all(|(x, cell)| cell.x == x && cell.y == y)
            })
    }

    /// Count cells per layer as (floor, wall, decoration)
    pub fn layer_counts(&self) -> (usize, usize, usize) {
        self.cells
            .iter()
            .flatten()
            .fold((0, 0, 0), |(f, w, d), cell| match cell.layer {
                TileType::Floor => (f + 1, w, d),
                TileType::Wall => (f, w + 1, d),
                TileType::Decoration => (f, w, d + 1),
            })
    }
}

/// Layer decisions for every cell before tiles are drawn
///
/// Backed by an `(height, width)` array indexed as `[y, x]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerGrid {
    layers: Array2<TileType>,
}

impl LayerGrid {
    /// Create a grid with every cell set to one layer
    pub fn filled(width: usize, height: usize, layer: TileType) -> Self {
        Self {
            layers: Array2::from_elem((height, width), layer),
        }
    }

    /// Width in cells
    pub fn width(&self) -> usize {
        self.layers.ncols()
    }

    /// Height in cells
    pub fn height(&self) -> usize {
        self.layers.nrows()
    }

    /// Layer at a position, `None` outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<TileType> {
        self.layers.get([y, x]).copied()
    }

    /// Set a layer, ignoring positions outside the grid
    pub fn set(&mut self, x: usize, y: usize, layer: TileType) {
        if let Some(cell) = self.layers.get_mut([y, x]) {
            *cell = layer;
        }
    }

    /// Set every cell of a rectangle, clipped to the grid
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, layer: TileType) {
        for cy in y..y.saturating_add(height).min(self.height()) {
            for cx in x..x.saturating_add(width).min(self.width()) {
                self.set(cx, cy, layer);
            }
        }
    }

    /// Iterate `(x, y, layer)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, TileType)> + '_ {
        self.layers
            .indexed_iter()
            .map(|((y, x), &layer)| (x, y, layer))
    }
}
