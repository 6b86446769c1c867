//! Tile records, atlases and classification pools
//!
//! A tile is created once during extraction and only its classification and
//! confidence may change afterwards. Pools group tile ids by classification
//! and implement the two fallback rules used during map composition.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::io::error::{ComposerError, invalid_parameter};
use crate::io::image::{ImageDimensions, PixelBuffer};
use crate::spatial::partition::{GridLayout, SourceRect};

/// Role of a tile in an atlas and of a cell in a generated map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    /// Walkable ground
    Floor,
    /// Blocking structure
    Wall,
    /// Ornament drawn over the ground
    Decoration,
}

impl TileType {
    /// All classifications in pool order
    pub const ALL: [Self; 3] = [Self::Floor, Self::Wall, Self::Decoration];

    /// Lowercase name used in documents and on the command line
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::Wall => "wall",
            Self::Decoration => "decoration",
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TileType {
    type Err = ComposerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "floor" => Ok(Self::Floor),
            "wall" => Ok(Self::Wall),
            "decoration" => Ok(Self::Decoration),
            _ => Err(invalid_parameter(
                "classification",
                &s,
                &"expected floor, wall or decoration",
            )),
        }
    }
}

/// One classified tile cut from an atlas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    /// Stable identifier, unique within the atlas
    pub id: String,
    /// Row of the tile in the atlas grid
    pub row: u32,
    /// Column of the tile in the atlas grid
    pub col: u32,
    /// Source pixels in the original image
    pub source_rect: SourceRect,
    /// Assigned classification
    pub classification: TileType,
    /// Classifier confidence in [0, 1]
    pub confidence: f64,
    /// Resized tile pixels as a PNG data URL
    pub image_data: String,
    /// Resized tile pixels, kept for preview rendering
    #[serde(skip)]
    pub pixels: PixelBuffer,
}

/// A sliced tileset image with its classified tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileAtlas {
    /// Store identifier
    pub id: String,
    /// Display name, usually the source file stem
    pub name: String,
    /// Original image as a PNG data URL
    pub image_data: String,
    /// Dimensions of the original image
    pub original_image: ImageDimensions,
    /// Grid the image was partitioned with
    pub grid: GridLayout,
    /// Kept tiles in row-major scan order
    pub tiles: Vec<Tile>,
    /// Output edge length every tile was resized to
    pub tile_size: u32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl TileAtlas {
    /// Find a tile by id
    pub fn tile(&self, tile_id: &str) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == tile_id)
    }

    /// Find a tile by id for a classification override
    pub fn tile_mut(&mut self, tile_id: &str) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|tile| tile.id == tile_id)
    }

    /// Number of tiles per classification as (floor, wall, decoration)
    pub fn classification_counts(&self) -> (usize, usize, usize) {
        self.tiles
            .iter()
            .fold((0, 0, 0), |(f, w, d), tile| match tile.classification {
                TileType::Floor => (f + 1, w, d),
                TileType::Wall => (f, w + 1, d),
                TileType::Decoration => (f, w, d + 1),
            })
    }
}

/// Tile ids grouped by classification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePools {
    /// Floor tile ids
    #[serde(default)]
    pub floor: Vec<String>,
    /// Wall tile ids
    #[serde(default)]
    pub wall: Vec<String>,
    /// Decoration tile ids
    #[serde(default)]
    pub decoration: Vec<String>,
}

impl TilePools {
    /// Group tiles by classification, preserving scan order
    pub fn from_tiles(tiles: &[Tile]) -> Self {
        let mut pools = Self::default();
        for tile in tiles {
            pools.pool_mut(tile.classification).push(tile.id.clone());
        }
        pools
    }

    /// Ids of one classification
    pub fn pool(&self, tile_type: TileType) -> &[String] {
        match tile_type {
            TileType::Floor => &self.floor,
            TileType::Wall => &self.wall,
            TileType::Decoration => &self.decoration,
        }
    }

    fn pool_mut(&mut self, tile_type: TileType) -> &mut Vec<String> {
        match tile_type {
            TileType::Floor => &mut self.floor,
            TileType::Wall => &mut self.wall,
            TileType::Decoration => &mut self.decoration,
        }
    }

    /// Total number of ids across every pool
    pub fn len(&self) -> usize {
        self.floor.len() + self.wall.len() + self.decoration.len()
    }

    /// Check whether no pool holds any id
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every id, floors first, then walls, then decorations
    ///
    /// Seeded composition substitutes this pool when a layer has no tiles.
    pub fn combined(&self) -> Vec<String> {
        TileType::ALL
            .iter()
            .flat_map(|&tile_type| self.pool(tile_type).iter().cloned())
            .collect()
    }

    /// Candidates for a layer, substituting the floor pool when empty
    ///
    /// Used by structural composition; falls through to the combined pool
    /// when floors are missing too.
    pub fn candidates_or_floor(&self, layer: TileType) -> &[String] {
        [layer, TileType::Floor, TileType::Wall, TileType::Decoration]
            .into_iter()
            .map(|tile_type| self.pool(tile_type))
            .find(|pool| !pool.is_empty())
            .unwrap_or_default()
    }

    /// Draw one id uniformly from a layer's structural candidates
    pub fn pick<R: Rng>(&self, layer: TileType, rng: &mut R) -> Option<String> {
        let candidates = self.candidates_or_floor(layer);
        if candidates.is_empty() {
            return None;
        }
        candidates
            .get(rng.random_range(0..candidates.len()))
            .cloned()
    }
}
