//! Service facade tying extraction, composition and storage together
//!
//! [`TileMapper`] is what an outer layer (CLI, HTTP handler) talks to. It owns
//! the image decoder, the atlas and map stores and the validation limits.
//! Every generation request is validated completely before composition
//! starts, and a failed request stores nothing.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::algorithm::composer::{CompositionRequest, Discipline, EnabledLayers, MapComposer};
use crate::analysis::extraction::extract_tiles;
use crate::io::configuration::{
    DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, DEFAULT_TILE_SIZE, GenerationLimits,
};
use crate::io::error::{ComposerError, Result, invalid_parameter};
use crate::io::image::{ImageDecoder, RasterDecoder, png_data_url, render_map};
use crate::io::store::{MemoryStore, generate_id};
use crate::math::random::random_seed;
use crate::spatial::grid::{Environment, GeneratedMap};
use crate::spatial::partition::GridSpec;
use crate::spatial::tiles::{Tile, TileAtlas, TilePools, TileType};

/// Parameters of one map generation request
///
/// Tiles come either from a stored atlas (`atlas_id`) or from a ready-made
/// pool (`tiles_by_type`); the atlas wins when both are given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapGenerationParams {
    /// Display name for the map
    #[serde(default)]
    pub name: Option<String>,
    /// Width in cells
    pub width: usize,
    /// Height in cells
    pub height: usize,
    /// Edge length of one cell in pixels
    pub tile_size: u32,
    /// Environment archetype
    pub environment_type: Environment,
    /// Composition discipline
    #[serde(default)]
    pub discipline: Discipline,
    /// Seed; a random one is drawn and recorded when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Layers that may appear
    #[serde(default)]
    pub enabled_layers: EnabledLayers,
    /// Atlas supplying the tiles
    #[serde(default)]
    pub atlas_id: Option<String>,
    /// Pre-grouped tile ids
    #[serde(default)]
    pub tiles_by_type: Option<TilePools>,
}

impl Default for MapGenerationParams {
    fn default() -> Self {
        Self {
            name: None,
            width: DEFAULT_MAP_WIDTH,
            height: DEFAULT_MAP_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
            environment_type: Environment::Auto,
            discipline: Discipline::default(),
            seed: None,
            enabled_layers: EnabledLayers::default(),
            atlas_id: None,
            tiles_by_type: None,
        }
    }
}

/// Extraction, generation and lookup service over in-memory stores
#[derive(Debug)]
pub struct TileMapper<D = RasterDecoder> {
    decoder: D,
    composer: MapComposer,
    atlases: MemoryStore<TileAtlas>,
    maps: MemoryStore<GeneratedMap>,
}

impl Default for TileMapper<RasterDecoder> {
    fn default() -> Self {
        Self::new(RasterDecoder)
    }
}

impl<D: ImageDecoder + Sync> TileMapper<D> {
    /// Create a service with default limits
    pub fn new(decoder: D) -> Self {
        Self::with_limits(decoder, GenerationLimits::default())
    }

    /// Create a service validating against custom limits
    pub fn with_limits(decoder: D, limits: GenerationLimits) -> Self {
        Self {
            decoder,
            composer: MapComposer::new(limits),
            atlases: MemoryStore::new(),
            maps: MemoryStore::new(),
        }
    }

    /// Image decoder in use
    pub const fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Limits requests are validated against
    pub const fn limits(&self) -> &GenerationLimits {
        self.composer.limits()
    }

    /// Slice an image into a classified atlas and store it
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile size is outside the configured limits
    /// - The image cannot be decoded or partitioned with `grid`
    /// - No region holds meaningful content
    pub fn extract_tiles(
        &self,
        name: &str,
        bytes: &[u8],
        grid: GridSpec,
        tile_size: u32,
    ) -> Result<TileAtlas> {
        self.limits().check_tile_size(tile_size)?;

        let id = generate_id("atlas");
        let extracted = extract_tiles(&self.decoder, bytes, grid, tile_size, &id)?;

        let atlas = TileAtlas {
            id: id.clone(),
            name: name.to_string(),
            image_data: png_data_url(&extracted.image_png),
            original_image: extracted.dimensions,
            grid: extracted.layout,
            tiles: extracted.tiles,
            tile_size,
            created_at: Utc::now(),
        };

        self.atlases.put(&id, atlas.clone());
        Ok(atlas)
    }

    /// Compose a map and store it
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Width, height or tile size are outside the configured limits
    /// - Neither an atlas id nor a tile pool is given
    /// - The referenced atlas does not exist
    /// - No tiles are available while floors are enabled
    pub fn generate_map(&self, params: &MapGenerationParams) -> Result<GeneratedMap> {
        let limits = self.limits();
        limits.check_dimensions(params.width, params.height)?;
        limits.check_tile_size(params.tile_size)?;

        let pools = match (&params.atlas_id, &params.tiles_by_type) {
            (Some(atlas_id), _) => {
                let atlas = self.atlas(atlas_id)?;
                TilePools::from_tiles(&atlas.tiles)
            }
            (None, Some(pools)) => pools.clone(),
            (None, None) => {
                return Err(invalid_parameter(
                    "atlas_id",
                    &"<none>",
                    &"either an atlas id or tiles by type is required",
                ));
            }
        };

        let seed = params.seed.unwrap_or_else(random_seed);
        let request = CompositionRequest {
            width: params.width,
            height: params.height,
            environment: params.environment_type,
            seed,
            layers: params.enabled_layers,
        };
        let (environment, cells) = self
            .composer
            .compose_with(params.discipline, &request, &pools)?;

        let id = generate_id("map");
        let map = GeneratedMap {
            id: id.clone(),
            name: params
                .name
                .clone()
                .unwrap_or_else(|| format!("{environment} map")),
            width: params.width,
            height: params.height,
            tile_size: params.tile_size,
            cells,
            environment_type: environment,
            atlas_id: params.atlas_id.clone(),
            seed,
            created_at: Utc::now(),
        };

        let (floors, walls, decorations) = map.layer_counts();
        info!(
            map = %id,
            environment = %environment,
            seed,
            floors,
            walls,
            decorations,
            "generated map"
        );

        self.maps.put(&id, map.clone());
        Ok(map)
    }

    /// Look up a stored atlas
    ///
    /// # Errors
    ///
    /// Returns `AtlasNotFound` for an unknown id
    pub fn atlas(&self, id: &str) -> Result<TileAtlas> {
        self.atlases
            .get(id)
            .ok_or_else(|| ComposerError::AtlasNotFound { id: id.to_string() })
    }

    /// Look up a stored map
    ///
    /// # Errors
    ///
    /// Returns `MapNotFound` for an unknown id
    pub fn map(&self, id: &str) -> Result<GeneratedMap> {
        self.maps
            .get(id)
            .ok_or_else(|| ComposerError::MapNotFound { id: id.to_string() })
    }

    /// Override a tile's classification and optionally its confidence
    ///
    /// Confidence is clamped to `[0, 1]`. Id and source rectangle never change.
    ///
    /// # Errors
    ///
    /// Returns `AtlasNotFound` or `TileNotFound` for unknown ids, and
    /// `InvalidParameter` for a non-finite confidence
    pub fn update_tile(
        &self,
        atlas_id: &str,
        tile_id: &str,
        classification: TileType,
        confidence: Option<f64>,
    ) -> Result<Tile> {
        if let Some(value) = confidence.filter(|value| !value.is_finite()) {
            return Err(invalid_parameter(
                "confidence",
                &value,
                &"must be a finite number",
            ));
        }

        self.atlases
            .update(atlas_id, |atlas| {
                atlas.tile_mut(tile_id).map(|tile| {
                    tile.classification = classification;
                    if let Some(value) = confidence {
                        tile.confidence = value.clamp(0.0, 1.0);
                    }
                    tile.clone()
                })
            })
            .ok_or_else(|| ComposerError::AtlasNotFound {
                id: atlas_id.to_string(),
            })?
            .ok_or_else(|| ComposerError::TileNotFound {
                atlas_id: atlas_id.to_string(),
                tile_id: tile_id.to_string(),
            })
    }

    /// Render a stored map with its atlas tiles and encode it as PNG
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The map has no atlas or either id is unknown
    /// - The map is too large to preview
    /// - Encoding fails
    pub fn render_preview(&self, map_id: &str) -> Result<Vec<u8>> {
        let map = self.map(map_id)?;
        let atlas_id = map.atlas_id.as_deref().ok_or_else(|| {
            invalid_parameter("map_id", &map_id, &"map was not generated from an atlas")
        })?;
        let atlas = self.atlas(atlas_id)?;
        self.decoder.encode_png(&render_map(&map, &atlas)?)
    }
}
