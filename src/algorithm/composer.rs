//! Map composition entry point and strategy dispatch
//!
//! Two disciplines share one interface. The seeded discipline decides every
//! cell independently from a position-keyed value stream and is fully
//! reproducible. The structural discipline lays out rooms, blocks or noise
//! fields per environment with a seeded [`RandomSelector`], then draws tiles.
//! Both substitute a fallback pool when a layer has no tiles of its own.

use clap::ValueEnum;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{Level, debug, span};

use crate::algorithm::{city, dungeon, nature, pattern, seeded};
use crate::io::configuration::GenerationLimits;
use crate::io::error::{ComposerError, Result, invalid_parameter};
use crate::math::random::RandomSelector;
use crate::spatial::grid::{Environment, LayerGrid, MapCell};
use crate::spatial::tiles::{TilePools, TileType};

/// Algorithm family used to decide per-cell layers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    /// Independent per-cell decisions from a position-seeded stream
    #[default]
    Seeded,
    /// Rooms, blocks and noise fields laid out per environment
    Structural,
}

/// Which layers may appear in a composed map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnabledLayers {
    /// Floor cells receive tiles; when false they stay empty
    pub floors: bool,
    /// Wall cells may be placed
    pub walls: bool,
    /// Decoration cells may be placed
    pub decorations: bool,
}

impl Default for EnabledLayers {
    fn default() -> Self {
        Self {
            floors: true,
            walls: true,
            decorations: true,
        }
    }
}

impl EnabledLayers {
    /// Whether a layer may appear
    pub const fn allows(&self, layer: TileType) -> bool {
        match layer {
            TileType::Floor => self.floors,
            TileType::Wall => self.walls,
            TileType::Decoration => self.decorations,
        }
    }
}

/// Named composition strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Per-cell seeded rules for the request's environment
    SeededNoise,
    /// Carved rooms joined by L-shaped corridors
    DungeonRooms,
    /// Two-octave sinusoidal terrain field
    NatureField,
    /// Walled blocks separated by streets
    CityBlocks,
    /// Interference pattern of two sinusoidal fields
    AbstractPattern,
}

impl Strategy {
    /// Strategy that implements a discipline for a concrete environment
    pub const fn for_environment(discipline: Discipline, environment: Environment) -> Self {
        match (discipline, environment) {
            (Discipline::Seeded, _) => Self::SeededNoise,
            (Discipline::Structural, Environment::Dungeon) => Self::DungeonRooms,
            (Discipline::Structural, Environment::Nature) => Self::NatureField,
            (Discipline::Structural, Environment::City) => Self::CityBlocks,
            (Discipline::Structural, Environment::Abstract | Environment::Auto) => {
                Self::AbstractPattern
            }
        }
    }

    /// Name accepted by [`Strategy::from_str`]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SeededNoise => "seeded",
            Self::DungeonRooms => "dungeon",
            Self::NatureField => "nature",
            Self::CityBlocks => "city",
            Self::AbstractPattern => "abstract",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ComposerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seeded" => Ok(Self::SeededNoise),
            "dungeon" => Ok(Self::DungeonRooms),
            "nature" => Ok(Self::NatureField),
            "city" => Ok(Self::CityBlocks),
            "abstract" | "default" => Ok(Self::AbstractPattern),
            _ => Err(invalid_parameter(
                "strategy",
                &s,
                &"expected seeded, dungeon, nature, city or abstract",
            )),
        }
    }
}

/// Parameters of one composition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositionRequest {
    /// Width in cells
    pub width: usize,
    /// Height in cells
    pub height: usize,
    /// Environment whose rules apply, resolved from `Auto` before use
    pub environment: Environment,
    /// Seed for every random decision
    pub seed: u64,
    /// Layers that may appear
    pub layers: EnabledLayers,
}

/// Produces cell grids from classified tile pools
#[derive(Debug, Clone, Copy, Default)]
pub struct MapComposer {
    limits: GenerationLimits,
}

impl MapComposer {
    /// Create a composer validating against the given limits
    pub const fn new(limits: GenerationLimits) -> Self {
        Self { limits }
    }

    /// Limits this composer validates against
    pub const fn limits(&self) -> &GenerationLimits {
        &self.limits
    }

    /// Pick a concrete environment for `Auto` from the available pools
    ///
    /// Nature when both walls and decorations exist, dungeon when walls
    /// outnumber floors, the abstract pattern otherwise.
    pub fn resolve_environment(environment: Environment, pools: &TilePools) -> Environment {
        if environment != Environment::Auto {
            return environment;
        }
        if !pools.wall.is_empty() && !pools.decoration.is_empty() {
            Environment::Nature
        } else if pools.wall.len() > pools.floor.len() {
            Environment::Dungeon
        } else {
            Environment::Abstract
        }
    }

    /// Compose with the strategy a discipline prescribes for the request
    ///
    /// Returns the resolved environment together with the cells.
    ///
    /// # Errors
    ///
    /// See [`MapComposer::compose`]
    pub fn compose_with(
        &self,
        discipline: Discipline,
        request: &CompositionRequest,
        pools: &TilePools,
    ) -> Result<(Environment, Vec<Vec<MapCell>>)> {
        let environment = Self::resolve_environment(request.environment, pools);
        let resolved = CompositionRequest {
            environment,
            ..*request
        };
        let strategy = Strategy::for_environment(discipline, environment);
        let cells = self.compose(strategy, &resolved, pools)?;
        Ok((environment, cells))
    }

    /// Compose a `height x width` grid of cells with a named strategy
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Width or height is outside the configured limits
    /// - No tile of any classification exists while floors are enabled
    pub fn compose(
        &self,
        strategy: Strategy,
        request: &CompositionRequest,
        pools: &TilePools,
    ) -> Result<Vec<Vec<MapCell>>> {
        let span = span!(
            Level::DEBUG,
            "compose",
            strategy = strategy.name(),
            width = request.width,
            height = request.height
        );
        let _guard = span.enter();

        self.limits.check_dimensions(request.width, request.height)?;

        let environment = Self::resolve_environment(request.environment, pools);
        let request = CompositionRequest {
            environment,
            ..*request
        };
        if pools.is_empty() && request.layers.floors {
            return Err(ComposerError::EmptyTilePool {
                environment: environment.to_string(),
            });
        }

        let cells = match strategy {
            Strategy::SeededNoise => seeded_rows(&request, pools),
            Strategy::DungeonRooms => structural(&request, pools, dungeon::layout),
            Strategy::NatureField => structural(&request, pools, nature::layout),
            Strategy::CityBlocks => structural(&request, pools, city::layout),
            Strategy::AbstractPattern => structural(&request, pools, pattern::layout),
        };

        debug!(rows = cells.len(), "composition finished");
        Ok(cells)
    }
}

// Rows are independent: every cell's stream depends only on seed and position
fn seeded_rows(request: &CompositionRequest, pools: &TilePools) -> Vec<Vec<MapCell>> {
    let any_tile = pools.combined();
    (0..request.height)
        .into_par_iter()
        .map(|y| {
            (0..request.width)
                .map(|x| seeded::compose_cell(request, pools, &any_tile, x, y))
                .collect()
        })
        .collect()
}

// Structural layouts have sequential dependencies, so they run on one thread
fn structural(
    request: &CompositionRequest,
    pools: &TilePools,
    layout: fn(usize, usize, &mut RandomSelector) -> LayerGrid,
) -> Vec<Vec<MapCell>> {
    let mut selector = RandomSelector::new(request.seed);
    let grid = layout(request.width, request.height, &mut selector);
    assign_tiles(&grid, request.layers, pools, &mut selector)
}

/// Draw a tile for every cell of a layer grid
///
/// Disabled wall and decoration cells fall back to floor; floor cells stay
/// empty when floors are disabled. Tiles are drawn in row-major order.
pub fn assign_tiles(
    grid: &LayerGrid,
    layers: EnabledLayers,
    pools: &TilePools,
    selector: &mut RandomSelector,
) -> Vec<Vec<MapCell>> {
    let mut rows: Vec<Vec<MapCell>> = (0..grid.height())
        .map(|_| Vec::with_capacity(grid.width()))
        .collect();

    for (x, y, planned) in grid.iter() {
        let layer = if layers.allows(planned) {
            planned
        } else {
            TileType::Floor
        };
        let tile_id = if layer == TileType::Floor && !layers.floors {
            None
        } else {
            pools.pick(layer, selector.rng_mut())
        };
        if let Some(row) = rows.get_mut(y) {
            row.push(MapCell {
                x,
                y,
                tile_id,
                layer,
            });
        }
    }

    rows
}
