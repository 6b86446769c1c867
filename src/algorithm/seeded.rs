//! Per-cell seeded composition
//!
//! Every cell owns a [`CellRng`] keyed by seed and position, so cells can be
//! computed in any order and the same seed always yields the same map.
//! Values are consumed in a fixed order: interior-wall test (only when the
//! environment's structural condition holds), decoration test, tile pick.

use crate::algorithm::composer::{CompositionRequest, EnabledLayers};
use crate::math::noise::CellRng;
use crate::spatial::grid::{Environment, MapCell};
use crate::spatial::tiles::{TilePools, TileType};

/// Whether a position lies on the outer ring of the map
pub const fn is_perimeter(x: usize, y: usize, width: usize, height: usize) -> bool {
    x == 0 || y == 0 || x + 1 == width || y + 1 == height
}

/// Interior wall rule for an environment
pub fn interior_wall(environment: Environment, x: usize, y: usize, rng: &mut CellRng) -> bool {
    match environment {
        Environment::Dungeon => (x % 4 == 0 || y % 4 == 0) && rng.next_value() > 0.7,
        Environment::City => {
            ((x % 8 == 0 && y % 8 == 0) || (x % 6 == 3 && y % 6 == 3)) && rng.next_value() > 0.5
        }
        Environment::Nature => rng.next_value() > 0.9,
        Environment::Abstract | Environment::Auto => rng.next_value() > 0.85,
    }
}

/// Decoration rule for an environment
pub fn decoration(environment: Environment, rng: &mut CellRng) -> bool {
    let threshold = match environment {
        Environment::Nature => 0.8,
        Environment::City => 0.9,
        Environment::Dungeon => 0.95,
        Environment::Abstract | Environment::Auto => 0.85,
    };
    rng.next_value() > threshold
}

/// Decide the layer of one cell, `None` for a floor cell with floors disabled
///
/// Walls win over decorations, decorations over floor. Perimeter cells are
/// walls whenever walls are enabled.
pub fn choose_layer(
    environment: Environment,
    layers: EnabledLayers,
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    rng: &mut CellRng,
) -> Option<TileType> {
    if layers.walls && (is_perimeter(x, y, width, height) || interior_wall(environment, x, y, rng))
    {
        Some(TileType::Wall)
    } else if layers.decorations && decoration(environment, rng) {
        Some(TileType::Decoration)
    } else if layers.floors {
        Some(TileType::Floor)
    } else {
        None
    }
}

/// Compose one cell
///
/// `any_tile` is the combined pool substituted when the chosen layer has no
/// tiles of its own.
pub fn compose_cell(
    request: &CompositionRequest,
    pools: &TilePools,
    any_tile: &[String],
    x: usize,
    y: usize,
) -> MapCell {
    let mut rng = CellRng::new(request.seed, x, y);
    let Some(layer) = choose_layer(
        request.environment,
        request.layers,
        request.width,
        request.height,
        x,
        y,
        &mut rng,
    ) else {
        return MapCell {
            x,
            y,
            tile_id: None,
            layer: TileType::Floor,
        };
    };

    let own = pools.pool(layer);
    let candidates = if own.is_empty() { any_tile } else { own };
    let tile_id = rng
        .pick_index(candidates.len())
        .and_then(|index| candidates.get(index))
        .cloned();

    MapCell {
        x,
        y,
        tile_id,
        layer,
    }
}
