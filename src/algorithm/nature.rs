//! Noise-field nature layout
//!
//! High ridges of the field become walls (rock, dense trees), the slopes
//! below them are sprinkled with decorations and the rest is open ground.

use crate::math::noise::nature_field;
use crate::math::random::RandomSelector;
use crate::spatial::grid::LayerGrid;
use crate::spatial::tiles::TileType;

/// Field value above which a cell is a wall
pub const WALL_THRESHOLD: f64 = 0.5;
/// Field value above which a cell may be decorated
pub const DECORATION_THRESHOLD: f64 = 0.2;
/// Chance that an eligible cell is decorated
pub const DECORATION_CHANCE: f64 = 0.3;

/// Lay out nature terrain from the two-octave field
pub fn layout(width: usize, height: usize, rng: &mut RandomSelector) -> LayerGrid {
    let mut grid = LayerGrid::filled(width, height, TileType::Floor);

    for y in 0..height {
        for x in 0..width {
            let noise = nature_field(x, y);
            if noise > WALL_THRESHOLD {
                grid.set(x, y, TileType::Wall);
            } else if noise > DECORATION_THRESHOLD && rng.chance(DECORATION_CHANCE) {
                grid.set(x, y, TileType::Decoration);
            }
        }
    }

    grid
}
