//! Block-and-street city layout
//!
//! The map is paved with floor. Square blocks are stamped on a regular
//! period; the gap between blocks is the street. Each block gets a wall
//! outline and some of its inner cells are decorated.

use crate::math::random::RandomSelector;
use crate::spatial::grid::LayerGrid;
use crate::spatial::tiles::TileType;

/// Side of one block in cells
pub const BLOCK_SIZE: usize = 6;
/// Street width between blocks
pub const STREET_WIDTH: usize = 2;
/// Chance that an inner block cell is decorated
pub const INTERIOR_DECORATION_CHANCE: f64 = 0.2;

/// Lay out city blocks; blocks at the right and bottom edges are clipped
pub fn layout(width: usize, height: usize, rng: &mut RandomSelector) -> LayerGrid {
    let mut grid = LayerGrid::filled(width, height, TileType::Floor);
    let period = BLOCK_SIZE + STREET_WIDTH;

    for block_y in (0..height).step_by(period) {
        for block_x in (0..width).step_by(period) {
            let end_x = (block_x + BLOCK_SIZE).min(width);
            let end_y = (block_y + BLOCK_SIZE).min(height);

            for y in block_y..end_y {
                for x in block_x..end_x {
                    let on_outline =
                        x == block_x || x + 1 == end_x || y == block_y || y + 1 == end_y;
                    if on_outline {
                        grid.set(x, y, TileType::Wall);
                    } else if rng.chance(INTERIOR_DECORATION_CHANCE) {
                        grid.set(x, y, TileType::Decoration);
                    }
                }
            }
        }
    }

    grid
}
