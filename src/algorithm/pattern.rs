//! Abstract interference pattern layout

use crate::math::noise::abstract_field;
use crate::math::random::RandomSelector;
use crate::spatial::grid::LayerGrid;
use crate::spatial::tiles::TileType;

/// Lay out the abstract pattern
///
/// Field values above 1 are walls, above 0 decorations, the rest floor. The
/// layout is fully determined by position; `rng` is accepted for a uniform
/// strategy signature.
pub fn layout(width: usize, height: usize, _rng: &mut RandomSelector) -> LayerGrid {
    let mut grid = LayerGrid::filled(width, height, TileType::Floor);

    for y in 0..height {
        for x in 0..width {
            let combined = abstract_field(x, y);
            if combined > 1.0 {
                grid.set(x, y, TileType::Wall);
            } else if combined > 0.0 {
                grid.set(x, y, TileType::Decoration);
            }
        }
    }

    grid
}
