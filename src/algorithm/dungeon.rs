//! Room-and-corridor dungeon layout
//!
//! The grid starts as solid wall. Rooms are carved one after another and each
//! room is joined to the previous one by an L-shaped corridor: horizontal
//! along the previous room's center row, then vertical along the current
//! room's center column. Corridors guarantee nothing beyond that chain.

use crate::math::random::RandomSelector;
use crate::spatial::grid::LayerGrid;
use crate::spatial::tiles::TileType;

/// Smallest room side before clamping to the map
pub const MIN_ROOM_SIDE: usize = 4;
/// Exclusive upper bound of a room side
pub const MAX_ROOM_SIDE: usize = 10;
/// Chance that a room receives one decoration
pub const ROOM_DECORATION_CHANCE: f64 = 0.7;

/// Rectangular room in cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    /// Left column
    pub x: usize,
    /// Top row
    pub y: usize,
    /// Width in cells
    pub width: usize,
    /// Height in cells
    pub height: usize,
}

impl Room {
    /// Center cell, rounded toward the top-left
    pub const fn center(&self) -> (usize, usize) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// Number of rooms attempted for a map
pub const fn room_count(width: usize, height: usize) -> usize {
    width * height / 100 + 2
}

/// Place rooms inside a one-cell margin
///
/// Room sides are drawn from `[4, 10)` and shrunk to fit small maps; maps
/// too small to hold a one-cell room inside the margin get no rooms.
pub fn place_rooms(width: usize, height: usize, rng: &mut RandomSelector) -> Vec<Room> {
    let mut rooms = Vec::new();

    for _ in 0..room_count(width, height) {
        let drawn_width = rng.in_range(MIN_ROOM_SIDE..MAX_ROOM_SIDE).unwrap_or(MIN_ROOM_SIDE);
        let drawn_height = rng.in_range(MIN_ROOM_SIDE..MAX_ROOM_SIDE).unwrap_or(MIN_ROOM_SIDE);
        let room_width = drawn_width.min(width.saturating_sub(2));
        let room_height = drawn_height.min(height.saturating_sub(2));
        if room_width == 0 || room_height == 0 {
            continue;
        }

        let (Some(x), Some(y)) = (
            rng.in_range(1..width - room_width),
            rng.in_range(1..height - room_height),
        ) else {
            continue;
        };

        rooms.push(Room {
            x,
            y,
            width: room_width,
            height: room_height,
        });
    }

    rooms
}

fn carve_corridor(grid: &mut LayerGrid, from: (usize, usize), to: (usize, usize)) {
    let (from_x, from_y) = from;
    let (to_x, to_y) = to;

    for x in from_x.min(to_x)..=from_x.max(to_x) {
        grid.set(x, from_y, TileType::Floor);
    }
    for y in from_y.min(to_y)..=from_y.max(to_y) {
        grid.set(to_x, y, TileType::Floor);
    }
}

/// Lay out a dungeon: walls, carved rooms, corridors and room decorations
pub fn layout(width: usize, height: usize, rng: &mut RandomSelector) -> LayerGrid {
    let mut grid = LayerGrid::filled(width, height, TileType::Wall);
    let rooms = place_rooms(width, height, rng);

    let mut previous: Option<&Room> = None;
    for room in &rooms {
        grid.fill_rect(room.x, room.y, room.width, room.height, TileType::Floor);
        if let Some(prev) = previous {
            carve_corridor(&mut grid, prev.center(), room.center());
        }
        previous = Some(room);
    }

    for room in &rooms {
        if !rng.chance(ROOM_DECORATION_CHANCE) {
            continue;
        }
        let (Some(x), Some(y)) = (
            rng.in_range(room.x + 1..room.x + room.width - 1),
            rng.in_range(room.y + 1..room.y + room.height - 1),
        ) else {
            continue;
        };
        if grid.get(x, y) == Some(TileType::Floor) {
            grid.set(x, y, TileType::Decoration);
        }
    }

    grid
}
