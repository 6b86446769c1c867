//! Tile extraction, feature analysis and classification

/// Heuristic floor, wall and decoration classification
pub mod classifier;
/// Atlas slicing pipeline producing classified tiles
pub mod extraction;
/// Colour, brightness and edge statistics of tile pixels
pub mod features;
