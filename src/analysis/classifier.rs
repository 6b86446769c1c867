//! Heuristic floor/wall/decoration classification
//!
//! Rules are evaluated in a fixed order and the first match wins:
//!
//! 1. flat, quiet tiles are judged by color, defaulting to floor
//! 2. busy, dark or uniformly dim tiles are walls
//! 3. noisy or colorful tiles are decorations
//! 4. everything else is judged by color, defaulting to floor

use crate::analysis::features::{Color, TileFeatures};
use crate::io::configuration::{BASE_CONFIDENCE, MAX_CONFIDENCE, MIN_CONFIDENCE};
use crate::spatial::tiles::TileType;

/// Classification together with how sure the heuristic is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Assigned tile type
    pub tile_type: TileType,
    /// Confidence in [0.1, 1.0]
    pub confidence: f64,
}

/// Classify a tile from its pixel statistics
pub fn classify_tile_by_features(features: &TileFeatures) -> Classification {
    let color = &features.dominant_color;

    let tile_type = if features.variance < 30.0 && features.edges < 50 {
        classify_by_color(color, TileType::Floor)
    } else if features.edges > 200
        || features.brightness < 50.0
        || (color.r < 100.0 && color.g < 100.0 && color.b < 100.0)
    {
        TileType::Wall
    } else if features.variance > 100.0 || features.color_complexity > 20 {
        TileType::Decoration
    } else {
        classify_by_color(color, TileType::Floor)
    };

    Classification {
        tile_type,
        confidence: confidence_for(tile_type, features),
    }
}

/// Classify a mean color, returning `default_type` when no color rule applies
///
/// Green-dominant colors and warm earth tones read as ground; dark or
/// desaturated dim colors read as stone.
pub fn classify_by_color(color: &Color, default_type: TileType) -> TileType {
    let brightness = color.brightness();

    if color.g > color.r && color.g > color.b && color.g > 100.0 {
        TileType::Floor
    } else if color.r > 100.0 && color.g > 80.0 && color.b < 80.0 {
        TileType::Floor
    } else if brightness < 60.0
        || ((color.r - color.g).abs() < 20.0 && (color.g - color.b).abs() < 20.0 && brightness < 120.0)
    {
        TileType::Wall
    } else {
        default_type
    }
}

fn confidence_for(tile_type: TileType, features: &TileFeatures) -> f64 {
    let mut confidence = BASE_CONFIDENCE;

    match tile_type {
        TileType::Floor => {
            if features.variance < 20.0 {
                confidence += 0.3;
            }
            if features.brightness > 80.0 && features.brightness < 200.0 {
                confidence += 0.2;
            }
        }
        TileType::Wall => {
            if features.edges > 150 {
                confidence += 0.3;
            }
            if features.brightness < 80.0 {
                confidence += 0.2;
            }
        }
        TileType::Decoration => {
            if features.variance > 80.0 {
                confidence += 0.3;
            }
            if features.color_complexity > 15 {
                confidence += 0.2;
            }
        }
    }

    confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}
