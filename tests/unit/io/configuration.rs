//! Tests for configuration constants and request limits

#[cfg(test)]
mod tests {
    use tilecomposer::ComposerError;
    use tilecomposer::io::configuration::{
        AUTO_GRID_CANDIDATES, AUTO_GRID_FALLBACK, GenerationLimits, MAX_MAP_DIMENSION,
        MAX_TILE_SIZE, MIN_MAP_DIMENSION, MIN_TILE_SIZE,
    };

    #[test]
    fn test_default_limits() {
        let limits = GenerationLimits::default();

        assert_eq!(limits.min_dimension, MIN_MAP_DIMENSION);
        assert_eq!(limits.max_dimension, MAX_MAP_DIMENSION);
        assert_eq!(limits.min_tile_size, MIN_TILE_SIZE);
        assert_eq!(limits.max_tile_size, MAX_TILE_SIZE);
    }

    // Tests dimension bounds are inclusive on both ends
    // Verified by making the upper bound exclusive
    #[test]
    fn test_check_dimensions() {
        let limits = GenerationLimits::default();

        assert!(limits.check_dimensions(5, 5).is_ok());
        assert!(limits.check_dimensions(200, 200).is_ok());
        assert!(limits.check_dimensions(20, 15).is_ok());

        assert!(matches!(
            limits.check_dimensions(4, 20),
            Err(ComposerError::InvalidDimensions {
                width: 4,
                height: 20,
                ..
            })
        ));
        assert!(limits.check_dimensions(20, 201).is_err());
    }

    #[test]
    fn test_zero_is_rejected_even_without_minimum() {
        let limits = GenerationLimits {
            min_dimension: 0,
            ..GenerationLimits::default()
        };

        assert!(limits.check_dimensions(0, 10).is_err());
        assert!(limits.check_dimensions(1, 1).is_ok());
    }

    #[test]
    fn test_check_tile_size() {
        let limits = GenerationLimits::default();

        assert!(limits.check_tile_size(8).is_ok());
        assert!(limits.check_tile_size(128).is_ok());
        assert!(limits.check_tile_size(7).is_err());
        assert!(limits.check_tile_size(129).is_err());
    }

    #[test]
    fn test_auto_grid_candidates() {
        assert_eq!(AUTO_GRID_CANDIDATES[0], 16);
        assert!(AUTO_GRID_CANDIDATES.iter().all(|&divisions| divisions > 0));
        assert_eq!(AUTO_GRID_FALLBACK, 4);
    }
}
