//! Tests for error categories, source chaining and message formatting

#[cfg(test)]
mod tests {
    use std::error::Error;
    use tilecomposer::ComposerError;
    use tilecomposer::io::error::{ErrorKind, invalid_grid, invalid_parameter};

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = ComposerError::FileSystem {
            path: "/tmp/tiles.png".into(),
            operation: "read tileset",
            source: io_error,
        };

        assert!(error.source().is_some());
        let message = error.to_string();
        assert!(message.contains("/tmp/tiles.png"));
        assert!(message.contains("read tileset"));
        assert!(message.contains("file not found"));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("tile_size", &500, &"must be within [8, 128]");

        let message = error.to_string();
        assert!(message.contains("tile_size"));
        assert!(message.contains("500"));
        assert!(message.contains("[8, 128]"));
        assert!(error.source().is_none());
    }

    // Tests every variant maps onto the category an outer layer reports
    // Verified by classifying lookups as validation failures
    #[test]
    fn test_error_kinds() {
        let validation = [
            invalid_parameter("width", &0, &"positive"),
            invalid_grid(&"zero columns"),
            ComposerError::InvalidDimensions {
                width: 1,
                height: 1,
                min: 5,
                max: 200,
            },
        ];
        for error in &validation {
            assert_eq!(error.kind(), ErrorKind::Validation, "{error}");
        }

        let not_found = [
            ComposerError::AtlasNotFound { id: "a".into() },
            ComposerError::MapNotFound { id: "m".into() },
            ComposerError::TileNotFound {
                atlas_id: "a".into(),
                tile_id: "t".into(),
            },
        ];
        for error in &not_found {
            assert_eq!(error.kind(), ErrorKind::NotFound, "{error}");
        }

        let processing = [
            ComposerError::NoMeaningfulTiles { regions: 16 },
            ComposerError::EmptyTilePool {
                environment: "dungeon".into(),
            },
            ComposerError::RegionOutOfBounds {
                region: (0, 0, 10, 10),
                image: (5, 5),
            },
        ];
        for error in &processing {
            assert_eq!(error.kind(), ErrorKind::Processing, "{error}");
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::Validation.status_code(), 400);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::Processing.status_code(), 500);
    }

    #[test]
    fn test_messages_name_the_subject() {
        let error = ComposerError::TileNotFound {
            atlas_id: "atlas_1".into(),
            tile_id: "atlas_1_tile_0_0".into(),
        };
        let message = error.to_string();
        assert!(message.contains("atlas_1_tile_0_0"));
        assert!(message.contains("'atlas_1'"));

        let region = ComposerError::RegionOutOfBounds {
            region: (8, 4, 16, 16),
            image: (20, 20),
        };
        assert!(region.to_string().contains("16x16 at (8, 4)"));

        let dimensions = ComposerError::InvalidDimensions {
            width: 3,
            height: 300,
            min: 5,
            max: 200,
        };
        assert!(dimensions.to_string().contains("3x300"));
    }

    #[test]
    fn test_conversions() {
        let json_error = serde_json::from_str::<u32>("nope").expect_err("invalid json");
        let error = ComposerError::from(json_error);
        assert!(matches!(error, ComposerError::Serialization { .. }));
        assert!(error.source().is_some());

        let io_error = std::io::Error::other("disk full");
        let error = ComposerError::from(io_error);
        assert!(matches!(error, ComposerError::FileSystem { .. }));
        assert_eq!(error.kind(), ErrorKind::Processing);
    }
}
