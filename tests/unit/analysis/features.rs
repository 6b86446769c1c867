//! Tests for tile pixel statistics and the meaningful-content filter

#[cfg(test)]
mod tests {
    use tilecomposer::analysis::features::{Color, extract_features, is_meaningful};
    use tilecomposer::io::image::PixelBuffer;

    fn buffer(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 4]) -> PixelBuffer {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&pixel(x, y));
            }
        }
        PixelBuffer::rgba(width, height, data).expect("valid buffer")
    }

    // Tests a flat tile has no variance, no edges and one color
    // Verified by counting colors including alpha
    #[test]
    fn test_uniform_tile_features() {
        let features = extract_features(&buffer(8, 8, |_, _| [60, 150, 30, 255]));

        assert!((features.dominant_color.r - 60.0).abs() < 1e-9);
        assert!((features.dominant_color.g - 150.0).abs() < 1e-9);
        assert!((features.brightness - 80.0).abs() < 1e-9);
        assert!(features.variance.abs() < 1e-9);
        assert_eq!(features.edges, 0);
        assert_eq!(features.color_complexity, 1);
        assert!(!features.has_transparency);
    }

    // Tests edges are counted along the flat scan order
    // Verified by comparing against the pixel above instead
    #[test]
    fn test_checkerboard_edges() {
        let features = extract_features(&buffer(2, 2, |x, y| {
            if (x + y) % 2 == 0 {
                [0, 0, 0, 255]
            } else {
                [255, 255, 255, 255]
            }
        }));

        // Scan order black, white, white, black: the row wrap is not a jump
        assert_eq!(features.edges, 2);
        assert_eq!(features.color_complexity, 2);
        assert!((features.brightness - 127.5).abs() < 1e-9);
        assert!((features.variance - 382.5).abs() < 1e-9);
    }

    #[test]
    fn test_small_brightness_steps_are_not_edges() {
        let features = extract_features(&buffer(10, 1, |x, _| {
            let level = 10 + (x as u8) * 20;
            [level, level, level, 255]
        }));

        assert_eq!(features.edges, 0);
        assert_eq!(features.color_complexity, 10);
    }

    #[test]
    fn test_transparency_detection() {
        let features = extract_features(&buffer(4, 4, |x, y| {
            if x == 3 && y == 3 {
                [10, 10, 10, 254]
            } else {
                [10, 10, 10, 255]
            }
        }));

        assert!(features.has_transparency);
    }

    #[test]
    fn test_rgb_buffers_are_opaque() {
        let rgb = PixelBuffer::new(2, 1, 3, vec![200, 10, 10, 200, 10, 10]).expect("rgb");
        let features = extract_features(&rgb);

        assert!(!features.has_transparency);
        assert_eq!(
            features.dominant_color,
            Color {
                r: 200.0,
                g: 10.0,
                b: 10.0
            }
        );
    }

    #[test]
    fn test_empty_buffer_features() {
        let features = extract_features(&PixelBuffer::default());

        assert_eq!(features.edges, 0);
        assert_eq!(features.color_complexity, 0);
        assert!(!is_meaningful(&PixelBuffer::default()));
    }

    // Tests the meaningful filter rejects transparent and mid-gray tiles
    // Verified by dropping the contrast requirement
    #[test]
    fn test_is_meaningful() {
        assert!(is_meaningful(&buffer(8, 8, |_, _| [20, 20, 20, 255])));
        assert!(is_meaningful(&buffer(8, 8, |_, _| [240, 240, 240, 255])));

        assert!(!is_meaningful(&buffer(8, 8, |_, _| [20, 20, 20, 0])));
        assert!(!is_meaningful(&buffer(8, 8, |_, _| [128, 128, 128, 255])));
        assert!(!is_meaningful(&buffer(8, 8, |_, _| [131, 130, 129, 255])));
    }

    // Tests the alpha threshold is strict
    // Verified by using a non-strict comparison
    #[test]
    fn test_alpha_threshold() {
        assert!(!is_meaningful(&buffer(4, 4, |_, _| [0, 0, 0, 50])));
        assert!(is_meaningful(&buffer(4, 4, |_, _| [0, 0, 0, 51])));
    }

    #[test]
    fn test_color_brightness() {
        let color = Color {
            r: 30.0,
            g: 60.0,
            b: 90.0,
        };
        assert!((color.brightness() - 60.0).abs() < 1e-9);
    }
}
