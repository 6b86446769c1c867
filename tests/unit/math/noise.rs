//! Tests for the position-seeded value stream and analytic fields

#[cfg(test)]
mod tests {
    use tilecomposer::math::noise::{CellRng, abstract_field, nature_field};

    // Tests the same seed and position reproduce the same value
    // Verified by mixing wall-clock time into the initial state
    #[test]
    fn test_cell_rng_is_reproducible() {
        let first = CellRng::new(42, 0, 0).next_value();
        let second = CellRng::new(42, 0, 0).next_value();

        assert_eq!(first.to_bits(), second.to_bits());
        assert!((0.0..1.0).contains(&first));
    }

    // Tests the first values follow the sine recurrence exactly
    // Verified by replacing the 10000 multiplier
    #[test]
    fn test_cell_rng_recurrence() {
        let state = 7.0_f64 + 3.0 * 12345.0 + 2.0 * 67890.0;
        let expected_state = state.sin() * 10000.0;
        let expected = expected_state - expected_state.floor();

        let mut rng = CellRng::new(7, 3, 2);
        assert_eq!(rng.next_value().to_bits(), expected.to_bits());

        let next_state = expected_state.sin() * 10000.0;
        let expected_next = next_state - next_state.floor();
        assert_eq!(rng.next_value().to_bits(), expected_next.to_bits());
    }

    // Tests neighbouring cells get different streams
    // Verified by dropping the x term from the initial state
    #[test]
    fn test_cell_rng_depends_on_position() {
        let origin = CellRng::new(42, 0, 0).next_value();
        let right = CellRng::new(42, 1, 0).next_value();
        let below = CellRng::new(42, 0, 1).next_value();

        assert_ne!(origin.to_bits(), right.to_bits());
        assert_ne!(origin.to_bits(), below.to_bits());
    }

    #[test]
    fn test_values_stay_in_unit_interval() {
        for y in 0..20 {
            for x in 0..20 {
                let mut rng = CellRng::new(1234, x, y);
                for _ in 0..3 {
                    let value = rng.next_value();
                    assert!((0.0..1.0).contains(&value), "{value} at ({x}, {y})");
                }
            }
        }
    }

    // Tests index picks stay in range and empty collections yield nothing
    // Verified by removing the empty check
    #[test]
    fn test_pick_index() {
        let mut rng = CellRng::new(5, 4, 3);
        assert_eq!(rng.pick_index(0), None);

        for len in 1..10 {
            let index = rng.pick_index(len).expect("non-empty collection");
            assert!(index < len);
        }
    }

    #[test]
    fn test_fields_at_origin_and_bounds() {
        assert!(nature_field(0, 0).abs() < f64::EPSILON);
        assert!(abstract_field(0, 0).abs() < f64::EPSILON);

        for y in 0..50 {
            for x in 0..50 {
                assert!(nature_field(x, y).abs() <= 2.0);
                assert!(abstract_field(x, y).abs() <= 2.0);
            }
        }
    }

    // Tests the abstract field combines both sinusoids
    // Verified by dropping the diagonal term
    #[test]
    fn test_abstract_field_value() {
        let expected = (1.0_f64).sin() * (0.0_f64).cos() + (0.75_f64).sin();
        assert!((abstract_field(5, 0) - expected).abs() < 1e-12);
    }
}
