//! Tests for the compatibility table's inversion symmetry and the engine model

#[cfg(test)]
mod tests {
    use wavetile::analysis::compatibility::{CompatibilityTable, Model};
    use wavetile::spatial::Direction;

    // Allowing a pair records the inverse fact in the opposite direction
    // Verified by dropping the second insertion in allow()
    #[test]
    fn test_allow_is_symmetric() {
        let mut table = CompatibilityTable::new(3);
        table.allow(0, Direction::Right, 2);
        assert!(table.is_compatible(0, Direction::Right, 2));
        assert!(table.is_compatible(2, Direction::Left, 0));
        assert!(!table.is_compatible(2, Direction::Right, 0));
        assert_eq!(table.entry_count(), 2);
    }

    // from_fn derives Left and Up entries from Right and Down answers
    // Verified by evaluating the predicate for all four directions
    #[test]
    fn test_from_fn_fills_all_directions() {
        let table = CompatibilityTable::from_fn(2, |a, _, b| a != b);
        for direction in Direction::ALL {
            assert!(table.is_compatible(0, direction, 1));
            assert!(table.is_compatible(1, direction, 0));
            assert!(!table.is_compatible(0, direction, 0));
        }
        assert_eq!(table.support(0, Direction::Up), 1);
    }

    // Inversion symmetry holds for every pair of a built table
    // Verified by registering Right entries under Left
    #[test]
    fn test_inversion_symmetry() {
        let table = CompatibilityTable::from_fn(4, |a, d, b| (a + b + d.index()) % 3 == 0);
        for a in 0..4 {
            for b in 0..4 {
                for d in Direction::ALL {
                    assert_eq!(
                        table.is_compatible(a, d, b),
                        table.is_compatible(b, d.opposite(), a)
                    );
                }
            }
        }
    }

    // Out-of-range elements are neither stored nor reported
    // Verified by removing the element_count guard in allow()
    #[test]
    fn test_out_of_range() {
        let mut table = CompatibilityTable::new(2);
        table.allow(0, Direction::Down, 5);
        assert_eq!(table.entry_count(), 0);
        assert!(table.compatible(5, Direction::Down).is_none());
        assert_eq!(table.support(5, Direction::Down), 0);
    }

    // The model rejects mismatched, empty and negative weight lists
    // Verified by skipping the length comparison in Model::new
    #[test]
    fn test_model_validation() {
        assert!(Model::new(vec![1.0, 1.0], CompatibilityTable::new(2)).is_ok());
        assert!(Model::new(vec![1.0], CompatibilityTable::new(2)).is_err());
        assert!(Model::new(vec![], CompatibilityTable::new(0)).is_err());
        assert!(Model::new(vec![1.0, -1.0], CompatibilityTable::new(2)).is_err());
        assert!(Model::new(vec![1.0, f64::NAN], CompatibilityTable::new(2)).is_err());
    }

    // The model exposes its element count and weights
    // Verified by returning the weight count of an empty table
    #[test]
    fn test_model_accessors() {
        let model = Model::new(vec![2.0, 3.0, 5.0], CompatibilityTable::new(3))
            .expect("valid model");
        assert_eq!(model.element_count(), 3);
        assert_eq!(model.weights(), &[2.0, 3.0, 5.0]);
        assert_eq!(model.table().element_count(), 3);
    }
}
