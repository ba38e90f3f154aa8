//! Tests for the overlapping generator: reconstruction, injection and ground

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use std::sync::Arc;
    use wavetile::analysis::patterns::PatternCatalog;
    use wavetile::{GridStatus, OverlappingConfig, OverlappingWfc, WfcError};

    fn checkerboard(size: usize) -> Array2<u8> {
        Array2::from_shape_fn((size, size), |(r, c)| ((r + c) % 2) as u8)
    }

    fn config(width: usize, height: usize, seed: u64) -> OverlappingConfig {
        OverlappingConfig {
            pattern_size: 2,
            out_width: width,
            out_height: height,
            seed: Some(seed),
            ..OverlappingConfig::default()
        }
    }

    fn is_checkerboard(grid: &Array2<u8>) -> bool {
        grid.indexed_iter()
            .all(|((r, c), &value)| value == grid[[0, 0]] ^ ((r + c) % 2) as u8)
    }

    // A checkerboard sample produces a checkerboard of the requested size
    // Verified by reading the bottom-right value of each pattern
    #[test]
    fn test_checkerboard_output() {
        let mut generator = OverlappingWfc::new(&checkerboard(4), config(7, 5, 42)).expect("valid");
        let output = generator.run().expect("checkerboard never contradicts");
        assert_eq!(output.dim(), (5, 7));
        assert!(is_checkerboard(&output));
        assert_eq!(generator.status(), GridStatus::Solved);
    }

    // Bounded outputs shrink the wave by the pattern size minus one
    // Verified by sizing the wave like a periodic output
    #[test]
    fn test_wave_size() {
        let generator = OverlappingWfc::new(&checkerboard(4), config(7, 5, 1)).expect("valid");
        assert_eq!(generator.solver().dimensions().shape(), (4, 6));

        let periodic = OverlappingConfig {
            periodic_output: true,
            ..config(6, 4, 1)
        };
        let generator = OverlappingWfc::new(&checkerboard(4), periodic).expect("valid");
        assert_eq!(generator.solver().dimensions().shape(), (4, 6));
    }

    // An injected pattern fixes the phase of the whole output
    // Verified by ignoring set_pattern
    #[test]
    fn test_set_pattern() {
        let mut generator = OverlappingWfc::new(&checkerboard(4), config(5, 5, 3)).expect("valid");
        generator
            .set_pattern(&array![[1u8, 0], [0, 1]], 2, 2)
            .expect("pattern occurs in the sample");
        let output = generator.run().expect("checkerboard never contradicts");
        assert_eq!(output[[2, 2]], 1);
        assert!(is_checkerboard(&output));
    }

    // Patterns outside the catalog are invalid input
    // Verified by mapping unknown patterns to index 0
    #[test]
    fn test_unknown_pattern() {
        let mut generator = OverlappingWfc::new(&checkerboard(4), config(5, 5, 3)).expect("valid");
        assert!(matches!(
            generator.set_pattern(&array![[1u8, 1], [1, 1]], 0, 0),
            Err(WfcError::InvalidInput { .. })
        ));
    }

    // Ground pins the bottom-center pattern along the bottom and nowhere else
    // Verified by skipping the bans above the bottom row
    #[test]
    fn test_ground_with_periodic_output() {
        let sample = array![[0u8, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 1]];
        let config = OverlappingConfig {
            pattern_size: 2,
            symmetry: 1,
            periodic_output: true,
            ground: true,
            out_width: 6,
            out_height: 6,
            seed: Some(11),
            ..OverlappingConfig::default()
        };
        let mut generator = OverlappingWfc::new(&sample, config).expect("valid");
        let output = generator.run().expect("ground layout is forced");
        for ((row, _), &value) in output.indexed_iter() {
            assert_eq!(value, u8::from(row == 5));
        }
    }

    // Reset reseeds and clears injections
    // Verified by keeping the injected solver across reset
    #[test]
    fn test_reset() {
        let mut generator = OverlappingWfc::new(&checkerboard(4), config(4, 4, 3)).expect("valid");
        generator
            .set_pattern(&array![[1u8, 0], [0, 1]], 0, 0)
            .expect("pattern occurs in the sample");
        generator.reset(17).expect("reset succeeds");
        assert_eq!(generator.seed(), 17);
        assert_eq!(generator.solver().domain(0, 0).map(|d| d.count()), Some(2));
    }

    // A shared catalog overrides the configured pattern size
    // Verified by extracting again with the configured size
    #[test]
    fn test_with_catalog() {
        let catalog = Arc::new(
            PatternCatalog::extract(&checkerboard(4), 2, true, 8).expect("valid sample"),
        );
        let config = OverlappingConfig {
            pattern_size: 3,
            ..config(5, 5, 8)
        };
        let mut generator =
            OverlappingWfc::with_catalog(Arc::clone(&catalog), config).expect("valid");
        assert_eq!(generator.config().pattern_size, 2);
        assert!(Arc::ptr_eq(generator.catalog(), &catalog));
        assert!(is_checkerboard(&generator.run().expect("checkerboard never contradicts")));
    }

    // One catalog serves concurrent generators on separate threads
    // Verified by storing the catalog in an Rc instead of an Arc
    #[test]
    fn test_catalog_shared_across_threads() {
        let catalog = Arc::new(
            PatternCatalog::extract(&checkerboard(4), 2, true, 8).expect("valid sample"),
        );
        let handles: Vec<_> = (0..4u64)
            .map(|seed| {
                let shared = Arc::clone(&catalog);
                std::thread::spawn(move || {
                    let mut generator = OverlappingWfc::with_catalog(shared, config(6, 6, seed))
                        .expect("valid");
                    generator.run().map(|output| is_checkerboard(&output))
                })
            })
            .collect();

        let solved: Vec<bool> = handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .expect("thread finished")
                    .expect("checkerboard never contradicts")
            })
            .collect();
        assert_eq!(solved, vec![true; 4]);
        assert_eq!(Arc::strong_count(&catalog), 1);
    }

    // Configuration errors surface before extraction
    // Verified by validating after extraction
    #[test]
    fn test_invalid_config() {
        let too_small = config(1, 5, 1);
        assert!(matches!(
            OverlappingWfc::new(&checkerboard(4), too_small),
            Err(WfcError::InvalidParameter { .. })
        ));
    }
}
