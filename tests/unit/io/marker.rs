//! Tests for 3×3 marker encoding and decoding of oriented tiles

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array, concatenate, Axis};
    use wavetile::analysis::adjacency::OrientedTile;
    use wavetile::io::marker::{decode_marker, decode_marker_grid, encode_marker};

    // Tests the identity marker is the canonical block
    // Verified by placing the tile id in a corner
    #[test]
    fn test_canonical_marker() {
        let block = encode_marker(OrientedTile::new(42, 0)).expect("valid orientation");
        assert_eq!(block, array![[0usize, 1, 2], [3, 42, 5], [6, 7, 8]]);
    }

    // Tests every orientation decodes back to itself
    // Verified by comparing only the top-left corner
    #[test]
    fn test_every_orientation_decodes() {
        for orientation in 0..8 {
            let tile = OrientedTile::new(4, orientation);
            let block = encode_marker(tile).expect("valid orientation");
            assert_eq!(decode_marker(&block.view()).expect("decodes"), tile);
        }
    }

    // Tests a quarter turn moves the bottom-left corner to the top-left
    // Verified by rotating counterclockwise
    #[test]
    fn test_quarter_turn_layout() {
        let block = encode_marker(OrientedTile::new(9, 1)).expect("valid orientation");
        assert_eq!(block, array![[6usize, 3, 0], [7, 9, 1], [8, 5, 2]]);
    }

    // Tests malformed blocks are rejected
    // Verified by accepting any block with a center
    #[test]
    fn test_invalid_blocks() {
        assert!(encode_marker(OrientedTile::new(0, 8)).is_err());
        let scrambled = array![[8usize, 1, 0], [3, 4, 5], [6, 7, 2]];
        assert!(decode_marker(&scrambled.view()).is_err());
        let small = Array2::<usize>::zeros((2, 2));
        assert!(decode_marker(&small.view()).is_err());
    }

    // Tests a grid of blocks decodes block by block
    // Verified by swapping block rows and columns
    #[test]
    fn test_decode_grid() {
        let left = encode_marker(OrientedTile::new(1, 3)).expect("valid orientation");
        let right = encode_marker(OrientedTile::new(2, 6)).expect("valid orientation");
        let grid = concatenate(Axis(1), &[left.view(), right.view()]).expect("same height");

        let decoded = decode_marker_grid(&grid).expect("decodes");
        assert_eq!(decoded, array![[OrientedTile::new(1, 3), OrientedTile::new(2, 6)]]);

        let ragged = Array2::<usize>::zeros((3, 4));
        assert!(decode_marker_grid(&ragged).is_err());
    }
}
