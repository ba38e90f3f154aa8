//! Tests for axis directions, their indices and inversions

#[cfg(test)]
mod tests {
    use wavetile::spatial::Direction;

    // Opposite directions must sum to 3 so tables can invert by subtraction
    // Verified by swapping Left and Right in opposite()
    #[test]
    fn test_opposite_indices_sum_to_three() {
        for direction in Direction::ALL {
            assert_eq!(direction.index() + direction.opposite().index(), 3);
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    // Index round trip covers exactly the four directions
    // Verified by mapping index 2 to Down
    #[test]
    fn test_from_index() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_index(direction.index()), Some(direction));
        }
        assert_eq!(Direction::from_index(4), None);
    }

    // Offsets follow (row, col) with Up towards row - 1
    // Verified by flipping the sign of the Up offset
    #[test]
    fn test_offsets() {
        assert_eq!(Direction::Up.offset(), (-1, 0));
        assert_eq!(Direction::Left.offset(), (0, -1));
        assert_eq!(Direction::Right.offset(), (0, 1));
        assert_eq!(Direction::Down.offset(), (1, 0));
    }

    // Four clockwise turns return to the start, one turn moves Right to Down
    // Verified by rotating Right to Up
    #[test]
    fn test_clockwise_rotation() {
        assert_eq!(Direction::Right.rotated_clockwise(), Direction::Down);
        assert_eq!(Direction::Up.rotated_clockwise(), Direction::Right);
        for direction in Direction::ALL {
            let back = direction
                .rotated_clockwise()
                .rotated_clockwise()
                .rotated_clockwise()
                .rotated_clockwise();
            assert_eq!(back, direction);
        }
    }

    // Mirroring swaps only the horizontal directions
    // Verified by also swapping Up and Down in mirrored()
    #[test]
    fn test_mirrored() {
        assert_eq!(Direction::Left.mirrored(), Direction::Right);
        assert_eq!(Direction::Right.mirrored(), Direction::Left);
        assert_eq!(Direction::Up.mirrored(), Direction::Up);
        assert_eq!(Direction::Down.mirrored(), Direction::Down);
    }
}
