//! 3×3 marker blocks encoding an oriented tile
//!
//! The canonical block for tile `id` reads `0 1 2 / 3 id 5 / 6 7 8` in row
//! order. Encoding applies the orientation transform to that block. The four
//! corners `{0, 2, 6, 8}` move differently under each of the eight
//! orientations, so decoding finds the orientation by matching corners and
//! reads the tile from the center.

use crate::{
    analysis::adjacency::OrientedTile,
    io::error::{Result, invalid_input, invalid_parameter},
    spatial::Orientation,
};
use ndarray::{Array2, ArrayView2, s};

/// Side length of a marker block
pub const MARKER_SIZE: usize = 3;

fn canonical_marker(tile: usize) -> Array2<usize> {
    Array2::from_shape_fn((MARKER_SIZE, MARKER_SIZE), |(row, col)| {
        if row == 1 && col == 1 {
            tile
        } else {
            row * MARKER_SIZE + col
        }
    })
}

fn corners(block: &ArrayView2<'_, usize>) -> Option<[usize; 4]> {
    let last = MARKER_SIZE - 1;
    Some([
        *block.get((0, 0))?,
        *block.get((0, last))?,
        *block.get((last, 0))?,
        *block.get((last, last))?,
    ])
}

/// Encode an oriented tile as a marker block
///
/// # Errors
///
/// Returns an error if the orientation is 8 or more
pub fn encode_marker(oriented: OrientedTile) -> Result<Array2<usize>> {
    let orientation = Orientation::new(oriented.orientation).ok_or_else(|| {
        invalid_parameter("orientation", &oriented.orientation, &"must be below 8")
    })?;
    Ok(orientation.apply(&canonical_marker(oriented.tile).view()))
}

/// Decode one marker block
///
/// # Errors
///
/// Returns an error if the block is not 3×3 or its corners match no orientation
pub fn decode_marker(block: &ArrayView2<'_, usize>) -> Result<OrientedTile> {
    if block.dim() != (MARKER_SIZE, MARKER_SIZE) {
        let (rows, cols) = block.dim();
        return Err(invalid_input(&format!(
            "marker block must be 3x3, got {rows}x{cols}"
        )));
    }
    let observed = corners(block).ok_or_else(|| invalid_input(&"marker block is incomplete"))?;
    let tile = *block
        .get((1, 1))
        .ok_or_else(|| invalid_input(&"marker block is incomplete"))?;
    let canonical = canonical_marker(tile);

    Orientation::ALL
        .iter()
        .find(|orientation| {
            corners(&orientation.apply(&canonical.view()).view()) == Some(observed)
        })
        .map(|orientation| OrientedTile::new(tile, orientation.index()))
        .ok_or_else(|| invalid_input(&format!("corners {observed:?} match no orientation")))
}

/// Decode a grid made of marker blocks
///
/// # Errors
///
/// Returns an error if the grid dimensions are not multiples of 3 or any
/// block fails to decode
pub fn decode_marker_grid(grid: &Array2<usize>) -> Result<Array2<OrientedTile>> {
    let (rows, cols) = grid.dim();
    if rows % MARKER_SIZE != 0 || cols % MARKER_SIZE != 0 {
        return Err(invalid_input(&format!(
            "marker grid {rows}x{cols} is not a whole number of 3x3 blocks"
        )));
    }
    let (block_rows, block_cols) = (rows / MARKER_SIZE, cols / MARKER_SIZE);
    let cells = (0..block_rows)
        .flat_map(|br| (0..block_cols).map(move |bc| (br, bc)))
        .map(|(br, bc)| {
            let top = br * MARKER_SIZE;
            let left = bc * MARKER_SIZE;
            decode_marker(&grid.slice(s![top..top + MARKER_SIZE, left..left + MARKER_SIZE]))
        })
        .collect::<Result<Vec<OrientedTile>>>()?;
    Array2::from_shape_vec((block_rows, block_cols), cells)
        .map_err(|err| invalid_input(&format!("marker grid shape mismatch: {err}")))
}
