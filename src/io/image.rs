//! PNG boundary: sample images in, generated grids out
//!
//! Pixels are treated as opaque RGBA values. The generators never see the
//! image crate; they work on `Array2<[u8; 4]>`.

use crate::io::error::{Result, WfcError, invalid_input};
use image::{ImageBuffer, Rgba};
use ndarray::Array2;
use std::path::Path;

/// Load a PNG file as a grid of RGBA values indexed `(row, col)`
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The image has no pixels
pub fn load_png_grid(path: &Path) -> Result<Array2<[u8; 4]>> {
    let img = image::open(path).map_err(|e| WfcError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    let rgba_img = img.to_rgba8();
    let (width, height) = (rgba_img.width() as usize, rgba_img.height() as usize);
    if width == 0 || height == 0 {
        return Err(invalid_input(&format!(
            "image '{}' has no pixels",
            path.display()
        )));
    }

    let pixels: Vec<[u8; 4]> = rgba_img.pixels().map(|pixel| pixel.0).collect();
    Array2::from_shape_vec((height, width), pixels)
        .map_err(|err| invalid_input(&format!("pixel buffer mismatch: {err}")))
}

/// Export a grid of RGBA values as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The grid is empty
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &Array2<[u8; 4]>, output_path: &Path) -> Result<()> {
    let (height, width) = grid.dim();
    if width == 0 || height == 0 {
        return Err(invalid_input(&"cannot export an empty grid"));
    }

    let mut img = ImageBuffer::new(width as u32, height as u32);
    for ((row, col), &rgba) in grid.indexed_iter() {
        img.put_pixel(col as u32, row as u32, Rgba(rgba));
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| WfcError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path).map_err(|e| WfcError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
