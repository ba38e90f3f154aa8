//! Generation constants and runtime configuration defaults

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::transform::ORIENTATION_COUNT;

/// Default side length of overlapping patterns
pub const DEFAULT_PATTERN_SIZE: usize = 3;

/// Default number of orientation variants per sample window
pub const DEFAULT_SYMMETRY: usize = 8;

/// Default output width in cells
pub const DEFAULT_OUTPUT_WIDTH: usize = 48;

/// Default output height in cells
pub const DEFAULT_OUTPUT_HEIGHT: usize = 48;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Generation attempts per input before giving up
pub const DEFAULT_ATTEMPTS: usize = 10;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";

/// Parameters of an overlapping-pattern generation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlappingConfig {
    /// Side length N of extracted patterns
    pub pattern_size: usize,
    /// Whether sample windows wrap around the sample edges
    pub periodic_input: bool,
    /// Whether the output wraps around its edges
    pub periodic_output: bool,
    /// Pin the sample's bottom-center pattern to the bottom row
    pub ground: bool,
    /// Number of orientation variants per window, 1 to 8
    pub symmetry: usize,
    /// Output width in cells
    pub out_width: usize,
    /// Output height in cells
    pub out_height: usize,
    /// Random seed; drawn from system entropy when absent
    pub seed: Option<u64>,
}

impl Default for OverlappingConfig {
    fn default() -> Self {
        Self {
            pattern_size: DEFAULT_PATTERN_SIZE,
            periodic_input: true,
            periodic_output: false,
            ground: false,
            symmetry: DEFAULT_SYMMETRY,
            out_width: DEFAULT_OUTPUT_WIDTH,
            out_height: DEFAULT_OUTPUT_HEIGHT,
            seed: None,
        }
    }
}

impl OverlappingConfig {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `pattern_size` is zero
    /// - `symmetry` lies outside 1..=8
    /// - An output dimension is zero or exceeds [`MAX_GRID_DIMENSION`]
    /// - A non-periodic output is smaller than one pattern
    pub fn validate(&self) -> Result<()> {
        if self.pattern_size == 0 {
            return Err(invalid_parameter(
                "pattern_size",
                &self.pattern_size,
                &"must be at least 1",
            ));
        }
        if !(1..=ORIENTATION_COUNT).contains(&self.symmetry) {
            return Err(invalid_parameter(
                "symmetry",
                &self.symmetry,
                &"must be between 1 and 8",
            ));
        }
        validate_dimension("out_width", self.out_width)?;
        validate_dimension("out_height", self.out_height)?;
        if !self.periodic_output {
            if self.out_width < self.pattern_size {
                return Err(invalid_parameter(
                    "out_width",
                    &self.out_width,
                    &"non-periodic output must be at least one pattern wide",
                ));
            }
            if self.out_height < self.pattern_size {
                return Err(invalid_parameter(
                    "out_height",
                    &self.out_height,
                    &"non-periodic output must be at least one pattern tall",
                ));
            }
        }
        Ok(())
    }

    /// Wave dimensions `(width, height)` for this output
    ///
    /// Non-periodic outputs need one wave cell per pattern origin, so each
    /// axis shrinks by `pattern_size - 1`.
    pub const fn wave_size(&self) -> (usize, usize) {
        if self.periodic_output {
            (self.out_width, self.out_height)
        } else {
            (
                (self.out_width + 1).saturating_sub(self.pattern_size),
                (self.out_height + 1).saturating_sub(self.pattern_size),
            )
        }
    }
}

/// Parameters of a tiling generation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TilingConfig {
    /// Grid width in tiles
    pub width: usize,
    /// Grid height in tiles
    pub height: usize,
    /// Whether the grid wraps around its edges
    pub periodic_output: bool,
    /// Random seed; drawn from system entropy when absent
    pub seed: Option<u64>,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_OUTPUT_WIDTH,
            height: DEFAULT_OUTPUT_HEIGHT,
            periodic_output: false,
            seed: None,
        }
    }
}

impl TilingConfig {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or exceeds [`MAX_GRID_DIMENSION`]
    pub fn validate(&self) -> Result<()> {
        validate_dimension("width", self.width)?;
        validate_dimension("height", self.height)
    }
}

fn validate_dimension(parameter: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(invalid_parameter(parameter, &value, &"must be at least 1"));
    }
    if value > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            parameter,
            &value,
            &format!("must not exceed {MAX_GRID_DIMENSION}"),
        ));
    }
    Ok(())
}
