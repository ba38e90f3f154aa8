//! Error types for catalog construction, constraint injection and generation

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum WfcError {
    /// Failed to load a sample image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Input data doesn't meet the requirements of the model builders
    ///
    /// Covers empty or ragged sample grids, pattern sizes that do not fit a
    /// non-periodic sample, unknown tile references and malformed tile sets.
    InvalidInput {
        /// Description of what's wrong with the input
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// An injected constraint contradicts the current domain of a cell
    ///
    /// Reported at injection time, either because the element was already
    /// excluded from the cell or because propagating the injection emptied
    /// some domain.
    ConstraintConflict {
        /// Wave row of the injected cell
        row: usize,
        /// Wave column of the injected cell
        col: usize,
        /// Catalog index of the injected element
        element: usize,
    },

    /// Propagation emptied a domain during generation
    GenerationContradiction {
        /// Number of observations performed before the contradiction
        iteration: usize,
        /// Wave dimensions (rows, cols)
        grid_dimensions: (usize, usize),
    },

    /// Operation requires a configured generator of a specific kind
    NotInitialized {
        /// Name of the operation that was attempted
        operation: &'static str,
        /// The kind of generator the operation requires
        expected: &'static str,
    },

    /// Failed to save a generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for WfcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidInput { reason } => {
                write!(f, "Invalid input: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ConstraintConflict { row, col, element } => {
                write!(
                    f,
                    "Constraint conflict: element {element} cannot be placed at ({row}, {col})"
                )
            }
            Self::GenerationContradiction {
                iteration,
                grid_dimensions,
            } => {
                write!(
                    f,
                    "Contradiction reached after {iteration} observations (wave size {}x{})",
                    grid_dimensions.1, grid_dimensions.0
                )
            }
            Self::NotInitialized {
                operation,
                expected,
            } => {
                write!(f, "Cannot {operation}: no {expected} generator is configured")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for WfcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl WfcError {
    /// Whether a retry with a different seed could succeed
    ///
    /// Only contradictions depend on the random stream; every other kind
    /// fails identically on each attempt.
    pub const fn is_contradiction(&self) -> bool {
        matches!(
            self,
            Self::GenerationContradiction { .. } | Self::ConstraintConflict { .. }
        )
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, WfcError>;

impl From<image::ImageError> for WfcError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for WfcError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid input error
pub fn invalid_input(reason: &impl ToString) -> WfcError {
    WfcError::InvalidInput {
        reason: reason.to_string(),
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> WfcError {
    WfcError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
