//! Boundary code around the generation core
//!
//! Errors and configuration are shared with the core; everything else here
//! (images, markers, CLI, progress, logging) sits outside it.

/// Command-line parsing and batch file processing
pub mod cli;
/// Generation defaults and configuration structs
pub mod configuration;
/// Crate-wide error type
pub mod error;
/// PNG loading and export
pub mod image;
/// Tracing subscriber installation
pub mod logging;
/// 3×3 marker encoding of oriented tiles
pub mod marker;
/// Terminal progress bars for batch runs
pub mod progress;
