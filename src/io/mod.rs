//! Input/output: command line, configuration, errors, image files and logging

/// Command-line parsing and batch processing
pub mod cli;
/// Default constants
pub mod configuration;
/// Error taxonomy
pub mod error;
/// Image decoding, resizing and PNG export
pub mod image;
/// Logger installation
pub mod logging;
/// Batch progress display
pub mod progress;
