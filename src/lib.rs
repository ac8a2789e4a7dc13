//! Image-to-tile mosaic conversion by nearest-color matching
//!
//! A source image is contrast-enhanced, stretched to a square working size and
//! averaged into a grid of blocks. Each block is replaced by the theme tile
//! whose average color is closest, painted over an optional background.

#![forbid(unsafe_code)]

/// Tile matching, cell compositing and the conversion pipeline
pub mod algorithm;
/// Block averaging and contrast pre-processing of source images
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Color types and distance metrics
pub mod math;
/// Theme tiles and the output canvas
pub mod spatial;

pub use algorithm::pipeline::{Conversion, MosaicConfig, convert, convert_with_config};
pub use io::error::{MosaicError, Result};
