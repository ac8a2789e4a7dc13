//! Image analysis that turns a source image into averaged grid samples

/// Grid block averaging
pub mod blocks;
/// Contrast pre-processing
pub mod enhance;
