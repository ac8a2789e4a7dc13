//! Mosaic construction: color matching, cell compositing and the conversion pipeline

/// Cell selection rules and tile painting
pub mod compositor;
/// Nearest-color tile lookup
pub mod matching;
/// Conversion entry points and configuration
pub mod pipeline;
