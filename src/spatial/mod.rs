//! Spatial data: theme tiles and the canvas they are painted on
//!
//! This module contains:
//! - Tile loading and the ordered tile set
//! - The output canvas and alpha compositing

/// Output canvas and compositing
pub mod canvas;
/// Theme tile loading and lookup
pub mod tiles;

pub use canvas::Canvas;
pub use tiles::{Tile, TileSet};
