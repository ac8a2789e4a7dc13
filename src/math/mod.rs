//! Color arithmetic shared by reduction and matching

/// Color value types and distance metrics
pub mod color;

pub use color::{Block, Rgb};
