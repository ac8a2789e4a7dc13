//! Per-cell tile selection and painting of the mosaic grid

use crate::algorithm::matching::closest_index;
use crate::io::configuration::{ALPHA_THRESHOLD, NEAR_WHITE_THRESHOLD};
use crate::io::error::{MosaicError, Result};
use crate::math::{Block, Rgb};
use crate::spatial::{Canvas, TileSet};
use ndarray::Array2;
use std::sync::atomic::{AtomicBool, Ordering};

/// Thresholds deciding how each cell is treated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositionRules {
    /// Cells with average alpha below this are skipped
    pub alpha_threshold: u8,
    /// Euclidean distance from white under which the special tile is used
    pub near_white_threshold: f64,
}

impl Default for CompositionRules {
    fn default() -> Self {
        Self {
            alpha_threshold: ALPHA_THRESHOLD,
            near_white_threshold: NEAR_WHITE_THRESHOLD,
        }
    }
}

/// Outcome of the selection rules for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Source was mostly transparent; the canvas is left as is
    Skip,
    /// Near-white cell forced onto the special tile
    Special(usize),
    /// Tile chosen by nearest color
    Matched(usize),
}

impl Selection {
    /// Tile index to paint, if any
    pub const fn tile_index(self) -> Option<usize> {
        match self {
            Self::Skip => None,
            Self::Special(index) | Self::Matched(index) => Some(index),
        }
    }
}

/// Apply the skip, near-white and nearest-color rules in that order
pub fn select_tile(block: Block, tileset: &TileSet, rules: &CompositionRules) -> Selection {
    if block.a < rules.alpha_threshold {
        return Selection::Skip;
    }

    let color = block.rgb();
    if let Some(special) = tileset.special_index() {
        if color.distance(Rgb::WHITE) < rules.near_white_threshold {
            return Selection::Special(special);
        }
    }

    // A tile set is never empty, so the fallback is unreachable in practice
    Selection::Matched(closest_index(color, tileset.colors()).unwrap_or(0))
}

/// Counters gathered while painting one mosaic
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositionStats {
    /// Cells that received a tile
    pub painted: usize,
    /// Cells left unpainted by the transparency rule
    pub skipped: usize,
    /// Cells that received the special tile
    pub special: usize,
    /// Cells per tile, index-aligned with the tile set
    pub usage: Vec<usize>,
}

impl CompositionStats {
    fn new(tile_count: usize) -> Self {
        Self {
            usage: vec![0; tile_count],
            ..Self::default()
        }
    }

    fn record(&mut self, selection: Selection) {
        match selection {
            Selection::Skip => self.skipped += 1,
            Selection::Special(_) => self.special += 1,
            Selection::Matched(_) => {}
        }
        if let Some(count) = selection
            .tile_index()
            .and_then(|index| self.usage.get_mut(index))
        {
            *count += 1;
            self.painted += 1;
        }
    }

    /// Tile names paired with their use counts, most used first
    pub fn ranked<'a>(&self, tileset: &'a TileSet) -> Vec<(&'a str, usize)> {
        let mut ranked: Vec<(&str, usize)> = tileset
            .tiles()
            .iter()
            .zip(&self.usage)
            .filter(|&(_, &count)| count > 0)
            .map(|(tile, &count)| (tile.name(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Paint one tile per block onto the canvas in row-major order
///
/// Block `[row, col]` lands at pixel offset `(col * tile_size, row * tile_size)`.
pub fn compose(
    blocks: &Array2<Block>,
    tileset: &TileSet,
    canvas: &mut Canvas,
    rules: &CompositionRules,
) -> CompositionStats {
    let mut stats = CompositionStats::new(tileset.len());
    for ((row, col), &block) in blocks.indexed_iter() {
        paint_cell(row, col, block, tileset, canvas, rules, &mut stats);
    }
    stats
}

/// Same as [`compose`], checking `cancel` before each grid row
///
/// Output is identical to [`compose`] when the flag is never raised.
///
/// # Errors
///
/// Returns `Cancelled` with the first unpainted row once the flag is seen;
/// the canvas then holds a partial mosaic and should be discarded
pub fn compose_with_cancel(
    blocks: &Array2<Block>,
    tileset: &TileSet,
    canvas: &mut Canvas,
    rules: &CompositionRules,
    cancel: &AtomicBool,
) -> Result<CompositionStats> {
    let mut stats = CompositionStats::new(tileset.len());
    for (row, cells) in blocks.outer_iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            return Err(MosaicError::Cancelled { row: row as u32 });
        }
        for (col, &block) in cells.iter().enumerate() {
            paint_cell(row, col, block, tileset, canvas, rules, &mut stats);
        }
    }
    Ok(stats)
}

fn paint_cell(
    row: usize,
    col: usize,
    block: Block,
    tileset: &TileSet,
    canvas: &mut Canvas,
    rules: &CompositionRules,
    stats: &mut CompositionStats,
) {
    let selection = select_tile(block, tileset, rules);
    stats.record(selection);

    if let Some(tile) = selection.tile_index().and_then(|index| tileset.get(index)) {
        let size = tileset.tile_size();
        canvas.blit(tile.image(), col as u32 * size, row as u32 * size);
    }
}
