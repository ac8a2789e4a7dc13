//! End-to-end conversion of a source image into a tile mosaic file

use crate::algorithm::compositor::{
    CompositionRules, CompositionStats, compose, compose_with_cancel,
};
use crate::analysis::blocks::reduce;
use crate::analysis::enhance::contrast;
use crate::io::configuration::{
    ALPHA_THRESHOLD, CONTRAST_FACTOR, DEFAULT_BACKGROUND_PATH, DEFAULT_THEME_DIR, GRID_SIZE,
    NEAR_WHITE_THRESHOLD, OUTPUT_EXTENSION, OUTPUT_PREFIX, SPECIAL_TILE_NAME, TILE_SIZE,
    WORKING_SIZE,
};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::{open_rgba, resize_exact, write_png_atomic};
use crate::spatial::{Canvas, TileSet};
use image::{RgbImage, RgbaImage};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

/// Every tunable of a conversion
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicConfig {
    /// Directory holding the theme's tile images
    pub theme_dir: PathBuf,
    /// Optional background painted beneath the tiles
    pub background: Option<PathBuf>,
    /// Cells along each axis
    pub grid_size: u32,
    /// Tile edge length in pixels
    pub tile_size: u32,
    /// Edge length the source is stretched to before reduction
    pub working_size: u32,
    /// Contrast factor applied before reduction
    pub contrast: f32,
    /// Cells with average alpha below this are skipped
    pub alpha_threshold: u8,
    /// Euclidean distance from white under which the special tile is used
    pub near_white_threshold: f64,
    /// File name of the special tile; `None` disables the near-white rule
    pub special_tile: Option<String>,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            theme_dir: PathBuf::from(DEFAULT_THEME_DIR),
            background: Some(PathBuf::from(DEFAULT_BACKGROUND_PATH)),
            grid_size: GRID_SIZE,
            tile_size: TILE_SIZE,
            working_size: WORKING_SIZE,
            contrast: CONTRAST_FACTOR,
            alpha_threshold: ALPHA_THRESHOLD,
            near_white_threshold: NEAR_WHITE_THRESHOLD,
            special_tile: Some(SPECIAL_TILE_NAME.to_string()),
        }
    }
}

impl MosaicConfig {
    /// Check that the geometry and thresholds describe a paintable mosaic
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `grid_size` or `tile_size` is zero
    /// - `working_size` is not `grid_size * tile_size`
    /// - `contrast` is negative or not finite
    /// - `near_white_threshold` is negative or not finite
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(invalid_parameter("grid_size", &self.grid_size, &"must be positive"));
        }
        if self.tile_size == 0 {
            return Err(invalid_parameter("tile_size", &self.tile_size, &"must be positive"));
        }
        if self.grid_size.checked_mul(self.tile_size) != Some(self.working_size) {
            return Err(invalid_parameter(
                "working_size",
                &self.working_size,
                &format!(
                    "must equal grid_size * tile_size ({} * {})",
                    self.grid_size, self.tile_size
                ),
            ));
        }
        if !self.contrast.is_finite() || self.contrast < 0.0 {
            return Err(invalid_parameter(
                "contrast",
                &self.contrast,
                &"must be a finite, non-negative factor",
            ));
        }
        if !self.near_white_threshold.is_finite() || self.near_white_threshold < 0.0 {
            return Err(invalid_parameter(
                "near_white_threshold",
                &self.near_white_threshold,
                &"must be a finite, non-negative distance",
            ));
        }
        Ok(())
    }

    /// Selection thresholds for the compositor
    pub const fn rules(&self) -> CompositionRules {
        CompositionRules {
            alpha_threshold: self.alpha_threshold,
            near_white_threshold: self.near_white_threshold,
        }
    }

    /// Load the configured theme
    ///
    /// # Errors
    ///
    /// Propagates `ThemeNotFound`, `EmptyTheme` and `TileLoad` from the loader
    pub fn load_tileset(&self) -> Result<TileSet> {
        TileSet::load(&self.theme_dir, self.tile_size, self.special_tile.as_deref())
    }
}

/// Result of a successful conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Where the mosaic was written
    pub output_path: PathBuf,
    /// Per-cell counters from composition
    pub stats: CompositionStats,
}

/// Destination for a converted input: `{output_dir}/MAP_{stem}.png`
pub fn output_path(input_path: &Path, output_dir: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    output_dir.join(format!(
        "{OUTPUT_PREFIX}{}.{OUTPUT_EXTENSION}",
        stem.to_string_lossy()
    ))
}

/// Convert one image with the default theme and settings
///
/// This is the single entry point callers outside the crate need.
///
/// # Errors
///
/// Returns `ThemeNotFound` or `EmptyTheme` for a bad theme,
/// `InvalidInputImage` if the input cannot be decoded, and a file system or
/// export error if writing fails. Nothing is written on failure.
pub fn convert(input_path: &Path, output_dir: &Path) -> Result<PathBuf> {
    convert_with_config(input_path, output_dir, &MosaicConfig::default())
        .map(|conversion| conversion.output_path)
}

/// Convert one image, loading the theme named by `config`
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the theme cannot be
/// loaded, the input cannot be decoded, or the output cannot be written
pub fn convert_with_config(
    input_path: &Path,
    output_dir: &Path,
    config: &MosaicConfig,
) -> Result<Conversion> {
    config.validate()?;
    let tileset = config.load_tileset()?;
    convert_with_tileset(input_path, output_dir, &tileset, config, None)
}

/// Convert one image against an already loaded tile set
///
/// Lets a caller reuse one theme across many conversions. When `cancel` is
/// raised mid-way the conversion stops and nothing is written.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or disagrees with the
/// tile set's tile size, the input cannot be decoded, the run is cancelled,
/// or the output cannot be written
pub fn convert_with_tileset(
    input_path: &Path,
    output_dir: &Path,
    tileset: &TileSet,
    config: &MosaicConfig,
    cancel: Option<&AtomicBool>,
) -> Result<Conversion> {
    config.validate()?;
    if tileset.tile_size() != config.tile_size {
        return Err(invalid_parameter(
            "tile_size",
            &config.tile_size,
            &format!("tile set was loaded at {}", tileset.tile_size()),
        ));
    }

    let source = open_rgba(input_path).map_err(|e| MosaicError::InvalidInputImage {
        path: input_path.to_path_buf(),
        source: e,
    })?;
    log::debug!(
        "Decoded '{}' ({}x{})",
        input_path.display(),
        source.width(),
        source.height()
    );

    let canvas = Canvas::from_background(config.background.as_deref(), config.working_size);
    let (mosaic, stats) = render(&source, tileset, canvas, config, cancel)?;

    let output_path = output_path(input_path, output_dir);
    write_png_atomic(&mosaic, &output_path)?;
    log::debug!(
        "Wrote '{}' ({} painted, {} skipped, {} special)",
        output_path.display(),
        stats.painted,
        stats.skipped,
        stats.special
    );

    Ok(Conversion { output_path, stats })
}

/// Run the in-memory part of a conversion on a decoded image
///
/// Enhances contrast, stretches to the working size, reduces to blocks,
/// paints them onto `canvas` and flattens the result to opaque RGB.
///
/// # Errors
///
/// Returns an error if the working size is not divisible by the grid size,
/// or `Cancelled` if `cancel` is raised
pub fn render(
    source: &RgbaImage,
    tileset: &TileSet,
    mut canvas: Canvas,
    config: &MosaicConfig,
    cancel: Option<&AtomicBool>,
) -> Result<(RgbImage, CompositionStats)> {
    let enhanced = contrast(source, config.contrast);
    let working = resize_exact(&enhanced, config.working_size, config.working_size);
    let blocks = reduce(&working, config.grid_size)?;

    let rules = config.rules();
    let stats = match cancel {
        Some(flag) => compose_with_cancel(&blocks, tileset, &mut canvas, &rules, flag)?,
        None => compose(&blocks, tileset, &mut canvas, &rules),
    };

    Ok((canvas.flatten(), stats))
}
