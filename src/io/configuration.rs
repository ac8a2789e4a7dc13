//! Mosaic constants and runtime configuration defaults

// Grid geometry
/// Number of grid cells along each axis of the output
pub const GRID_SIZE: u32 = 60;

/// Edge length in pixels of a single tile after normalization
pub const TILE_SIZE: u32 = 10;

// Source images are stretched to this square before reduction
/// Edge length in pixels of the working canvas
pub const WORKING_SIZE: u32 = GRID_SIZE * TILE_SIZE;

// Pre-processing
/// Multiplicative contrast factor applied to the source image
pub const CONTRAST_FACTOR: f32 = 1.5;

// Cell selection rules
/// Cells whose average alpha is below this value are left unpainted
pub const ALPHA_THRESHOLD: u8 = 50;

// Calibrated for true Euclidean distance, not squared distance
/// Maximum distance from pure white that selects the special tile
pub const NEAR_WHITE_THRESHOLD: f64 = 20.0;

/// File name of the tile used for near-white cells
pub const SPECIAL_TILE_NAME: &str = "Breakable-Mine.png";

// Asset locations
/// Theme directory holding the tile images
pub const DEFAULT_THEME_DIR: &str = "BS_MAP/Desert";

/// Optional background grid drawn beneath the tiles
pub const DEFAULT_BACKGROUND_PATH: &str = "BS_MAP/GRID/grid_60x60.png";

// Output settings
/// Directory receiving converted images
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Prefix added to output filenames
pub const OUTPUT_PREFIX: &str = "MAP_";

/// Extension of every output file
pub const OUTPUT_EXTENSION: &str = "png";

/// Unix mode of written mosaics, owner read-write and world-readable
#[cfg(unix)]
pub const OUTPUT_FILE_MODE: u32 = 0o644;

/// File extensions recognized as images, compared case-insensitively
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
