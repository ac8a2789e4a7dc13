//! Command-line interface for converting single images or whole directories

use crate::algorithm::pipeline::{MosaicConfig, convert_with_tileset, output_path};
use crate::io::configuration::{
    ALPHA_THRESHOLD, CONTRAST_FACTOR, DEFAULT_BACKGROUND_PATH, DEFAULT_OUTPUT_DIR,
    DEFAULT_THEME_DIR, GRID_SIZE, IMAGE_EXTENSIONS, NEAR_WHITE_THRESHOLD, SPECIAL_TILE_NAME,
    TILE_SIZE,
};
use crate::io::error::{Result, file_system_error, io_error};
use crate::io::image::has_extension;
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "tilemosaic")]
#[command(author, version, about = "Turn images into tile mosaics")]
/// Command-line arguments for the mosaic converter
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image or directory of images to convert
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory receiving MAP_<name>.png files
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Directory of tile images
    #[arg(short, long, default_value = DEFAULT_THEME_DIR)]
    pub theme: PathBuf,

    /// Background image drawn beneath the tiles
    #[arg(short, long, default_value = DEFAULT_BACKGROUND_PATH)]
    pub background: PathBuf,

    /// Start from a blank white canvas even if the background exists
    #[arg(long)]
    pub no_background: bool,

    /// Cells along each axis of the mosaic
    #[arg(short, long, default_value_t = GRID_SIZE)]
    pub grid: u32,

    /// Edge length of each tile in pixels
    #[arg(long, default_value_t = TILE_SIZE)]
    pub tile_size: u32,

    /// Contrast factor applied before matching
    #[arg(short, long, default_value_t = CONTRAST_FACTOR)]
    pub contrast: f32,

    /// Average alpha below which a cell is left unpainted
    #[arg(long, default_value_t = ALPHA_THRESHOLD)]
    pub alpha_threshold: u8,

    /// Distance from white under which the special tile is used
    #[arg(long, default_value_t = NEAR_WHITE_THRESHOLD)]
    pub near_white_threshold: f64,

    /// File name of the special tile for near-white cells
    #[arg(long, default_value = SPECIAL_TILE_NAME)]
    pub special_tile: String,

    /// Disable the near-white special tile rule
    #[arg(long)]
    pub no_special: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Convert files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Build the conversion settings described by the flags
    pub fn config(&self) -> MosaicConfig {
        MosaicConfig {
            theme_dir: self.theme.clone(),
            background: (!self.no_background).then(|| self.background.clone()),
            grid_size: self.grid,
            tile_size: self.tile_size,
            working_size: self.grid.saturating_mul(self.tile_size),
            contrast: self.contrast,
            alpha_threshold: self.alpha_threshold,
            near_white_threshold: self.near_white_threshold,
            special_tile: (!self.no_special).then(|| self.special_tile.clone()),
        }
    }
}

/// Outcome counts for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files written
    pub converted: usize,
    /// Files whose output already existed
    pub skipped: usize,
    /// Files that failed to convert
    pub failed: usize,
}

/// Orchestrates batch conversion with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Convert every file selected by the CLI arguments
    ///
    /// The theme is loaded once for the whole batch. A file that fails is
    /// logged and counted, and the batch moves on.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the target cannot
    /// be read, or the theme cannot be loaded
    pub fn process(&mut self) -> Result<BatchSummary> {
        let config = self.cli.config();
        config.validate()?;

        let (files, skipped) = self.collect_files()?;
        let mut summary = BatchSummary {
            skipped,
            ..BatchSummary::default()
        };
        if files.is_empty() {
            log::info!("Nothing to convert");
            return Ok(summary);
        }

        let tileset = config.load_tileset()?;
        log::info!(
            "Theme '{}': {} tiles{}",
            config.theme_dir.display(),
            tileset.len(),
            if tileset.special_index().is_some() {
                ", special tile present"
            } else {
                ""
            }
        );

        if let Some(ref pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            let start_time = Instant::now();
            if let Some(ref pm) = self.progress_manager {
                pm.start_file(file);
            }

            let result =
                convert_with_tileset(file, &self.cli.output_dir, &tileset, &config, None);
            self.report(|| match &result {
                Ok(conversion) => {
                    log::info!(
                        "{} -> {} in {:.2?}",
                        file.display(),
                        conversion.output_path.display(),
                        start_time.elapsed()
                    );
                    for (name, count) in conversion.stats.ranked(&tileset).iter().take(3) {
                        log::debug!("  {name}: {count} cells");
                    }
                }
                Err(e) => log::error!("{}: {e}", file.display()),
            });

            if result.is_ok() {
                summary.converted += 1;
            } else {
                summary.failed += 1;
            }

            if let Some(ref pm) = self.progress_manager {
                pm.complete_file();
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(summary)
    }

    fn report(&self, log: impl FnOnce()) {
        match self.progress_manager {
            Some(ref pm) => pm.suspend(log),
            None => log(),
        }
    }

    /// Files to convert, plus the number skipped because output exists
    fn collect_files(&self) -> Result<(Vec<PathBuf>, usize)> {
        let target = &self.cli.target;
        let candidates = if target.is_file() {
            if !has_extension(target, &IMAGE_EXTENSIONS) {
                return Err(io_error("Target file must be a PNG or JPEG image"));
            }
            vec![target.clone()]
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).map_err(file_system_error(target, "list"))? {
                let path = entry.map_err(file_system_error(target, "list"))?.path();
                if path.is_file() && has_extension(&path, &IMAGE_EXTENSIONS) {
                    files.push(path);
                }
            }
            files.sort();
            files
        } else {
            return Err(io_error("Target must be an image file or directory"));
        };

        let total = candidates.len();
        let files: Vec<PathBuf> = candidates
            .into_iter()
            .filter(|path| self.should_process_file(path))
            .collect();
        let skipped = total - files.len();
        Ok((files, skipped))
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output = output_path(input_path, &self.cli.output_dir);
        if output.exists() {
            log::info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }
}
