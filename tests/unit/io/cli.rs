//! Tests for command-line parsing and batch conversion

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use tilemosaic::io::cli::{BatchSummary, Cli, FileProcessor};
    use tilemosaic::io::configuration::{DEFAULT_OUTPUT_DIR, GRID_SIZE, TILE_SIZE};

    fn save_png(path: &Path, size: u32, color: [u8; 4]) {
        RgbaImage::from_pixel(size, size, Rgba(color))
            .save_with_format(path, image::ImageFormat::Png)
            .unwrap();
    }

    // Small theme plus an input directory holding two images and a stray file
    fn fixture() -> (TempDir, PathBuf, PathBuf, PathBuf) {
        let root = TempDir::new().unwrap();
        let theme = root.path().join("theme");
        let inputs = root.path().join("inputs");
        let output = root.path().join("output");
        fs::create_dir_all(&theme).unwrap();
        fs::create_dir_all(&inputs).unwrap();

        save_png(&theme.join("red.png"), 2, [255, 0, 0, 255]);
        save_png(&theme.join("green.png"), 2, [0, 255, 0, 255]);
        save_png(&inputs.join("a.png"), 8, [250, 10, 10, 255]);
        save_png(&inputs.join("b.PNG"), 8, [10, 250, 10, 255]);
        fs::write(inputs.join("notes.txt"), "skip me").unwrap();

        (root, theme, inputs, output)
    }

    fn small_cli(target: &Path, theme: &Path, output: &Path, extra: &[&str]) -> Cli {
        let mut args = vec![
            "program".to_string(),
            target.display().to_string(),
            "--theme".to_string(),
            theme.display().to_string(),
            "--output-dir".to_string(),
            output.display().to_string(),
            "--grid".to_string(),
            "4".to_string(),
            "--tile-size".to_string(),
            "2".to_string(),
            "--no-background".to_string(),
            "--quiet".to_string(),
        ];
        args.extend(extra.iter().map(ToString::to_string));
        Cli::parse_from(args)
    }

    // Tests CLI parsing with only the required target argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "photo.jpg"]);

        assert_eq!(cli.target, PathBuf::from("photo.jpg"));
        assert_eq!(cli.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(cli.grid, GRID_SIZE);
        assert_eq!(cli.tile_size, TILE_SIZE);
        assert_eq!(cli.verbose, 0);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
    }

    // Tests flags map onto the conversion configuration
    // Verified by ignoring --no-special when building the config
    #[test]
    fn test_cli_config_mapping() {
        let cli = Cli::parse_from([
            "program",
            "in.png",
            "--grid",
            "30",
            "--tile-size",
            "20",
            "--contrast",
            "2",
            "--alpha-threshold",
            "10",
            "--no-background",
            "--no-special",
            "-vv",
        ]);
        let config = cli.config();

        assert_eq!(config.grid_size, 30);
        assert_eq!(config.tile_size, 20);
        assert_eq!(config.working_size, 600);
        assert!((config.contrast - 2.0).abs() < f32::EPSILON);
        assert_eq!(config.alpha_threshold, 10);
        assert!(config.background.is_none());
        assert!(config.special_tile.is_none());
        assert_eq!(cli.verbose, 2);
        assert!(config.validate().is_ok());
    }

    // Tests default flags keep the background and special tile
    // Verified by inverting the no-background flag
    #[test]
    fn test_cli_config_defaults() {
        let config = Cli::parse_from(["program", "in.png"]).config();
        assert!(config.background.is_some());
        assert_eq!(config.special_tile.as_deref(), Some("Breakable-Mine.png"));
        assert_eq!(config, tilemosaic::MosaicConfig::default());
    }

    // Tests a directory batch converts every image and ignores other files
    // Verified by filtering extensions case-sensitively
    #[test]
    fn test_process_directory() {
        let (_root, theme, inputs, output) = fixture();
        let mut processor = FileProcessor::new(small_cli(&inputs, &theme, &output, &[]));

        let summary = processor.process().unwrap();

        assert_eq!(
            summary,
            BatchSummary {
                converted: 2,
                skipped: 0,
                failed: 0
            }
        );
        assert!(output.join("MAP_a.png").exists());
        assert!(output.join("MAP_b.png").exists());
    }

    // Tests existing outputs are skipped unless --no-skip is given
    // Verified by inverting boolean logic in skip_existing method
    #[test]
    fn test_process_skips_existing() {
        let (_root, theme, inputs, output) = fixture();
        FileProcessor::new(small_cli(&inputs, &theme, &output, &[]))
            .process()
            .unwrap();

        let again = FileProcessor::new(small_cli(&inputs, &theme, &output, &[]))
            .process()
            .unwrap();
        assert_eq!(again.converted, 0);
        assert_eq!(again.skipped, 2);

        let forced = FileProcessor::new(small_cli(&inputs, &theme, &output, &["--no-skip"]))
            .process()
            .unwrap();
        assert_eq!(forced.converted, 2);
    }

    // Tests a broken file is counted without stopping the batch
    // Verified by propagating the first conversion error
    #[test]
    fn test_process_continues_after_failure() {
        let (_root, theme, inputs, output) = fixture();
        fs::write(inputs.join("broken.jpg"), b"not a jpeg").unwrap();

        let summary = FileProcessor::new(small_cli(&inputs, &theme, &output, &[]))
            .process()
            .unwrap();

        assert_eq!(summary.converted, 2);
        assert_eq!(summary.failed, 1);
        assert!(!output.join("MAP_broken.png").exists());
    }

    // Tests single-file targets must carry an image extension
    // Verified by accepting any existing file
    #[test]
    fn test_process_rejects_non_image_target() {
        let (_root, theme, inputs, output) = fixture();
        let result = FileProcessor::new(small_cli(&inputs.join("notes.txt"), &theme, &output, &[]))
            .process();
        assert!(result.is_err());

        let missing =
            FileProcessor::new(small_cli(&inputs.join("nope"), &theme, &output, &[])).process();
        assert!(missing.is_err());
    }

    // Tests a bad theme fails the whole batch up front
    // Verified by loading the theme per file
    #[test]
    fn test_process_missing_theme() {
        let (root, _theme, inputs, output) = fixture();
        let result =
            FileProcessor::new(small_cli(&inputs, &root.path().join("gone"), &output, &[]))
                .process();
        assert!(result.is_err_and(|e| e.is_theme_error()));
    }
}
