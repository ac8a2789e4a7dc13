//! CLI entry point for the tile mosaic converter

use clap::Parser;
use std::process::ExitCode;
use tilemosaic::io::cli::{Cli, FileProcessor};
use tilemosaic::io::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(logging::level_for(cli.verbose, cli.quiet));

    let mut processor = FileProcessor::new(cli);
    match processor.process() {
        Ok(summary) if summary.failed == 0 => ExitCode::SUCCESS,
        Ok(summary) => {
            log::error!("{} file(s) failed to convert", summary.failed);
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
