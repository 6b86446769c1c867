//! CLI entry point for tileset slicing and map composition

use clap::Parser;
use tilecomposer::io::cli::{Cli, FileProcessor};
use tilecomposer::io::logging;

fn main() -> tilecomposer::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
