//! CLI entry point for overlapping wave function collapse over PNG samples

use clap::Parser;
use wavetile::io::cli::{Cli, FileProcessor};
use wavetile::io::logging::init_logging;

fn main() -> wavetile::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut processor = FileProcessor::new(cli);
    let failures = processor.process()?;
    if failures > 0 {
        tracing::warn!(failures, "some files could not be generated");
    }
    Ok(())
}
