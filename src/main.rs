//! DicomSleuth: DICOM metadata extraction benchmark.
//!
//! Thin binary entry point. All logic lives in the `dicomsleuth-core`
//! and `dicomsleuth-cli` crates.

use clap::Parser;
use dicomsleuth_cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise structured logging. Logs go to stderr so stdout carries
    // only tables, path lists, and JSON.
    let level = if cli.global.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("DicomSleuth starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    dicomsleuth_cli::run(&cli, &mut out)
}
