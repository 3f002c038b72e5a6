//! Command-line arguments.
//!
//! Uses clap's derive API. Global options shape the scan configuration;
//! subcommands pick what to do with it.

use clap::{Args, Parser, Subcommand};
use dicomsleuth_core::dispatch::Strategy;
use std::path::PathBuf;

/// DicomSleuth - benchmark DICOM metadata extraction strategies
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand. Flags override the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// JSON scan configuration (fields, sentinel, workers)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Worker threads for the parallel strategies (default: logical CPUs)
    #[arg(short, long, value_name = "N", global = true)]
    pub workers: Option<usize>,

    /// Placeholder printed for fields a file does not carry
    #[arg(long, value_name = "TEXT", global = true)]
    pub sentinel: Option<String>,

    /// Skip dot-prefixed files and directories
    #[arg(long, global = true)]
    pub skip_hidden: bool,

    /// Enable debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Time every extraction strategy over a directory tree
    Bench(BenchArgs),
    /// Print every regular file under a directory
    List {
        /// Directory to enumerate
        root: PathBuf,
    },
    /// Extract the configured fields and print one line per DICOM file
    Extract(ExtractArgs),
}

#[derive(Debug, Args)]
pub struct BenchArgs {
    /// Directory to scan
    pub root: PathBuf,

    /// Strategy to run; repeat to run several (default: all)
    #[arg(short, long = "strategy", value_name = "STRATEGY")]
    pub strategies: Vec<Strategy>,

    /// Timed runs per strategy
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,

    /// Run each strategy once, untimed, before timing it
    #[arg(long)]
    pub warmup: bool,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Directory to scan
    pub root: PathBuf,

    /// Strategy used for extraction
    #[arg(short, long, default_value = "work-stealing", value_name = "STRATEGY")]
    pub strategy: Strategy,

    /// Fields to extract, each `Name` or `Name:kind` (text, integer, decimal).
    /// Separate with commas or repeat the flag; tags may be written as
    /// `(0010,0020)`, `0010,0020` or `00100020`
    #[arg(long, value_name = "FIELDS")]
    pub fields: Vec<String>,
}
