//! Subcommand implementations.
//!
//! Output goes to the supplied writer (stdout in the binary) so commands can
//! be exercised in tests; logging goes through `tracing` to stderr.

use crate::args::{BenchArgs, Cli, Commands, ExtractArgs};
use crate::report::{render_extract_summary, render_table};
use crate::settings::{apply_fields, resolve_config};
use anyhow::{Context, Result};
use dicomsleuth_core::bench::{Benchmark, BenchmarkOptions};
use dicomsleuth_core::config::ScanConfig;
use dicomsleuth_core::dispatch::{run_strategy, Strategy};
use dicomsleuth_core::scanner::enumerate_files;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Execute the parsed command line, writing results to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let mut config = resolve_config(&cli.global)?;
    match &cli.command {
        Commands::Bench(args) => bench(&config, args, out),
        Commands::List { root } => list(&config, root, out),
        Commands::Extract(args) => {
            apply_fields(&mut config, &args.fields)?;
            extract(&config, args, out)
        }
    }
}

fn bench(config: &ScanConfig, args: &BenchArgs, out: &mut dyn Write) -> Result<()> {
    let schema = config.schema().context("invalid tag schema")?;
    let strategies = if args.strategies.is_empty() {
        Strategy::ALL.to_vec()
    } else {
        args.strategies.clone()
    };
    let options = BenchmarkOptions {
        strategies,
        repeat: args.repeat as usize,
        warmup: args.warmup,
        workers: config.worker_count(),
        enumerate: config.enumerate_options(),
    };

    let report = Benchmark::new(schema, options)
        .run(&args.root)
        .context("benchmark failed")?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render_table(&report))?;
    }
    Ok(())
}

fn list(config: &ScanConfig, root: &Path, out: &mut dyn Write) -> Result<()> {
    let mut enumeration = enumerate_files(root, config.enumerate_options());
    enumeration.sort();
    for path in &enumeration.files {
        writeln!(out, "{}", path.display())?;
    }
    Ok(())
}

fn extract(config: &ScanConfig, args: &ExtractArgs, out: &mut dyn Write) -> Result<()> {
    let schema = config.schema().context("invalid tag schema")?;
    let mut enumeration = enumerate_files(&args.root, config.enumerate_options());
    enumeration.sort();

    let mut result = run_strategy(
        args.strategy,
        &enumeration.files,
        &schema,
        config.worker_count(),
    )
    .with_context(|| format!("{} extraction failed", args.strategy))?;
    result.sort();

    for record in &result.records {
        writeln!(out, "{}", record.to_line(&schema))?;
    }
    let summary = result.summary();
    info!("Extracted {} records from {}", result.records.len(), args.root.display());
    writeln!(out, "# {}", render_extract_summary(result.records.len(), &summary))?;
    Ok(())
}
