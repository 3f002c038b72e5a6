//! Terminal rendering of benchmark reports and extraction summaries.
//!
//! The timing table is fixed-width so runs can be compared by eye or with
//! `diff`.

use dicomsleuth_core::bench::BenchmarkReport;
use dicomsleuth_core::dispatch::SkipSummary;
use dicomsleuth_core::model::format::{format_count, format_seconds, throughput};
use std::fmt::Write as _;

const STRATEGY_WIDTH: usize = 25;
const SECONDS_WIDTH: usize = 10;
const COUNT_WIDTH: usize = 8;

/// Width of a table row including the outer borders.
pub const TABLE_WIDTH: usize =
    2 + STRATEGY_WIDTH + 3 + SECONDS_WIDTH + 3 + SECONDS_WIDTH + 3 + COUNT_WIDTH + 3 + COUNT_WIDTH + 2;

fn rule() -> String {
    "─".repeat(TABLE_WIDTH)
}

fn row(strategy: &str, best: &str, mean: &str, records: &str, skipped: &str) -> String {
    format!(
        "| {strategy:<sw$} | {best:>tw$} | {mean:>tw$} | {records:>cw$} | {skipped:>cw$} |",
        sw = STRATEGY_WIDTH,
        tw = SECONDS_WIDTH,
        cw = COUNT_WIDTH,
    )
}

/// Render the benchmark report as a fixed-width table.
pub fn render_table(report: &BenchmarkReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Files in tree: {} (enumerated in {} s, {} workers)",
        format_count(report.files_found),
        format_seconds(report.enumeration),
        report.workers
    );
    if report.walk_errors > 0 {
        let _ = writeln!(out, "Unreadable directories: {}", report.walk_errors);
    }

    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "{}", row("Strategy", "Best (s)", "Mean (s)", "Records", "Skipped"));
    let _ = writeln!(out, "{}", rule());
    for timing in &report.timings {
        let _ = writeln!(
            out,
            "{}",
            row(
                timing.label,
                &format_seconds(timing.best),
                &format_seconds(timing.mean),
                &format_count(timing.records),
                &format_count(timing.skipped.total()),
            )
        );
    }
    let _ = writeln!(out, "{}", rule());

    if let Some(fastest) = report.fastest() {
        let rate = throughput(report.files_found, fastest.best);
        let _ = writeln!(out, "Fastest: {} ({rate:.0} files/s)", fastest.label);
    }
    if let Some(first) = report.timings.first() {
        if first.skipped.total() > 0 {
            let _ = writeln!(out, "Skipped files: {}", first.skipped);
        }
    }
    if !report.consistent {
        let _ = writeln!(out, "WARNING: strategies disagree on the extracted file set");
    }
    out
}

/// One-line summary printed after `extract`.
pub fn render_extract_summary(records: usize, skipped: &SkipSummary) -> String {
    format!("{} records, {skipped}", format_count(records))
}
