/// Dispatch module: runs the extractor over a file list.
///
/// Provides three strategies that are benchmarked against each other:
/// - **Sequential:** one thread, files in list order.
/// - **Partitioned:** contiguous partitions, one scoped worker thread each,
///   results funnelled through a bounded `crossbeam_channel`.
/// - **Work-stealing:** a dedicated rayon pool scheduling individual files.
///
/// All strategies produce a [`ScanResult`]; per-file failures are collected
/// as [`SkippedFile`]s and never abort the run.
pub mod message;
pub mod partitioned;
pub mod sequential;
pub mod work_stealing;

use crate::error::{DispatchError, ExtractError, SkipKind};
use crate::model::{TagRecord, TagSchema};
use serde::Serialize;
use std::fmt;
use std::ops::Range;
use std::path::PathBuf;
use std::str::FromStr;

/// An extraction schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Sequential,
    Partitioned,
    WorkStealing,
}

impl Strategy {
    /// Benchmark order: the single-threaded baseline first.
    pub const ALL: [Strategy; 3] = [Self::Sequential, Self::WorkStealing, Self::Partitioned];

    /// Human-readable label for the timing table.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sequential => "Sequential (1 thread)",
            Self::Partitioned => "Partitioned threads",
            Self::WorkStealing => "Rayon work-stealing",
        }
    }

    /// Name accepted on the command line.
    pub fn cli_name(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Partitioned => "partitioned",
            Self::WorkStealing => "work-stealing",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "seq" => Ok(Self::Sequential),
            "partitioned" | "threads" => Ok(Self::Partitioned),
            "work-stealing" | "rayon" => Ok(Self::WorkStealing),
            other => Err(format!(
                "unknown strategy `{other}` (expected sequential, partitioned or work-stealing)"
            )),
        }
    }
}

/// A file that produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub kind: SkipKind,
    pub message: String,
}

impl From<ExtractError> for SkippedFile {
    fn from(err: ExtractError) -> Self {
        Self {
            path: err.path().to_path_buf(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Skip counts per classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipSummary {
    pub format: usize,
    pub io: usize,
    pub permission: usize,
    pub other: usize,
}

impl SkipSummary {
    pub fn total(&self) -> usize {
        self.format + self.io + self.permission + self.other
    }

    pub fn count(&self, kind: SkipKind) -> usize {
        match kind {
            SkipKind::Format => self.format,
            SkipKind::Io => self.io,
            SkipKind::Permission => self.permission,
            SkipKind::Other => self.other,
        }
    }

    fn record(&mut self, kind: SkipKind) {
        match kind {
            SkipKind::Format => self.format += 1,
            SkipKind::Io => self.io += 1,
            SkipKind::Permission => self.permission += 1,
            SkipKind::Other => self.other += 1,
        }
    }
}

impl fmt::Display for SkipSummary {
    /// Renders as `5 skipped (format 4, I/O 1)`; zero counts are omitted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} skipped", self.total())?;
        let parts: Vec<String> = SkipKind::ALL
            .iter()
            .filter(|&&k| self.count(k) > 0)
            .map(|&k| format!("{} {}", k.label(), self.count(k)))
            .collect();
        if !parts.is_empty() {
            write!(f, " ({})", parts.join(", "))?;
        }
        Ok(())
    }
}

/// Records and skips produced by one strategy run.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub records: Vec<TagRecord>,
    pub skipped: Vec<SkippedFile>,
}

impl ScanResult {
    pub fn with_capacity(files: usize) -> Self {
        Self {
            records: Vec::with_capacity(files),
            skipped: Vec::new(),
        }
    }

    /// Fold one per-file outcome into the result.
    pub fn push(&mut self, outcome: Result<TagRecord, ExtractError>) {
        match outcome {
            Ok(record) => self.records.push(record),
            Err(err) => self.skipped.push(SkippedFile::from(err)),
        }
    }

    /// Append another partial result.
    pub fn merge(&mut self, other: ScanResult) {
        self.records.extend(other.records);
        self.skipped.extend(other.skipped);
    }

    pub fn summary(&self) -> SkipSummary {
        let mut summary = SkipSummary::default();
        for skipped in &self.skipped {
            summary.record(skipped.kind);
        }
        summary
    }

    /// Total files processed (records + skips).
    pub fn processed(&self) -> usize {
        self.records.len() + self.skipped.len()
    }

    /// Order records and skips by path, making results of different
    /// strategies directly comparable.
    pub fn sort(&mut self) {
        self.records.sort_by(|a, b| a.path.cmp(&b.path));
        self.skipped.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Sorted paths of the files that produced a record.
    pub fn record_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.records.iter().map(|r| r.path.clone()).collect();
        paths.sort_unstable();
        paths
    }
}

/// Split `len` items into `parts` contiguous ranges whose sizes differ by at
/// most one; the first `len % parts` ranges carry the extra item.
///
/// Empty ranges are dropped, so fewer than `parts` ranges are returned when
/// `len < parts`. `parts == 0` is treated as one.
pub fn partition(len: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.max(1);
    let base = len / parts;
    let extra = len % parts;

    let mut ranges = Vec::with_capacity(parts.min(len));
    let mut start = 0;
    for i in 0..parts {
        let size = base + usize::from(i < extra);
        if size == 0 {
            break;
        }
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// Run `strategy` over `files` with up to `workers` threads.
pub fn run_strategy(
    strategy: Strategy,
    files: &[PathBuf],
    schema: &TagSchema,
    workers: usize,
) -> Result<ScanResult, DispatchError> {
    let workers = workers.max(1);
    match strategy {
        Strategy::Sequential => Ok(sequential::extract_sequential(files, schema)),
        Strategy::Partitioned => partitioned::extract_partitioned(files, schema, workers),
        Strategy::WorkStealing => work_stealing::extract_work_stealing(files, schema, workers),
    }
}
