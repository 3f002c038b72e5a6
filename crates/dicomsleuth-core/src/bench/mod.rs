/// Benchmark driver: times every extraction strategy over one file list.
///
/// The tree is enumerated once (timed separately) and every strategy then
/// runs over that same list, so the timings compare extraction only. Each
/// strategy can be repeated and given an untimed warm-up run to take the
/// page cache out of the comparison.
pub mod timing;

use crate::dispatch::{run_strategy, ScanResult, Strategy};
use crate::error::DispatchError;
use crate::model::TagSchema;
use crate::scanner::{enumerate_files, EnumerateOptions, Enumeration};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub use timing::{StrategyTiming, TimingSample};

/// What to run and how often.
#[derive(Debug, Clone)]
pub struct BenchmarkOptions {
    /// Strategies in execution order. Duplicates are run once.
    pub strategies: Vec<Strategy>,
    /// Timed runs per strategy. Values below 1 are treated as 1.
    pub repeat: usize,
    /// Run each strategy once, untimed, before its timed runs.
    pub warmup: bool,
    /// Worker threads for the parallel strategies.
    pub workers: usize,
    pub enumerate: EnumerateOptions,
}

impl Default for BenchmarkOptions {
    fn default() -> Self {
        let workers = num_cpus::get().max(1);
        Self {
            strategies: Strategy::ALL.to_vec(),
            repeat: 1,
            warmup: false,
            workers,
            enumerate: EnumerateOptions {
                threads: workers,
                ..EnumerateOptions::default()
            },
        }
    }
}

/// Outcome of a full benchmark.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub root: PathBuf,
    pub started_at: DateTime<Local>,
    pub workers: usize,
    pub files_found: usize,
    pub walk_errors: u64,
    #[serde(serialize_with = "timing::serialize_secs")]
    pub enumeration: Duration,
    pub timings: Vec<StrategyTiming>,
    /// `true` if every strategy produced records for the same set of files
    /// and skipped the same number of files.
    pub consistent: bool,
}

impl BenchmarkReport {
    /// Timing entry for `strategy`, if it was run.
    pub fn timing(&self, strategy: Strategy) -> Option<&StrategyTiming> {
        self.timings.iter().find(|t| t.strategy == strategy)
    }

    /// The strategy with the lowest best-run time.
    pub fn fastest(&self) -> Option<&StrategyTiming> {
        self.timings.iter().min_by_key(|t| t.best)
    }
}

pub struct Benchmark {
    schema: TagSchema,
    options: BenchmarkOptions,
}

impl Benchmark {
    pub fn new(schema: TagSchema, options: BenchmarkOptions) -> Self {
        Self { schema, options }
    }

    pub fn options(&self) -> &BenchmarkOptions {
        &self.options
    }

    /// Enumerate `root` and time every configured strategy over the result.
    pub fn run(&self, root: &Path) -> Result<BenchmarkReport, DispatchError> {
        let started_at = Local::now();
        info!("Benchmarking {} with {} workers", root.display(), self.options.workers);

        let mut enumeration = enumerate_files(root, self.options.enumerate);
        enumeration.sort();
        self.run_on(root, started_at, enumeration)
    }

    /// Time every configured strategy over an existing enumeration.
    pub fn run_on(
        &self,
        root: &Path,
        started_at: DateTime<Local>,
        enumeration: Enumeration,
    ) -> Result<BenchmarkReport, DispatchError> {
        let repeat = self.options.repeat.max(1);
        let mut timings = Vec::with_capacity(self.options.strategies.len());
        let mut reference: Option<(Strategy, Vec<PathBuf>, usize)> = None;
        let mut consistent = true;

        for strategy in unique(&self.options.strategies) {
            if self.options.warmup {
                run_strategy(strategy, &enumeration.files, &self.schema, self.options.workers)?;
            }

            let mut samples = Vec::with_capacity(repeat);
            let mut last = ScanResult::default();
            for _ in 0..repeat {
                let (sample, result) = self.time_strategy(strategy, &enumeration.files)?;
                samples.push(sample);
                last = result;
            }

            let summary = last.summary();
            let paths = last.record_paths();
            if let Some((ref_strategy, ref_paths, ref_skipped)) = &reference {
                if *ref_paths != paths || *ref_skipped != summary.total() {
                    consistent = false;
                    warn!(
                        "{strategy} produced {} records / {} skipped, but {ref_strategy} produced {} / {}",
                        paths.len(),
                        summary.total(),
                        ref_paths.len(),
                        ref_skipped
                    );
                }
            }
            if reference.is_none() {
                reference = Some((strategy, paths, summary.total()));
            }

            let timing = StrategyTiming::from_samples(strategy, samples, last.records.len(), summary);
            info!(
                "{}: best {:?}, mean {:?}, {} records, {}",
                strategy.label(),
                timing.best,
                timing.mean,
                timing.records,
                timing.skipped
            );
            timings.push(timing);
        }

        Ok(BenchmarkReport {
            root: root.to_path_buf(),
            started_at,
            workers: self.options.workers,
            files_found: enumeration.len(),
            walk_errors: enumeration.walk_errors,
            enumeration: enumeration.duration,
            timings,
            consistent,
        })
    }

    /// One timed run of `strategy`.
    pub fn time_strategy(
        &self,
        strategy: Strategy,
        files: &[PathBuf],
    ) -> Result<(TimingSample, ScanResult), DispatchError> {
        let start = Instant::now();
        let result = run_strategy(strategy, files, &self.schema, self.options.workers)?;
        let sample = TimingSample {
            strategy,
            elapsed: start.elapsed(),
        };
        Ok((sample, result))
    }
}

/// Strategies in first-seen order, without duplicates.
fn unique(strategies: &[Strategy]) -> Vec<Strategy> {
    let mut seen = Vec::with_capacity(strategies.len());
    for &s in strategies {
        if !seen.contains(&s) {
            seen.push(s);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_keeps_first_order() {
        let input = [
            Strategy::Partitioned,
            Strategy::Sequential,
            Strategy::Partitioned,
        ];
        assert_eq!(unique(&input), vec![Strategy::Partitioned, Strategy::Sequential]);
    }

    #[test]
    fn test_missing_root_reports_zero_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        let bench = Benchmark::new(
            TagSchema::default(),
            BenchmarkOptions {
                workers: 2,
                ..BenchmarkOptions::default()
            },
        );
        let report = bench.run(&tmp.path().join("missing")).unwrap();
        assert_eq!(report.files_found, 0);
        assert_eq!(report.timings.len(), Strategy::ALL.len());
        assert!(report.consistent);
        assert!(report.timings.iter().all(|t| t.records == 0));
    }
}
