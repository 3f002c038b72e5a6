/// Timing samples and per-strategy aggregates.
use crate::dispatch::{SkipSummary, Strategy};
use serde::{Serialize, Serializer};
use std::time::Duration;

/// One timed strategy run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimingSample {
    pub strategy: Strategy,
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

/// All runs of one strategy, summarised.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyTiming {
    pub strategy: Strategy,
    pub label: &'static str,
    #[serde(serialize_with = "serialize_secs_vec")]
    pub runs: Vec<Duration>,
    #[serde(serialize_with = "serialize_secs")]
    pub best: Duration,
    #[serde(serialize_with = "serialize_secs")]
    pub mean: Duration,
    /// Records produced by the last run.
    pub records: usize,
    /// Skips produced by the last run.
    pub skipped: SkipSummary,
}

impl StrategyTiming {
    pub fn from_samples(
        strategy: Strategy,
        samples: Vec<TimingSample>,
        records: usize,
        skipped: SkipSummary,
    ) -> Self {
        let runs: Vec<Duration> = samples.iter().map(|s| s.elapsed).collect();
        let best = runs.iter().min().copied().unwrap_or_default();
        let mean = if runs.is_empty() {
            Duration::ZERO
        } else {
            runs.iter().sum::<Duration>() / runs.len() as u32
        };
        Self {
            strategy,
            label: strategy.label(),
            runs,
            best,
            mean,
            records,
            skipped,
        }
    }
}

pub(crate) fn serialize_secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

fn serialize_secs_vec<S: Serializer>(runs: &[Duration], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(runs.iter().map(Duration::as_secs_f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ms: u64) -> TimingSample {
        TimingSample {
            strategy: Strategy::Sequential,
            elapsed: Duration::from_millis(ms),
        }
    }

    #[test]
    fn test_best_and_mean() {
        let timing = StrategyTiming::from_samples(
            Strategy::Sequential,
            vec![sample(30), sample(10), sample(20)],
            5,
            SkipSummary::default(),
        );
        assert_eq!(timing.best, Duration::from_millis(10));
        assert_eq!(timing.mean, Duration::from_millis(20));
        assert_eq!(timing.runs.len(), 3);
    }

    #[test]
    fn test_no_samples() {
        let timing =
            StrategyTiming::from_samples(Strategy::Partitioned, Vec::new(), 0, SkipSummary::default());
        assert_eq!(timing.best, Duration::ZERO);
        assert_eq!(timing.mean, Duration::ZERO);
    }

    #[test]
    fn test_serializes_seconds() {
        let json = serde_json::to_value(sample(1500)).unwrap();
        assert_eq!(json["strategy"], "sequential");
        assert_eq!(json["elapsed"], 1.5);
    }
}
