/// Work-stealing extraction on a dedicated rayon pool.
///
/// Individual files are the unit of scheduling. Each run builds its own pool
/// with exactly `workers` threads; the global rayon pool stays with the walker.
use super::ScanResult;
use crate::error::DispatchError;
use crate::extract::extract_file;
use crate::model::TagSchema;
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

pub fn extract_work_stealing(
    files: &[PathBuf],
    schema: &TagSchema,
    workers: usize,
) -> Result<ScanResult, DispatchError> {
    let start = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("dicomsleuth-rayon-{i}"))
        .build()?;

    let result = pool.install(|| {
        files
            .par_iter()
            .fold(ScanResult::default, |mut acc, path| {
                acc.push(extract_file(path, schema));
                acc
            })
            .reduce(ScanResult::default, |mut a, b| {
                a.merge(b);
                a
            })
    });

    debug!(
        "Work-stealing extraction ({workers} threads): {} records, {} skipped in {:?}",
        result.records.len(),
        result.skipped.len(),
        start.elapsed()
    );
    Ok(result)
}
