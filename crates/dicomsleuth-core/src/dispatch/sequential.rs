/// Single-threaded baseline: extract every file in list order.
use super::ScanResult;
use crate::model::TagSchema;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

pub fn extract_sequential(files: &[PathBuf], schema: &TagSchema) -> ScanResult {
    let start = Instant::now();
    let mut result = ScanResult::with_capacity(files.len());
    for path in files {
        result.push(crate::extract::extract_file(path, schema));
    }
    debug!(
        "Sequential extraction: {} records, {} skipped in {:?}",
        result.records.len(),
        result.skipped.len(),
        start.elapsed()
    );
    result
}
