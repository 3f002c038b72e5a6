/// Worker messages: sent from partitioned extraction workers to the
/// coordinating thread via a crossbeam channel.
use crate::error::ExtractError;
use crate::model::TagRecord;
use std::path::PathBuf;

/// One message per processed file, plus a final `Finished` per worker.
#[derive(Debug)]
pub enum WorkerMessage {
    /// Outcome of extracting one file.
    Extracted {
        path: PathBuf,
        outcome: Result<TagRecord, ExtractError>,
    },
    /// The worker has processed its whole partition.
    Finished { worker: usize, processed: usize },
}
