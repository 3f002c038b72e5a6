/// Partitioned extraction: one scoped worker thread per contiguous slice.
///
/// Workers never share state: each owns a slice of the file list and sends
/// its outcomes through a bounded channel. The coordinator blocks on `recv`;
/// the loop ends when the last worker drops its sender, so every outcome a
/// worker sent has been observed before the handles are joined.
///
/// # Back-pressure
///
/// The channel holds at most [`RESULT_CHANNEL_CAPACITY`] messages. If the
/// coordinator falls behind, workers block on `send` rather than queueing
/// unbounded records on the heap.
use super::message::WorkerMessage;
use super::{partition, ScanResult};
use crate::error::DispatchError;
use crate::extract::extract_file;
use crate::model::TagSchema;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;
use tracing::{debug, trace};

/// Maximum number of worker messages that may queue up in the channel.
pub const RESULT_CHANNEL_CAPACITY: usize = 1_024;

pub fn extract_partitioned(
    files: &[PathBuf],
    schema: &TagSchema,
    workers: usize,
) -> Result<ScanResult, DispatchError> {
    let start = Instant::now();
    let ranges = partition(files.len(), workers);

    let result = thread::scope(|scope| -> Result<ScanResult, DispatchError> {
        let (tx, rx) = crossbeam_channel::bounded::<WorkerMessage>(RESULT_CHANNEL_CAPACITY);

        let mut handles = Vec::with_capacity(ranges.len());
        for (worker, range) in ranges.iter().cloned().enumerate() {
            let tx = tx.clone();
            let chunk = &files[range];
            let handle = thread::Builder::new()
                .name(format!("dicomsleuth-worker-{worker}"))
                .spawn_scoped(scope, move || {
                    let mut processed = 0;
                    for path in chunk {
                        let outcome = extract_file(path, schema);
                        processed += 1;
                        // A closed channel means the coordinator gave up.
                        let message = WorkerMessage::Extracted {
                            path: path.clone(),
                            outcome,
                        };
                        if tx.send(message).is_err() {
                            return;
                        }
                    }
                    let _ = tx.send(WorkerMessage::Finished { worker, processed });
                })
                .map_err(|source| DispatchError::Spawn { worker, source })?;
            handles.push(handle);
        }
        // Only worker-held senders remain, so `recv` disconnects once all are done.
        drop(tx);

        let mut result = ScanResult::with_capacity(files.len());
        for message in rx {
            match message {
                WorkerMessage::Extracted { path, outcome } => {
                    if let Err(err) = &outcome {
                        trace!("Worker skipped {}: {}", path.display(), err.kind().label());
                    }
                    result.push(outcome);
                }
                WorkerMessage::Finished { worker, processed } => {
                    debug!("Worker {worker} finished {processed} files");
                }
            }
        }

        // Join every handle; the scope re-raises panics from unjoined threads.
        let mut panicked = None;
        for (worker, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() && panicked.is_none() {
                panicked = Some(worker);
            }
        }
        match panicked {
            Some(worker) => Err(DispatchError::WorkerPanicked { worker }),
            None => Ok(result),
        }
    })?;

    debug!(
        "Partitioned extraction ({} workers): {} records, {} skipped in {:?}",
        ranges.len(),
        result.records.len(),
        result.skipped.len(),
        start.elapsed()
    );
    Ok(result)
}
