/// Concurrent scan of many log files into a single report.
///
/// Every file gets its own task, submitted up front. A semaphore bounds how
/// many scans run at once; the scans themselves are blocking reads and run on
/// tokio's blocking pool. Completed results are folded into the report by the
/// calling task only, one file at a time, so the report never sees two
/// batches interleaved.
use crate::parser::EventRecord;
use crate::reports::Report;
use crate::scanner::{scan_file, ScanError};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

/// Errors that abort an analysis run.
#[derive(Debug)]
pub enum AnalyzeError {
    /// A file could not be scanned.
    Scan(ScanError),
    /// A scan task panicked or was cancelled.
    Task(JoinError),
}

impl std::fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzeError::Scan(e) => write!(f, "{e}"),
            AnalyzeError::Task(e) => write!(f, "scan task failed: {e}"),
        }
    }
}

impl std::error::Error for AnalyzeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalyzeError::Scan(e) => Some(e),
            AnalyzeError::Task(e) => Some(e),
        }
    }
}

impl From<ScanError> for AnalyzeError {
    fn from(e: ScanError) -> Self {
        AnalyzeError::Scan(e)
    }
}

impl From<JoinError> for AnalyzeError {
    fn from(e: JoinError) -> Self {
        AnalyzeError::Task(e)
    }
}

/// Scan `log_files` with at most `max_workers` concurrent scans and fold
/// every file's records into `report`.
///
/// Returns the filled report, or the first error encountered. On error the
/// remaining tasks are aborted and nothing partial is returned.
pub async fn analyze_logs<R: Report>(
    log_files: &[PathBuf],
    mut report: R,
    max_workers: usize,
) -> Result<R, AnalyzeError> {
    if log_files.is_empty() {
        return Ok(report);
    }

    // More permits than files would never be used
    let workers = max_workers.clamp(1, log_files.len());
    tracing::info!(files = log_files.len(), workers, "scanning log files");

    let permits = Arc::new(Semaphore::new(workers));
    let mut tasks: JoinSet<Result<Vec<EventRecord>, AnalyzeError>> = JoinSet::new();

    for path in log_files {
        let path = path.clone();
        let permits = Arc::clone(&permits);
        tasks.spawn(async move {
            // The semaphore is never closed
            let _permit = permits.acquire_owned().await.ok();
            let records = tokio::task::spawn_blocking(move || scan_file(&path)).await??;
            Ok::<_, AnalyzeError>(records)
        });
    }

    let mut applied = 0usize;
    while let Some(joined) = tasks.join_next().await {
        let records = match joined.map_err(AnalyzeError::from).and_then(|r| r) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = %e, "aborting analysis");
                tasks.abort_all();
                return Err(e);
            }
        };
        report.add(&records);
        applied += 1;
        tracing::debug!(records = records.len(), applied, "applied file batch");
    }

    tracing::info!(files = applied, "analysis complete");
    Ok(report)
}
