//! Parallel interpretation of many replay results.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use sui_replay_types::wire;
use tracing::{debug, info};

use crate::config::InspectConfig;
use crate::error::Result;
use crate::overview::{inspect_str, ReplayOverview};

/// Results of a batch, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Replay results processed
    pub total: usize,
    /// Overviews with every section interpreted
    pub complete: usize,
    /// Transactions whose execution status is success
    pub succeeded: usize,
    pub overviews: Vec<ReplayOverview>,
    /// Processing time in milliseconds
    pub elapsed_ms: u64,
}

/// Size the global rayon pool. Only the first call in a process has an effect.
pub fn configure_threads(threads: Option<usize>) {
    if let Some(threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .ok(); // Ignore if already configured
    }
}

/// Interpret a batch of replay results in parallel.
pub fn summarize_batch(replays: &[wire::ReplayResult], config: &InspectConfig) -> BatchSummary {
    configure_threads(config.threads);

    let start = Instant::now();
    let complete = AtomicUsize::new(0);
    let succeeded = AtomicUsize::new(0);

    let overviews: Vec<ReplayOverview> = replays
        .par_iter()
        .map(|replay| {
            let overview = ReplayOverview::from_replay(replay, config);
            if overview.is_complete() {
                complete.fetch_add(1, Ordering::Relaxed);
            }
            if overview.status.ok().is_some_and(|s| s.is_success()) {
                succeeded.fetch_add(1, Ordering::Relaxed);
            }
            overview
        })
        .collect();

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let summary = BatchSummary {
        total: replays.len(),
        complete: complete.load(Ordering::Relaxed),
        succeeded: succeeded.load(Ordering::Relaxed),
        overviews,
        elapsed_ms,
    };
    info!(
        total = summary.total,
        complete = summary.complete,
        succeeded = summary.succeeded,
        elapsed_ms,
        "batch summarized"
    );
    summary
}

/// Parse and interpret raw JSON documents in parallel, in input order.
///
/// A document that is not a replay result fails alone.
pub fn inspect_documents(documents: &[String], config: &InspectConfig) -> Vec<Result<ReplayOverview>> {
    configure_threads(config.threads);
    let results: Vec<_> = documents
        .par_iter()
        .map(|doc| inspect_str(doc, config))
        .collect();
    debug!(documents = documents.len(), "inspected documents");
    results
}
