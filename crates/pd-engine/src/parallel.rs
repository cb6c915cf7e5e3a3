//! Parallel pairwise sweep on a dedicated rayon pool.
//!
//! The flattened `(i, j)` enumeration is cut into one contiguous range per
//! worker. Ranges are collected back in order, so the result list matches the
//! sequential sweep exactly. Shingled documents are shared read-only; the
//! progress counter is the only shared mutable state and sits behind the
//! tracker's lock.

use crate::cancel::CancelSignal;
use crate::progress::ProgressTracker;
use crate::run::compare_pair;
use pd_core::{ComparisonConfig, PairResult, PdError, Result, ShingledDocument};
use pd_shingle::ExcerptExtractor;
use rayon::prelude::*;

/// All `(i, j)` with `i < j`, in sweep order.
pub fn pair_indices(n: usize) -> Vec<(usize, usize)> {
    (0..n).flat_map(|i| ((i + 1)..n).map(move |j| (i, j))).collect()
}

/// Contiguous range length giving each of `workers` at most one range.
pub fn range_len(total: usize, workers: usize) -> usize {
    total.div_ceil(workers.max(1)).max(1)
}

pub(crate) fn sweep(
    docs: &[ShingledDocument],
    config: &ComparisonConfig,
    extractor: &ExcerptExtractor,
    cancel: &CancelSignal,
    tracker: &ProgressTracker,
) -> Result<Option<Vec<PairResult>>> {
    let pairs = pair_indices(docs.len());
    let chunk = range_len(pairs.len(), config.workers);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .thread_name(|i| format!("pd-sweep-{i}"))
        .build()
        .map_err(|e| PdError::Worker(e.to_string()))?;
    tracing::debug!(pairs = pairs.len(), workers = config.workers, range = chunk, "parallel sweep");

    let ranges: Vec<Option<Vec<PairResult>>> = pool.install(|| {
        pairs
            .par_chunks(chunk)
            .map(|range| {
                let mut found = Vec::new();
                for &(i, j) in range {
                    if cancel.is_cancelled() {
                        return None;
                    }
                    if let Some(result) = compare_pair(&docs[i], &docs[j], config, extractor) {
                        found.push(result);
                    }
                    tracker.pair_done();
                }
                Some(found)
            })
            .collect()
    });

    let mut results = Vec::new();
    for range in ranges {
        match range {
            Some(found) => results.extend(found),
            None => return Ok(None),
        }
    }
    Ok(Some(results))
}
