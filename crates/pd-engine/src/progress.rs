//! Progress reporting for comparison runs.
//!
//! A run reports fractions in `[0, 1]`. The shingling phase covers
//! `[0, shingling_share)`, the phase boundary is reported at exactly
//! `shingling_share`, and the remainder is split evenly across pairs. `1.0`
//! is only reached when the last pair completes.

use pd_core::ProgressEvent;
use std::sync::{Arc, Mutex};

/// Receives progress events from a run. Called from the run's thread(s).
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// No-op reporter when progress is not observed.
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _event: ProgressEvent) {}
}

impl<F> ProgressReporter for F
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    fn report(&self, event: ProgressEvent) {
        self(event)
    }
}

/// Maps run milestones onto fractions and serializes emission so the
/// reported sequence never decreases, even with several workers.
pub struct ProgressTracker {
    reporter: Arc<dyn ProgressReporter>,
    shingling_share: f64,
    inner: Mutex<TrackerState>,
}

#[derive(Default)]
struct TrackerState {
    total_pairs: usize,
    pairs_done: usize,
    last: f64,
}

impl ProgressTracker {
    pub fn new(reporter: Arc<dyn ProgressReporter>, shingling_share: f64) -> Self {
        Self {
            reporter,
            shingling_share,
            inner: Mutex::new(TrackerState::default()),
        }
    }

    /// Before shingling document `index` of `total`.
    pub fn shingling(&self, index: usize, total: usize) {
        let fraction = if total == 0 {
            0.0
        } else {
            self.shingling_share * index as f64 / total as f64
        };
        self.emit(fraction, |_| {});
    }

    /// Shingling finished; the comparison phase starts with `total_pairs` pairs.
    pub fn comparing(&self, total_pairs: usize) {
        self.emit(self.shingling_share, |state| {
            state.total_pairs = total_pairs;
            state.pairs_done = 0;
        });
    }

    /// One more pair finished. Returns the number of pairs done so far.
    pub fn pair_done(&self) -> usize {
        let mut state = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        state.pairs_done += 1;
        let fraction = if state.pairs_done >= state.total_pairs {
            1.0
        } else {
            self.shingling_share
                + (1.0 - self.shingling_share) * state.pairs_done as f64 / state.total_pairs as f64
        };
        let fraction = fraction.max(state.last);
        state.last = fraction;
        self.reporter.report(ProgressEvent::new(fraction));
        state.pairs_done
    }

    pub fn pairs_done(&self) -> usize {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).pairs_done
    }

    fn emit(&self, fraction: f64, update: impl FnOnce(&mut TrackerState)) {
        let mut state = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        update(&mut state);
        let fraction = fraction.max(state.last);
        state.last = fraction;
        self.reporter.report(ProgressEvent::new(fraction));
    }
}
