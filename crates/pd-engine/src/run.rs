//! One comparison run: shingle every document once, sweep all unordered pairs.

use crate::cancel::CancelSignal;
use crate::parallel;
use crate::progress::{NoProgress, ProgressReporter, ProgressTracker};
use pd_core::{
    ComparisonConfig, Document, PairResult, PdError, Result, RunOutcome, RunState, ShingledDocument,
};
use pd_shingle::{score_documents, shingle_document, ExcerptExtractor};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Number of unordered pairs over `n` documents.
pub fn total_pairs(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Per-invocation state. Build a fresh `Run` for every batch of documents.
pub struct Run {
    config: ComparisonConfig,
    cancel: CancelSignal,
    tracker: ProgressTracker,
    state: RunState,
}

impl Run {
    pub fn new(config: ComparisonConfig, cancel: CancelSignal, reporter: Arc<dyn ProgressReporter>) -> Self {
        let tracker = ProgressTracker::new(reporter, config.shingling_share);
        Self { config, cancel, tracker, state: RunState::Idle }
    }

    /// Run without observing progress.
    pub fn silent(config: ComparisonConfig) -> Self {
        Self::new(config, CancelSignal::new(), Arc::new(NoProgress))
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn cancel_signal(&self) -> CancelSignal {
        self.cancel.clone()
    }

    pub fn pairs_done(&self) -> usize {
        self.tracker.pairs_done()
    }

    /// Drive the run to a terminal state.
    ///
    /// `Ok(Completed)` carries every reported pair in `(i, j)` order;
    /// `Ok(Cancelled)` carries nothing. Failures leave no partial output.
    pub fn execute(&mut self, documents: &[Document]) -> Result<RunOutcome> {
        if self.state != RunState::Idle {
            return Err(PdError::RunReused(self.state.to_string()));
        }
        info!(
            documents = documents.len(),
            ngram_size = self.config.ngram_size,
            threshold = self.config.threshold,
            metric = %self.config.metric,
            workers = self.config.workers,
            "comparison run started"
        );

        let outcome = self.drive(documents);
        match &outcome {
            Ok(RunOutcome::Completed(results)) => {
                self.transition(RunState::Completed);
                info!(pairs = self.tracker.pairs_done(), matches = results.len(), "comparison run completed");
            }
            Ok(RunOutcome::Cancelled) => {
                self.transition(RunState::Cancelled);
                warn!(pairs_done = self.tracker.pairs_done(), "comparison run cancelled, partial results discarded");
            }
            Err(err) => {
                self.transition(RunState::Failed);
                warn!(error = %err, "comparison run failed");
            }
        }
        outcome
    }

    fn drive(&mut self, documents: &[Document]) -> Result<RunOutcome> {
        self.config.validate()?;
        if documents.len() < 2 {
            return Err(PdError::InsufficientDocuments { found: documents.len() });
        }

        self.transition(RunState::Shingling);
        let Some(shingled) = self.shingle_all(documents) else {
            return Ok(RunOutcome::Cancelled);
        };
        let non_empty = shingled.iter().filter(|d| !d.is_empty()).count();
        if non_empty < 2 {
            return Err(PdError::InsufficientDocuments { found: non_empty });
        }

        self.transition(RunState::Comparing);
        let pairs = total_pairs(shingled.len());
        self.tracker.comparing(pairs);
        let extractor = ExcerptExtractor::new(&self.config.excerpt);

        let swept = if self.config.workers > 1 {
            parallel::sweep(&shingled, &self.config, &extractor, &self.cancel, &self.tracker)?
        } else {
            sweep(&shingled, &self.config, &extractor, &self.cancel, &self.tracker)
        };
        Ok(match swept {
            Some(results) => RunOutcome::Completed(results),
            None => RunOutcome::Cancelled,
        })
    }

    fn shingle_all(&self, documents: &[Document]) -> Option<Vec<ShingledDocument>> {
        let mut shingled = Vec::with_capacity(documents.len());
        for (index, doc) in documents.iter().enumerate() {
            if self.cancel.is_cancelled() {
                return None;
            }
            self.tracker.shingling(index, documents.len());
            let sd = shingle_document(doc, self.config.ngram_size);
            debug!(doc = %sd.id, tokens = sd.tokens.len(), shingles = sd.shingles.len(), "document shingled");
            shingled.push(sd);
        }
        Some(shingled)
    }

    fn transition(&mut self, next: RunState) {
        debug!(from = %self.state, to = %next, "run state");
        self.state = next;
    }
}

/// Score one pair and, at or above the threshold, extract its excerpts.
pub(crate) fn compare_pair(
    a: &ShingledDocument,
    b: &ShingledDocument,
    config: &ComparisonConfig,
    extractor: &ExcerptExtractor,
) -> Option<PairResult> {
    let score = score_documents(a, b, config.metric);
    if score < config.threshold {
        return None;
    }
    let excerpts = extractor.extract(a, b);
    if excerpts.is_empty() {
        debug!(doc_a = %a.id, doc_b = %b.id, score, "pair above threshold but every excerpt filtered");
        return None;
    }
    debug!(doc_a = %a.id, doc_b = %b.id, score, excerpts = excerpts.len(), "pair matched");
    Some(PairResult {
        doc_a: a.id.clone(),
        doc_b: b.id.clone(),
        score,
        metric: config.metric,
        excerpts,
    })
}

/// Sequential sweep over `i < j`. `None` when cancelled.
pub(crate) fn sweep(
    docs: &[ShingledDocument],
    config: &ComparisonConfig,
    extractor: &ExcerptExtractor,
    cancel: &CancelSignal,
    tracker: &ProgressTracker,
) -> Option<Vec<PairResult>> {
    let mut results = Vec::new();
    for i in 0..docs.len() {
        for j in (i + 1)..docs.len() {
            if cancel.is_cancelled() {
                return None;
            }
            if let Some(result) = compare_pair(&docs[i], &docs[j], config, extractor) {
                results.push(result);
            }
            tracker.pair_done();
        }
    }
    Some(results)
}
