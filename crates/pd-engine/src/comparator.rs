//! Async front-end: runs a comparison off the caller's task and streams
//! [`RunMessage`]s back over a channel.

use crate::cancel::CancelSignal;
use crate::progress::ProgressReporter;
use crate::run::Run;
use pd_core::{ComparisonConfig, Document, PairResult, PdError, ProgressEvent, Result, RunOutcome};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Messages from a running comparison. Exactly one terminal message
/// (`Results`, `Error` or `Cancelled`) ends every stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RunMessage {
    Progress { fraction: f64 },
    Results { results: Vec<PairResult> },
    Error { error: String },
    Cancelled,
}

impl RunMessage {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunMessage::Progress { .. })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn from_outcome(outcome: Result<RunOutcome>) -> Self {
        match outcome {
            Ok(RunOutcome::Completed(results)) => RunMessage::Results { results },
            Ok(RunOutcome::Cancelled) => RunMessage::Cancelled,
            Err(err) => RunMessage::Error { error: err.to_string() },
        }
    }
}

/// Forwards progress into the message channel. A closed channel means
/// nobody is listening any more, so the run is cancelled.
struct ChannelProgress {
    tx: mpsc::UnboundedSender<RunMessage>,
    cancel: CancelSignal,
}

impl ProgressReporter for ChannelProgress {
    fn report(&self, event: ProgressEvent) {
        if self.tx.send(RunMessage::Progress { fraction: event.fraction }).is_err() {
            self.cancel.cancel();
        }
    }
}

/// Starts comparison runs with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    config: ComparisonConfig,
}

impl Comparator {
    pub fn new(config: ComparisonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Start a run on the blocking pool. Must be called inside a tokio runtime.
    pub fn spawn(&self, documents: Vec<Document>) -> RunHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancelSignal::new();
        let config = self.config.clone();
        let run_cancel = cancel.clone();

        let task = tokio::task::spawn_blocking(move || {
            let reporter = Arc::new(ChannelProgress { tx: tx.clone(), cancel: run_cancel.clone() });
            let mut run = Run::new(config, run_cancel, reporter);
            let outcome = run.execute(&documents);
            let _ = tx.send(RunMessage::from_outcome(outcome));
        });

        RunHandle::new(rx, cancel, task)
    }

    /// Spawn a run and wait for its outcome, ignoring progress.
    pub async fn compare(&self, documents: Vec<Document>) -> Result<RunOutcome> {
        self.spawn(documents).finish().await
    }
}

/// Caller's side of a spawned run.
pub struct RunHandle {
    messages: mpsc::UnboundedReceiver<RunMessage>,
    cancel: CancelSignal,
    task: Option<JoinHandle<()>>,
    terminated: bool,
}

impl RunHandle {
    pub(crate) fn new(
        messages: mpsc::UnboundedReceiver<RunMessage>,
        cancel: CancelSignal,
        task: JoinHandle<()>,
    ) -> Self {
        Self { messages, cancel, task: Some(task), terminated: false }
    }

    /// Ask the run to stop. It will end with `RunMessage::Cancelled` unless it
    /// already sent its terminal message.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_signal(&self) -> CancelSignal {
        self.cancel.clone()
    }

    /// Next message, or `None` once the terminal message has been received.
    /// A run that dies without reporting ends with a synthesized `Error`.
    pub async fn recv(&mut self) -> Option<RunMessage> {
        if self.terminated {
            return None;
        }
        let message = match self.messages.recv().await {
            Some(message) => message,
            None => RunMessage::Error { error: self.abandoned().await.to_string() },
        };
        self.terminated = message.is_terminal();
        Some(message)
    }

    /// Drain the stream, passing progress to `on_progress`, and return the
    /// terminal outcome.
    pub async fn finish_with<F>(mut self, mut on_progress: F) -> Result<RunOutcome>
    where
        F: FnMut(ProgressEvent),
    {
        while let Some(message) = self.messages.recv().await {
            match message {
                RunMessage::Progress { fraction } => on_progress(ProgressEvent::new(fraction)),
                RunMessage::Results { results } => return Ok(RunOutcome::Completed(results)),
                RunMessage::Cancelled => return Ok(RunOutcome::Cancelled),
                RunMessage::Error { error } => return Err(PdError::RunFailed(error)),
            }
        }
        Err(self.abandoned().await)
    }

    pub async fn finish(self) -> Result<RunOutcome> {
        self.finish_with(|_| {}).await
    }

    /// The sender is gone without a terminal message: the blocking task died.
    async fn abandoned(&mut self) -> PdError {
        match self.task.take() {
            Some(task) => match task.await {
                Err(err) => PdError::Worker(err.to_string()),
                Ok(()) => PdError::Worker("run ended without a terminal message".into()),
            },
            None => PdError::Worker("run already ended".into()),
        }
    }
}
