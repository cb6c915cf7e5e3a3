use crate::error::PdError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Set-overlap measure used to score a document pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum Metric {
    Jaccard,
    Dice,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Jaccard => write!(f, "Jaccard"),
            Metric::Dice => write!(f, "Dice"),
        }
    }
}

impl FromStr for Metric {
    type Err = PdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "jaccard" => Ok(Metric::Jaccard),
            "dice" => Ok(Metric::Dice),
            _ => Err(PdError::UnknownMetric(s.to_string())),
        }
    }
}

impl TryFrom<String> for Metric {
    type Error = PdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Already-extracted plain text of one input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }
}

/// Tokens and ordered shingles derived once per document per run.
#[derive(Debug, Clone, Default)]
pub struct ShingledDocument {
    pub id: String,
    pub ngram_size: usize,
    pub tokens: Vec<String>,
    /// `shingles[k]` starts at token `k`. Duplicates are kept.
    pub shingles: Vec<String>,
    /// First position of each distinct shingle; its keys are the shingle set.
    pub first_index: HashMap<String, usize>,
}

impl ShingledDocument {
    /// Assemble from an ordered shingle sequence, indexing first occurrences.
    pub fn from_parts(
        id: impl Into<String>,
        ngram_size: usize,
        tokens: Vec<String>,
        shingles: Vec<String>,
    ) -> Self {
        let mut first_index = HashMap::with_capacity(shingles.len());
        for (idx, shingle) in shingles.iter().enumerate() {
            first_index.entry(shingle.clone()).or_insert(idx);
        }
        Self { id: id.into(), ngram_size, tokens, shingles, first_index }
    }

    pub fn unique_count(&self) -> usize {
        self.first_index.len()
    }

    pub fn contains(&self, shingle: &str) -> bool {
        self.first_index.contains_key(shingle)
    }

    pub fn is_empty(&self) -> bool {
        self.shingles.is_empty()
    }
}

/// A reported near-duplicate pair. `doc_a` precedes `doc_b` in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairResult {
    pub doc_a: String,
    pub doc_b: String,
    pub score: f64,
    pub metric: Metric,
    pub excerpts: Vec<String>,
}

impl PairResult {
    pub fn similarity_pct(&self) -> f64 {
        self.score * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub fraction: f64,
}

impl ProgressEvent {
    pub fn new(fraction: f64) -> Self {
        Self { fraction: fraction.clamp(0.0, 1.0) }
    }
}

/// Lifecycle of a single comparison run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Shingling,
    Comparing,
    Completed,
    Cancelled,
    Failed,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed | RunState::Cancelled | RunState::Failed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunState::Idle => "idle",
            RunState::Shingling => "shingling",
            RunState::Comparing => "comparing",
            RunState::Completed => "completed",
            RunState::Cancelled => "cancelled",
            RunState::Failed => "failed",
        };
        write!(f, "{label}")
    }
}

/// How a run ended when it did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed(Vec<PairResult>),
    Cancelled,
}

impl RunOutcome {
    pub fn results(&self) -> Option<&[PairResult]> {
        match self {
            RunOutcome::Completed(results) => Some(results),
            RunOutcome::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunOutcome::Cancelled)
    }
}
