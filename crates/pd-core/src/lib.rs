//! Shared data model, configuration and errors for the passage detector.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ComparisonConfig, ExcerptConfig, DEFAULT_COVER_PAGE_KEYWORDS};
pub use error::{PdError, Result};
pub use types::{
    Document, Metric, PairResult, ProgressEvent, RunOutcome, RunState, ShingledDocument,
};

#[cfg(test)]
mod tests;
