//! Run configuration: n-gram size, threshold, metric and excerpt policy.

use crate::error::{PdError, Result};
use crate::types::Metric;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Institutional front-matter terms that mark an excerpt as cover-page boilerplate.
pub const DEFAULT_COVER_PAGE_KEYWORDS: &[&str] = &[
    "instituto", "federal", "educação", "ciência", "tecnologia", "rondônia",
    "campus", "ariquemes", "trabalho", "apresentado", "disciplina", "análise",
    "desenvolvimento", "sistemas", "ifro", "sumário", "introdução",
];

/// Excerpt merging and boilerplate filtering policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcerptConfig {
    /// Shingle positions that may be skipped while still extending an excerpt.
    pub max_gap: usize,
    /// Distinct keyword hits needed to drop an excerpt. `1` drops on any hit, `0` disables.
    pub min_keyword_count: usize,
    pub cover_page_keywords: Vec<String>,
}

impl ExcerptConfig {
    /// Single-hit policy: any keyword disqualifies the excerpt.
    pub fn strict() -> Self {
        Self { min_keyword_count: 1, ..Self::default() }
    }

    pub fn with_max_gap(mut self, max_gap: usize) -> Self {
        self.max_gap = max_gap;
        self
    }

    pub fn with_min_keyword_count(mut self, count: usize) -> Self {
        self.min_keyword_count = count;
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cover_page_keywords = keywords.into_iter().map(|k| k.into().to_lowercase()).collect();
        self
    }
}

impl Default for ExcerptConfig {
    fn default() -> Self {
        Self {
            max_gap: 2,
            min_keyword_count: 3,
            cover_page_keywords: DEFAULT_COVER_PAGE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Immutable per-run comparison settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    pub ngram_size: usize,
    /// Minimum score, as a fraction in `[0, 1]`.
    pub threshold: f64,
    pub metric: Metric,
    pub excerpt: ExcerptConfig,
    /// Threads used for the pairwise sweep. `1` keeps it on the calling thread.
    pub workers: usize,
    /// Fraction of the progress bar reserved for the shingling phase.
    pub shingling_share: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            ngram_size: 5,
            threshold: 0.3,
            metric: Metric::Jaccard,
            excerpt: ExcerptConfig::default(),
            workers: 1,
            shingling_share: 0.10,
        }
    }
}

impl ComparisonConfig {
    pub fn new(ngram_size: usize, threshold: f64, metric: Metric) -> Self {
        Self { ngram_size, threshold, metric, ..Self::default() }
    }

    pub fn with_excerpt(mut self, excerpt: ExcerptConfig) -> Self {
        self.excerpt = excerpt;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_shingling_share(mut self, share: f64) -> Self {
        self.shingling_share = share;
        self
    }

    /// Reject settings the engine cannot run with. Nothing is defaulted silently.
    pub fn validate(&self) -> Result<()> {
        if self.ngram_size == 0 {
            return Err(PdError::InvalidConfig("ngram_size must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(PdError::InvalidConfig(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        if self.workers == 0 {
            return Err(PdError::InvalidConfig("workers must be at least 1".into()));
        }
        if !(0.0..1.0).contains(&self.shingling_share) {
            return Err(PdError::InvalidConfig(format!(
                "shingling_share must be within [0, 1), got {}",
                self.shingling_share
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document. Missing keys fall back to defaults.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading comparison config");
        Self::from_toml_str(&raw)
    }
}
