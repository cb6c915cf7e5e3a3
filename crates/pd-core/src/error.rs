use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Unknown metric: {0} (expected \"jaccard\" or \"dice\")")]
    UnknownMetric(String),
    #[error("Insufficient documents for comparison: need at least 2, found {found}")]
    InsufficientDocuments { found: usize },
    #[error("Run failed: {0}")]
    RunFailed(String),
    #[error("Run already {0}; start a new run")]
    RunReused(String),
    #[error("Worker error: {0}")]
    Worker(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PdError>;
