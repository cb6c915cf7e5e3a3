//! `pd`: compare plain-text documents for shared passages.
//!
//! Every file named on the command line is one document. Run messages are
//! written to stdout as JSON lines; logs go to stderr.

use anyhow::{bail, Context};
use clap::Parser;
use pd_core::{ComparisonConfig, Document, Metric};
use pd_engine::{Comparator, RunMessage};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "pd", version, about = "Near-duplicate passage detection over plain-text documents")]
struct Cli {
    /// Plain-text files to compare pairwise (at least two).
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// TOML configuration file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Words per shingle.
    #[arg(long)]
    ngram_size: Option<usize>,

    /// Minimum similarity in [0, 1] for a pair to be reported.
    #[arg(long)]
    threshold: Option<f64>,

    /// Similarity metric: jaccard or dice.
    #[arg(long)]
    metric: Option<String>,

    /// Shingle positions that may be skipped inside one excerpt.
    #[arg(long)]
    max_gap: Option<usize>,

    /// Distinct cover-page keywords that mark an excerpt as boilerplate (0 disables).
    #[arg(long)]
    min_keywords: Option<usize>,

    /// Drop excerpts containing any cover-page keyword.
    #[arg(long, conflicts_with = "min_keywords")]
    strict: bool,

    /// Replace the cover-page keyword list. Repeatable.
    #[arg(long = "keyword")]
    keywords: Vec<String>,

    /// Worker threads for the pairwise sweep.
    #[arg(long)]
    workers: Option<usize>,

    /// Also print progress messages.
    #[arg(long)]
    progress: bool,
}

impl Cli {
    fn comparison_config(&self) -> anyhow::Result<ComparisonConfig> {
        let mut config = match &self.config {
            Some(path) => ComparisonConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => ComparisonConfig::default(),
        };
        if let Some(n) = self.ngram_size {
            config.ngram_size = n;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(metric) = &self.metric {
            config.metric = metric.parse::<Metric>()?;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(max_gap) = self.max_gap {
            config.excerpt.max_gap = max_gap;
        }
        if let Some(count) = self.min_keywords {
            config.excerpt.min_keyword_count = count;
        }
        if self.strict {
            config.excerpt.min_keyword_count = 1;
        }
        if !self.keywords.is_empty() {
            config.excerpt = config.excerpt.with_keywords(self.keywords.iter().cloned());
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

async fn read_documents(files: &[PathBuf]) -> anyhow::Result<Vec<Document>> {
    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        documents.push(Document::new(path.display().to_string(), text));
    }
    Ok(documents)
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.comparison_config()?;
    let documents = read_documents(&cli.files).await?;
    tracing::info!(files = documents.len(), "documents loaded");

    let mut handle = Comparator::new(config).spawn(documents);
    let cancel = handle.cancel_signal();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling run");
            cancel.cancel();
        }
    });

    while let Some(message) = handle.recv().await {
        if !message.is_terminal() && !cli.progress {
            continue;
        }
        println!("{}", message.to_json()?);
        match message {
            RunMessage::Progress { .. } => {}
            RunMessage::Results { .. } => return Ok(ExitCode::SUCCESS),
            RunMessage::Error { .. } => return Ok(ExitCode::FAILURE),
            RunMessage::Cancelled => return Ok(ExitCode::from(130)),
        }
    }
    bail!("comparison ended without a result")
}
