use crate::*;
use std::io::Write;

// ========== Metric ==========

#[test]
fn test_metric_parse_case_insensitive() {
    assert_eq!("jaccard".parse::<Metric>().unwrap(), Metric::Jaccard);
    assert_eq!("Dice".parse::<Metric>().unwrap(), Metric::Dice);
    assert_eq!(" JACCARD ".parse::<Metric>().unwrap(), Metric::Jaccard);
}

#[test]
fn test_metric_unknown_name() {
    let err = "cosine".parse::<Metric>().unwrap_err();
    assert!(matches!(err, PdError::UnknownMetric(ref name) if name == "cosine"));
}

#[test]
fn test_metric_display_label() {
    assert_eq!(Metric::Jaccard.to_string(), "Jaccard");
    assert_eq!(Metric::Dice.to_string(), "Dice");
}

#[test]
fn test_metric_serde_lowercase() {
    let json = serde_json::to_string(&Metric::Dice).unwrap();
    assert_eq!(json, "\"dice\"");
    let back: Metric = serde_json::from_str("\"Jaccard\"").unwrap();
    assert_eq!(back, Metric::Jaccard);
    assert!(serde_json::from_str::<Metric>("\"overlap\"").is_err());
}

// ========== ShingledDocument ==========

#[test]
fn test_first_index_keeps_first_position() {
    let shingles = vec!["a b".to_string(), "b c".into(), "c a".into(), "a b".into()];
    let doc = ShingledDocument::from_parts("d", 2, Vec::new(), shingles);
    assert_eq!(doc.shingles.len(), 4);
    assert_eq!(doc.unique_count(), 3);
    assert_eq!(doc.first_index["a b"], 0);
    assert_eq!(doc.first_index["c a"], 2);
    assert!(doc.contains("b c"));
    assert!(!doc.contains("c b"));
}

#[test]
fn test_empty_shingled_document() {
    let doc = ShingledDocument::from_parts("empty", 3, Vec::new(), Vec::new());
    assert!(doc.is_empty());
    assert_eq!(doc.unique_count(), 0);
}

// ========== Results / Progress ==========

#[test]
fn test_similarity_pct() {
    let r = PairResult {
        doc_a: "a".into(),
        doc_b: "b".into(),
        score: 0.5,
        metric: Metric::Jaccard,
        excerpts: vec!["x y z".into()],
    };
    assert!((r.similarity_pct() - 50.0).abs() < 1e-9);
}

#[test]
fn test_progress_clamped() {
    assert_eq!(ProgressEvent::new(1.2).fraction, 1.0);
    assert_eq!(ProgressEvent::new(-0.1).fraction, 0.0);
    assert_eq!(ProgressEvent::new(0.4).fraction, 0.4);
}

#[test]
fn test_run_state_terminal() {
    assert!(!RunState::Idle.is_terminal());
    assert!(!RunState::Comparing.is_terminal());
    assert!(RunState::Completed.is_terminal());
    assert!(RunState::Cancelled.is_terminal());
    assert!(RunState::Failed.is_terminal());
}

#[test]
fn test_run_outcome_results() {
    assert!(RunOutcome::Cancelled.results().is_none());
    assert!(RunOutcome::Cancelled.is_cancelled());
    assert_eq!(RunOutcome::Completed(Vec::new()).results().unwrap().len(), 0);
}

// ========== Config ==========

#[test]
fn test_default_config_valid() {
    let cfg = ComparisonConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.excerpt.max_gap, 2);
    assert_eq!(cfg.excerpt.min_keyword_count, 3);
    assert_eq!(cfg.excerpt.cover_page_keywords.len(), DEFAULT_COVER_PAGE_KEYWORDS.len());
    assert!((cfg.shingling_share - 0.10).abs() < 1e-12);
}

#[test]
fn test_config_rejects_zero_ngram() {
    let cfg = ComparisonConfig::new(0, 0.5, Metric::Jaccard);
    assert!(matches!(cfg.validate(), Err(PdError::InvalidConfig(_))));
}

#[test]
fn test_config_rejects_threshold_out_of_range() {
    assert!(ComparisonConfig::new(3, 1.5, Metric::Dice).validate().is_err());
    assert!(ComparisonConfig::new(3, -0.1, Metric::Dice).validate().is_err());
    assert!(ComparisonConfig::new(3, f64::NAN, Metric::Dice).validate().is_err());
    assert!(ComparisonConfig::new(3, 1.0, Metric::Dice).validate().is_ok());
    assert!(ComparisonConfig::new(3, 0.0, Metric::Dice).validate().is_ok());
}

#[test]
fn test_config_rejects_zero_workers() {
    let cfg = ComparisonConfig::default().with_workers(0);
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_rejects_full_shingling_share() {
    let cfg = ComparisonConfig::default().with_shingling_share(1.0);
    assert!(cfg.validate().is_err());
}

#[test]
fn test_strict_excerpt_config() {
    let ex = ExcerptConfig::strict();
    assert_eq!(ex.min_keyword_count, 1);
    assert_eq!(ex.max_gap, 2);
}

#[test]
fn test_with_keywords_lowercases() {
    let ex = ExcerptConfig::default().with_keywords(["Sumário", "IFRO"]);
    assert_eq!(ex.cover_page_keywords, vec!["sumário".to_string(), "ifro".to_string()]);
}

#[test]
fn test_from_toml_partial() {
    let cfg = ComparisonConfig::from_toml_str(
        r#"
        ngram_size = 3
        metric = "dice"

        [excerpt]
        max_gap = 0
        "#,
    )
    .unwrap();
    assert_eq!(cfg.ngram_size, 3);
    assert_eq!(cfg.metric, Metric::Dice);
    assert_eq!(cfg.excerpt.max_gap, 0);
    assert_eq!(cfg.excerpt.min_keyword_count, 3);
    assert!((cfg.threshold - 0.3).abs() < 1e-12);
}

#[test]
fn test_from_toml_unknown_metric() {
    let err = ComparisonConfig::from_toml_str("metric = \"cosine\"").unwrap_err();
    assert!(matches!(err, PdError::Toml(_)));
    assert!(err.to_string().contains("cosine"));
}

#[test]
fn test_from_toml_invalid_threshold() {
    let err = ComparisonConfig::from_toml_str("threshold = 30.0").unwrap_err();
    assert!(matches!(err, PdError::InvalidConfig(_)));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "ngram_size = 4\nthreshold = 0.25\nworkers = 2").unwrap();
    let cfg = ComparisonConfig::load(file.path()).unwrap();
    assert_eq!(cfg.ngram_size, 4);
    assert_eq!(cfg.workers, 2);
}

#[test]
fn test_load_missing_file() {
    let err = ComparisonConfig::load("/definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, PdError::Io(_)));
}

#[test]
fn test_error_messages() {
    let err = PdError::InsufficientDocuments { found: 1 };
    assert_eq!(err.to_string(), "Insufficient documents for comparison: need at least 2, found 1");
}

#[test]
fn test_error_from_conversions() {
    let io: PdError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert_eq!(io.to_string(), "IO error: gone");

    let json: PdError = serde_json::from_str::<Metric>("42").unwrap_err().into();
    assert!(matches!(json, PdError::Serialization(_)));
}
