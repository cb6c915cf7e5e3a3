//! Shingle-based text overlap detection.
//!
//! Stages:
//! 1. Tokenizer: lower-case word tokens
//! 2. Shingles: overlapping n-grams per document
//! 3. Similarity: Jaccard / Dice over distinct shingles
//! 4. Excerpts: common shingles merged into readable runs, boilerplate dropped

pub mod excerpt;
pub mod shingles;
pub mod similarity;
pub mod tokenizer;

pub use excerpt::{
    common_shingles, dedup_by_first_occurrence, extract_excerpts, filter_excerpts, merge_excerpts,
    BoilerplateFilter, CommonShingle, ExcerptExtractor,
};
pub use shingles::{generate_shingles, shingle_document};
pub use similarity::{score, score_documents};
pub use tokenizer::tokenize;
