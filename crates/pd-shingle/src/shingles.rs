//! N-gram shingling over a token sequence.

use crate::tokenizer::tokenize;
use pd_core::{Document, ShingledDocument};

/// Space-joined runs of `n` consecutive tokens, one per start position.
///
/// Fewer than `n` tokens yields no shingles. `n == 0` is rejected upstream by
/// config validation and also yields no shingles here.
pub fn generate_shingles<S: AsRef<str>>(tokens: &[S], n: usize) -> Vec<String> {
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }
    tokens
        .windows(n)
        .map(|w| w.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join(" "))
        .collect()
}

/// Tokenize and shingle a document once, indexing first occurrences.
pub fn shingle_document(doc: &Document, n: usize) -> ShingledDocument {
    let tokens = tokenize(&doc.text);
    let shingles = generate_shingles(&tokens, n);
    ShingledDocument::from_parts(doc.id.clone(), n, tokens, shingles)
}
