//! Excerpt extraction: common shingles, proximity merge, boilerplate filter.
//!
//! Overlapping common shingles of a pair are stitched back into one run of
//! readable text. A small gap tolerance keeps a run together across
//! word-level edits.

use crate::tokenizer::tokenize;
use pd_core::{ExcerptConfig, ShingledDocument};
use std::collections::HashSet;

/// A shingle of document A that also occurs in document B, with its position in A.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonShingle<'a> {
    pub value: &'a str,
    pub index: usize,
}

/// Shingles of `a`'s sequence that are members of `b`'s set, in `a`'s order.
/// Repeated shingles appear once per occurrence in `a`.
pub fn common_shingles<'a>(a: &'a ShingledDocument, b: &ShingledDocument) -> Vec<CommonShingle<'a>> {
    a.shingles
        .iter()
        .enumerate()
        .filter(|(_, value)| b.contains(value))
        .map(|(index, value)| CommonShingle { value, index })
        .collect()
}

/// Collapse repeats and order by first occurrence in `a`.
pub fn dedup_by_first_occurrence<'a>(
    common: &[CommonShingle<'a>],
    a: &ShingledDocument,
) -> Vec<CommonShingle<'a>> {
    let mut seen = HashSet::with_capacity(common.len());
    let mut unique: Vec<CommonShingle<'a>> = common
        .iter()
        .filter(|c| seen.insert(c.value))
        .map(|c| CommonShingle {
            value: c.value,
            index: a.first_index.get(c.value).copied().unwrap_or(c.index),
        })
        .collect();
    unique.sort_by_key(|c| c.index);
    unique
}

/// Merge position-ordered common shingles into contiguous excerpts.
///
/// A shingle starting within `max_gap` positions of the previous one extends
/// the current excerpt with the tokens of `a` it adds past the excerpt's end;
/// for an adjacent shingle that is exactly its last token. Anything further
/// away starts a new excerpt.
pub fn merge_excerpts(common: &[CommonShingle<'_>], a: &ShingledDocument, max_gap: usize) -> Vec<String> {
    let Some(first) = common.first() else {
        return Vec::new();
    };
    let n = a.ngram_size.max(1);

    let mut excerpts = Vec::new();
    let mut current = first.value.to_string();
    let mut last_index = first.index;
    let mut covered_end = first.index + n;

    for shingle in &common[1..] {
        let idx = shingle.index;
        if idx <= last_index.saturating_add(max_gap).saturating_add(1) {
            let end = idx + n;
            if end > covered_end {
                match a.tokens.get(covered_end..end) {
                    Some(extra) => {
                        for token in extra {
                            current.push(' ');
                            current.push_str(token);
                        }
                    }
                    // Tokens not retained: fall back to the shingle's trailing word.
                    None => {
                        if let Some(last) = shingle.value.rsplit(' ').next() {
                            current.push(' ');
                            current.push_str(last);
                        }
                    }
                }
                covered_end = end;
            }
        } else {
            excerpts.push(std::mem::replace(&mut current, shingle.value.to_string()));
            covered_end = idx + n;
        }
        last_index = idx;
    }
    excerpts.push(current);
    excerpts
}

/// Drops excerpts dominated by cover-page vocabulary.
#[derive(Debug, Clone)]
pub struct BoilerplateFilter {
    keywords: HashSet<String>,
    min_keyword_count: usize,
}

impl BoilerplateFilter {
    pub fn new(config: &ExcerptConfig) -> Self {
        Self {
            keywords: config.cover_page_keywords.iter().map(|k| k.to_lowercase()).collect(),
            min_keyword_count: config.min_keyword_count,
        }
    }

    /// Distinct cover-page keywords present in `excerpt`.
    pub fn keyword_hits(&self, excerpt: &str) -> usize {
        tokenize(excerpt)
            .into_iter()
            .filter(|w| self.keywords.contains(w))
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn is_boilerplate(&self, excerpt: &str) -> bool {
        self.min_keyword_count > 0 && self.keyword_hits(excerpt) >= self.min_keyword_count
    }

    pub fn filter(&self, excerpts: Vec<String>) -> Vec<String> {
        excerpts.into_iter().filter(|e| !self.is_boilerplate(e)).collect()
    }
}

pub fn filter_excerpts(excerpts: Vec<String>, config: &ExcerptConfig) -> Vec<String> {
    BoilerplateFilter::new(config).filter(excerpts)
}

/// Full excerpt pipeline for one ordered pair, built once per run.
#[derive(Debug, Clone)]
pub struct ExcerptExtractor {
    max_gap: usize,
    filter: BoilerplateFilter,
}

impl ExcerptExtractor {
    pub fn new(config: &ExcerptConfig) -> Self {
        Self { max_gap: config.max_gap, filter: BoilerplateFilter::new(config) }
    }

    pub fn extract(&self, a: &ShingledDocument, b: &ShingledDocument) -> Vec<String> {
        let common = common_shingles(a, b);
        let unique = dedup_by_first_occurrence(&common, a);
        let merged = merge_excerpts(&unique, a, self.max_gap);
        let merged_count = merged.len();
        let kept = self.filter.filter(merged);
        tracing::trace!(
            doc_a = %a.id,
            doc_b = %b.id,
            common = unique.len(),
            merged = merged_count,
            kept = kept.len(),
            "excerpts extracted"
        );
        kept
    }
}

pub fn extract_excerpts(a: &ShingledDocument, b: &ShingledDocument, config: &ExcerptConfig) -> Vec<String> {
    ExcerptExtractor::new(config).extract(a, b)
}
