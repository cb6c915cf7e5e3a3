//! Set-overlap scoring: Jaccard and Dice over distinct shingles.

use pd_core::{Metric, ShingledDocument};
use std::collections::HashSet;

/// Score two shingle sequences. Duplicates collapse before counting.
pub fn score<S: AsRef<str>>(a: &[S], b: &[S], metric: Metric) -> f64 {
    let set_a: HashSet<&str> = a.iter().map(AsRef::as_ref).collect();
    let set_b: HashSet<&str> = b.iter().map(AsRef::as_ref).collect();
    let (small, large) = if set_a.len() <= set_b.len() { (&set_a, &set_b) } else { (&set_b, &set_a) };
    let intersection = small.iter().filter(|s| large.contains(*s)).count();
    from_counts(intersection, set_a.len(), set_b.len(), metric)
}

/// Score two shingled documents using their precomputed shingle sets.
pub fn score_documents(a: &ShingledDocument, b: &ShingledDocument, metric: Metric) -> f64 {
    let (small, large) = if a.unique_count() <= b.unique_count() { (a, b) } else { (b, a) };
    let intersection = small.first_index.keys().filter(|s| large.contains(s)).count();
    from_counts(intersection, a.unique_count(), b.unique_count(), metric)
}

pub fn jaccard(intersection: usize, len_a: usize, len_b: usize) -> f64 {
    let union = len_a + len_b - intersection;
    if union == 0 { 0.0 } else { intersection as f64 / union as f64 }
}

pub fn dice(intersection: usize, len_a: usize, len_b: usize) -> f64 {
    let total = len_a + len_b;
    if total == 0 { 0.0 } else { (2 * intersection) as f64 / total as f64 }
}

fn from_counts(intersection: usize, len_a: usize, len_b: usize, metric: Metric) -> f64 {
    match metric {
        Metric::Jaccard => jaccard(intersection, len_a, len_b),
        Metric::Dice => dice(intersection, len_a, len_b),
    }
}
