//! Word tokenizer: lower-case, split on runs of non-word characters.

use regex::Regex;
use std::sync::LazyLock;

// `\W` is Unicode-aware, so accented Portuguese letters stay inside words.
static RE_NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());

/// Split `text` into lower-cased word tokens, discarding empty fragments.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    RE_NON_WORD
        .split(&lowered)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

