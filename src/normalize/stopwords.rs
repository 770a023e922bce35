//! Stopword table used by the preprocessing pipeline.
//!
//! The list itself comes from the `stop-words` crate (NLTK English list) and
//! is materialized once into a lookup set, so the pipeline logic carries no
//! inline word data.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use stop_words::{get, LANGUAGE};

static ENGLISH: Lazy<HashSet<String>> = Lazy::new(|| get(LANGUAGE::English).into_iter().collect());

/// Fixed set of common low-information English words.
pub fn english() -> &'static HashSet<String> {
    &ENGLISH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_common_function_words() {
        let words = english();
        assert!(words.contains("the"));
        assert!(words.contains("and"));
        assert!(words.contains("is"));
    }

    #[test]
    fn excludes_content_words() {
        let words = english();
        assert!(!words.contains("cat"));
        assert!(!words.contains("similarity"));
    }
}
