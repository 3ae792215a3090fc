//! Word tokenizer and stop-word normalizer.
//!
//! A token is a maximal run of letters and apostrophes that starts with a
//! letter and is at least two characters long, lower-cased. Lone letters
//! such as `x` or list labels are not words. Content words are the tokens left after removing
//! [`STOP_WORDS`].

use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::OnceLock;

/// Common English function words dropped before fingerprinting and scoring.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "if", "then", "else", "when", "while", "for", "to",
    "of", "in", "on", "at", "by", "with", "without", "as", "is", "are", "was", "were", "be",
    "been", "being", "this", "that", "these", "those", "it", "its", "they", "them", "their",
    "you", "your", "we", "our", "i", "me", "my", "he", "his", "she", "her", "from", "into",
    "out", "up", "down", "over", "under", "again", "more", "most", "some", "such", "no", "nor",
    "not", "only", "own", "same", "so", "than", "too", "very", "can", "could", "should",
    "would", "may", "might", "will", "just", "also",
];

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\p{L}[\p{L}']+").unwrap())
}

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

pub fn is_stop_word(token: &str) -> bool {
    stop_words().contains(token)
}

/// Lower-cased word tokens in text order, stop words included.
pub fn tokenize(text: &str) -> Vec<String> {
    word_re()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Tokens with stop words removed. Duplicates are kept.
pub fn content_words(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| !is_stop_word(t))
        .cloned()
        .collect()
}

/// The deduplicated content-word set of `text`.
pub fn content_word_set(text: &str) -> BTreeSet<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| !is_stop_word(t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_keeps_apostrophes() {
        let tokens = tokenize("Don't PANIC, it's fine.");
        assert_eq!(tokens, vec!["don't", "panic", "it's", "fine"]);
    }

    #[test]
    fn test_tokens_must_start_with_letter() {
        let tokens = tokenize("'quoted' 42abc x1y");
        assert_eq!(tokens, vec!["quoted'", "abc"]);
    }

    #[test]
    fn test_single_letters_are_not_tokens() {
        assert_eq!(tokenize("use x y z q w e r t"), vec!["use"]);
        assert_eq!(tokenize("I'd pick a or b"), vec!["i'd", "pick", "or"]);
    }

    #[test]
    fn test_unicode_letters() {
        let tokens = tokenize("Café Über naïve");
        assert_eq!(tokens, vec!["café", "über", "naïve"]);
    }

    #[test]
    fn test_content_words_drop_stop_words() {
        let tokens = tokenize("The cache is warmed at the start of the build");
        assert_eq!(content_words(&tokens), vec!["cache", "warmed", "start", "build"]);
    }

    #[test]
    fn test_content_word_set_dedups() {
        let set = content_word_set("Build the build, then build again");
        assert_eq!(set.len(), 1);
        assert!(set.contains("build"));
    }

    #[test]
    fn test_only_stop_words_yields_empty_set() {
        assert!(content_word_set("it is what it is").contains("what"));
        assert!(content_word_set("it is as it was").is_empty());
    }
}
