//! Heuristic filter for paragraphs that are really code, config or tables.
//!
//! Each rule is independent; a paragraph matching any one of them is
//! rejected. The thresholds are tuning constants, exposed through
//! [`CodeFilter`] so they can be recalibrated from configuration.

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

/// Thresholds for [`CodeFilter::looks_like_code`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CodeFilter {
    /// Reject when more than this share of tokens has no letter in it.
    pub max_non_alpha_ratio: f64,
    /// Reject at this many backticks or more.
    pub backtick_limit: usize,
    /// Reject at this many `|` characters or more (tables).
    pub pipe_limit: usize,
    /// Tokens at least this many characters long count as "long".
    pub long_token_chars: usize,
    /// Reject when more than this share of tokens is long.
    pub max_long_token_ratio: f64,
    /// With code punctuation or keywords present, reject below this
    /// share of tokens containing a letter.
    pub hint_min_alpha_ratio: f64,
}

impl Default for CodeFilter {
    fn default() -> Self {
        Self {
            max_non_alpha_ratio: 0.45,
            backtick_limit: 6,
            pipe_limit: 8,
            long_token_chars: 25,
            max_long_token_ratio: 0.12,
            hint_min_alpha_ratio: 0.72,
        }
    }
}

fn code_hint_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"[{}\[\]();<>]|==|!=|<=|>=|->|=>|::|///|#include|\b(def|class|import|return|const|let|var)\b",
        )
        .unwrap()
    })
}

impl CodeFilter {
    pub fn looks_like_code(&self, text: &str) -> bool {
        let s = text.trim();
        if s.is_empty() {
            return true;
        }

        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.is_empty() {
            return true;
        }
        let total = tokens.len() as f64;

        let alpha = tokens
            .iter()
            .filter(|t| t.chars().any(char::is_alphabetic))
            .count();
        let alpha_ratio = alpha as f64 / total;
        let non_alpha_ratio = (tokens.len() - alpha) as f64 / total;
        if non_alpha_ratio > self.max_non_alpha_ratio {
            return true;
        }

        if s.matches('`').count() >= self.backtick_limit {
            return true;
        }
        if s.matches('|').count() >= self.pipe_limit {
            return true;
        }

        let long = tokens
            .iter()
            .filter(|t| t.chars().count() >= self.long_token_chars)
            .count();
        if long as f64 / total > self.max_long_token_ratio {
            return true;
        }

        code_hint_re().is_match(s) && alpha_ratio < self.hint_min_alpha_ratio
    }
}
