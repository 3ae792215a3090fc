//! Heading-scoped paragraph extractor for Markdown text.
//!
//! Splits a document into cleaned [`Paragraph`]s, each labelled with the
//! stack of headings it sits under. Fenced code is dropped entirely and
//! inline markup is stripped, so only prose reaches the tokenizer.
//!
//! # Algorithm
//!
//! 1. Scan lines in order. A line starting (after indentation) with
//!    ```` ``` ```` or `~~~` opens a fence; only the same marker closes it.
//!    Everything inside a fence is dropped.
//! 2. A heading line (`#` to `######`) flushes the current paragraph, pops
//!    every heading of the same or deeper level, and pushes itself.
//! 3. Other non-blank lines accumulate into the current paragraph; a blank
//!    line flushes it.
//! 4. Flushing cleans the joined lines (see [`clean_paragraph`]) and keeps
//!    the result when it has at least `min_words` tokens.
//!
//! An unterminated fence swallows the rest of the document. That is not an
//! error.
//!
//! # Example
//!
//! ```rust
//! use proseprint_core::extract::extract_paragraphs;
//!
//! let md = "# Setup\n\nRun the **installer** and follow [the guide](https://example.com).";
//! let paragraphs = extract_paragraphs(md, 3);
//! assert_eq!(paragraphs.len(), 1);
//! assert_eq!(paragraphs[0].text, "Run the installer and follow the guide.");
//! assert_eq!(paragraphs[0].headings[0].title, "Setup");
//! ```

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{Heading, Paragraph};
use crate::tokenize::tokenize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FenceKind {
    Backtick,
    Tilde,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InFence(FenceKind),
}

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(```|~~~)").unwrap())
}

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#{1,6})\s+(.+?)\s*$").unwrap())
}

fn inline_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`[^`]+`").unwrap())
}

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap())
}

fn autolink_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<https?://[^>]+>").unwrap())
}

fn html_emphasis_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</?(i|em|strong|b)>").unwrap())
}

fn emphasis_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*|\*|__|_").unwrap())
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Collapse whitespace runs to single spaces and trim.
pub fn normalize_whitespace(s: &str) -> String {
    whitespace_re().replace_all(s, " ").trim().to_string()
}

/// Strip inline Markdown/HTML markup from a raw paragraph.
///
/// Inline code spans are removed, links become their text, bare
/// `<https://…>` autolinks are removed, emphasis markers and
/// `<i>`/`<em>`/`<strong>`/`<b>` tags are removed with their inner text kept.
/// Markers are replaced by spaces so neighbouring words never fuse.
pub fn clean_paragraph(raw: &str) -> String {
    let s = inline_code_re().replace_all(raw, " ");
    let s = link_re().replace_all(&s, "$1");
    let s = autolink_re().replace_all(&s, " ");
    let s = html_emphasis_re().replace_all(&s, " ");
    let s = emphasis_re().replace_all(&s, " ");
    normalize_whitespace(&s)
}

/// Line-by-line scan state: fence mode, heading stack, open paragraph.
struct LineScanner<'a> {
    state: ScanState,
    headings: Vec<Heading>,
    paragraph: Vec<&'a str>,
    min_words: usize,
    out: Vec<Paragraph>,
}

impl<'a> LineScanner<'a> {
    fn new(min_words: usize) -> Self {
        Self {
            state: ScanState::Normal,
            headings: Vec::new(),
            paragraph: Vec::new(),
            min_words,
            out: Vec::new(),
        }
    }

    fn feed(&mut self, line: &'a str) {
        if let Some(kind) = fence_marker(line) {
            match self.state {
                ScanState::Normal => {
                    self.flush();
                    self.state = ScanState::InFence(kind);
                }
                ScanState::InFence(open) if open == kind => {
                    self.state = ScanState::Normal;
                }
                ScanState::InFence(_) => {}
            }
            return;
        }

        if let ScanState::InFence(_) = self.state {
            return;
        }

        if let Some(heading) = parse_heading(line) {
            self.flush();
            while self
                .headings
                .last()
                .is_some_and(|top| top.level >= heading.level)
            {
                self.headings.pop();
            }
            self.headings.push(heading);
            return;
        }

        if line.trim().is_empty() {
            self.flush();
            return;
        }

        self.paragraph.push(line);
    }

    fn flush(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let raw = self.paragraph.join("\n");
        self.paragraph.clear();

        let cleaned = clean_paragraph(raw.trim());
        if tokenize(&cleaned).len() >= self.min_words {
            self.out.push(Paragraph {
                headings: self.headings.clone(),
                text: cleaned,
            });
        }
    }

    fn finish(mut self) -> Vec<Paragraph> {
        self.flush();
        self.out
    }
}

fn fence_marker(line: &str) -> Option<FenceKind> {
    let caps = fence_re().captures(line)?;
    match caps.get(1)?.as_str() {
        "```" => Some(FenceKind::Backtick),
        _ => Some(FenceKind::Tilde),
    }
}

fn parse_heading(line: &str) -> Option<Heading> {
    let caps = heading_re().captures(line)?;
    let level = caps.get(1)?.as_str().len() as u8;
    let title = normalize_whitespace(caps.get(2)?.as_str());
    Some(Heading { level, title })
}

/// Split `text` into cleaned, heading-labelled paragraphs with at least
/// `min_words` tokens (stop words included).
pub fn extract_paragraphs(text: &str, min_words: usize) -> Vec<Paragraph> {
    let mut scanner = LineScanner::new(min_words);
    for line in text.lines() {
        scanner.feed(line);
    }
    scanner.finish()
}
