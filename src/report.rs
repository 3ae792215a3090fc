//! Text and JSON rendering of detection results.
//!
//! Rendering writes to any [`std::io::Write`] so commands can target stdout
//! and tests can target a buffer.

use anyhow::Result;
use clap::ValueEnum;
use proseprint_core::extract::normalize_whitespace;
use proseprint_core::models::{BlockStats, ContentBlock, Document, ScoredMatch};
use serde::Serialize;
use std::io::Write;

/// Default snippet length in characters.
pub const SNIPPET_CHARS: usize = 220;

const RULE_WIDTH: usize = 88;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Whitespace-normalized text, cut to `max_chars` characters with `…`.
pub fn snippet(text: &str, max_chars: usize) -> String {
    let t = normalize_whitespace(text);
    if t.chars().count() <= max_chars {
        return t;
    }
    let mut cut: String = t.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[derive(Debug, Serialize)]
pub struct BlockView<'a> {
    pub index: usize,
    pub document: &'a str,
    pub heading_path: String,
    pub fingerprint: String,
    pub content_words: usize,
    pub text: &'a str,
}

impl<'a> BlockView<'a> {
    pub fn new(documents: &'a [Document], blocks: &'a [ContentBlock], index: usize) -> Self {
        let block = &blocks[index];
        Self {
            index,
            document: &documents[block.source.0].id,
            heading_path: block.heading_path(),
            fingerprint: block.fingerprint.to_string(),
            content_words: block.words.len(),
            text: &block.text,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MatchView<'a> {
    pub score: f64,
    pub hamming: u32,
    pub a: BlockView<'a>,
    pub b: BlockView<'a>,
}

#[derive(Debug, Serialize)]
pub struct MatchReport<'a> {
    pub stats: BlockStats,
    pub candidates: usize,
    pub matches: Vec<MatchView<'a>>,
}

pub fn match_views<'a>(
    documents: &'a [Document],
    blocks: &'a [ContentBlock],
    matches: &[ScoredMatch],
) -> Vec<MatchView<'a>> {
    matches
        .iter()
        .map(|m| MatchView {
            score: m.score,
            hamming: m.hamming,
            a: BlockView::new(documents, blocks, m.pair.a),
            b: BlockView::new(documents, blocks, m.pair.b),
        })
        .collect()
}

fn write_side<W: Write>(out: &mut W, label: &str, view: &BlockView<'_>) -> Result<()> {
    writeln!(out, "{}: {}", label, view.document)?;
    if !view.heading_path.is_empty() {
        writeln!(out, "   {}", view.heading_path)?;
    }
    Ok(())
}

/// Human-readable match listing.
pub fn write_matches_text<W: Write>(
    out: &mut W,
    matches: &[MatchView<'_>],
    show_full: bool,
) -> Result<()> {
    for m in matches {
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(out, "Similarity (Jaccard): {:.3}", m.score)?;
        write_side(out, "A", &m.a)?;
        write_side(out, "B", &m.b)?;

        if show_full {
            writeln!(out, "\n--- Duplicated text (A) ---")?;
            writeln!(out, "{}", m.a.text)?;
            writeln!(out, "\n--- Duplicated text (B) ---")?;
            writeln!(out, "{}", m.b.text)?;
        } else {
            writeln!(out, "\n--- Duplicated text snippets ---")?;
            writeln!(out, "A: {}", snippet(m.a.text, SNIPPET_CHARS))?;
            writeln!(out, "B: {}", snippet(m.b.text, SNIPPET_CHARS))?;
        }
    }
    Ok(())
}

pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// One block per entry, with its heading path and fingerprint.
pub fn write_blocks_text<W: Write>(out: &mut W, blocks: &[BlockView<'_>]) -> Result<()> {
    for b in blocks {
        writeln!(out, "{}. {} [{}]", b.index, b.document, b.fingerprint)?;
        if !b.heading_path.is_empty() {
            writeln!(out, "    headings: {}", b.heading_path)?;
        }
        writeln!(out, "    content words: {}", b.content_words)?;
        writeln!(out, "    excerpt: \"{}\"", snippet(b.text, SNIPPET_CHARS))?;
        writeln!(out)?;
    }
    Ok(())
}
